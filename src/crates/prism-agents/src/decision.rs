//! The LLM-facing decision an agent returns from evaluating a post,
//! distinct from the statechart's own transition outcome.

use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("reason cannot be empty")]
    EmptyReason,
    #[error("content is required for a {0:?} decision")]
    MissingContent(Choice),
    #[error("content must be absent for a {0:?} decision")]
    UnexpectedContent(Choice),
}

/// What an agent chose to do about a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Ignore,
    Like,
    Reply,
    Reshare,
}

impl Choice {
    /// Parse a choice from free-form model output. `scroll` is accepted
    /// as a synonym for `ignore` since prompts present it as the
    /// pass-on-this-post option.
    pub fn from_str_loose(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "ignore" | "scroll" => Some(Self::Ignore),
            "like" => Some(Self::Like),
            "reply" => Some(Self::Reply),
            "reshare" => Some(Self::Reshare),
            _ => None,
        }
    }
}

/// An agent's reasoned choice about a specific post. `content` carries
/// reply/reshare text; `reason` is always required as the model's
/// justification for the choice.
#[derive(Debug, Clone)]
pub struct AgentDecision {
    pub choice: Choice,
    pub reason: String,
    pub post_id: Option<String>,
    pub content: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AgentDecision {
    pub fn new(
        choice: Choice,
        reason: impl Into<String>,
        post_id: Option<String>,
        content: Option<String>,
    ) -> Result<Self, DecisionError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(DecisionError::EmptyReason);
        }

        match choice {
            Choice::Ignore | Choice::Like => {
                if content.is_some() {
                    return Err(DecisionError::UnexpectedContent(choice));
                }
            }
            Choice::Reply | Choice::Reshare => {
                // Content is preferred but not mandatory: a reasoner that
                // omits it falls back to `reason` as the posted text.
            }
        }

        let content = match choice {
            Choice::Reply | Choice::Reshare if content.is_none() => Some(reason.clone()),
            _ => content,
        };

        Ok(Self {
            choice,
            reason,
            post_id,
            content,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_reason() {
        let err = AgentDecision::new(Choice::Like, "", None, None).unwrap_err();
        assert!(matches!(err, DecisionError::EmptyReason));
    }

    #[test]
    fn like_rejects_content() {
        let err =
            AgentDecision::new(Choice::Like, "good post", None, Some("text".into())).unwrap_err();
        assert!(matches!(err, DecisionError::UnexpectedContent(Choice::Like)));
    }

    #[test]
    fn reply_falls_back_to_reason_when_content_missing() {
        let decision = AgentDecision::new(Choice::Reply, "great point", None, None).unwrap();
        assert_eq!(decision.content.as_deref(), Some("great point"));
    }

    #[test]
    fn reply_keeps_explicit_content() {
        let decision =
            AgentDecision::new(Choice::Reply, "great point", None, Some("I agree!".into())).unwrap();
        assert_eq!(decision.content.as_deref(), Some("I agree!"));
    }
}
