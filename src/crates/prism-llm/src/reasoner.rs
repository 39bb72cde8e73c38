//! LLM-backed tiebreaker for ambiguous statechart transitions.

use crate::chat::{ChatModel, ChatOptions, ResponseFormat};
use crate::json_extract::extract_json;
use prism_core::AgentState;
use std::collections::HashMap;
use tracing::warn;

/// Human-readable description of each state, used to help the model
/// understand its options.
fn state_description(state: AgentState) -> &'static str {
    match state {
        AgentState::Idle => "Stop browsing, wait for next round",
        AgentState::Scrolling => "Continue browsing without engaging",
        AgentState::Evaluating => "Look more closely at this post",
        AgentState::Composing => "Write a response or original content",
        AgentState::EngagingLike => "Like this post",
        AgentState::EngagingReply => "Reply to this post",
        AgentState::EngagingReshare => "Reshare this post",
        AgentState::Resting => "Take a break from activity",
    }
}

fn format_context(context: Option<&HashMap<String, serde_json::Value>>) -> String {
    match context {
        None => String::new(),
        Some(map) if map.is_empty() => String::new(),
        Some(map) => {
            let mut lines = vec!["Context:".to_string()];
            for (key, value) in map {
                lines.push(format!("  {key}: {value}"));
            }
            lines.join("\n")
        }
    }
}

/// Build the prompt sent to the chat model for a reasoner decision.
pub fn build_reasoner_prompt(
    agent_name: &str,
    agent_interests: &[String],
    agent_personality: &str,
    current_state: AgentState,
    trigger: &str,
    options: &[AgentState],
    context: Option<&HashMap<String, serde_json::Value>>,
) -> String {
    let options_text = options
        .iter()
        .map(|opt| format!("- {}: {}", opt.as_str(), state_description(*opt)))
        .collect::<Vec<_>>()
        .join("\n");

    let context_text = format_context(context);

    format!(
        "You are {agent_name}, a social media user.\n\n\
         Your interests: {interests}\n\
         Your personality: {agent_personality}\n\n\
         You are in the \"{current_state}\" state and received \"{trigger}\" event.\n\n\
         {context_text}\n\n\
         Choose your next state from these options:\n{options_text}\n\n\
         Respond with JSON only:\n{{\"next_state\": \"<state_value>\"}}\n",
        agent_name = agent_name,
        interests = agent_interests.join(", "),
        agent_personality = agent_personality,
        current_state = current_state.as_str(),
        trigger = trigger,
        context_text = context_text,
        options_text = options_text,
    )
}

/// Resolves ambiguous statechart transitions by asking a [`ChatModel`]
/// which option the agent should take.
pub struct Reasoner {
    client: Box<dyn ChatModel>,
}

impl Reasoner {
    pub fn new(client: Box<dyn ChatModel>) -> Self {
        Self { client }
    }

    /// Choose a target state from `options`. `options` must be non-empty.
    ///
    /// On any transport failure, or a response that can't be parsed or
    /// doesn't name one of `options`, falls back to `options[0]` rather
    /// than propagating an error — an ambiguous transition still has to
    /// resolve to something so the round can proceed.
    pub async fn decide(
        &self,
        agent_name: &str,
        agent_interests: &[String],
        agent_personality: &str,
        current_state: AgentState,
        trigger: &str,
        options: &[AgentState],
        context: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<AgentState, &'static str> {
        if options.is_empty() {
            return Err("options cannot be empty");
        }

        let prompt = build_reasoner_prompt(
            agent_name,
            agent_interests,
            agent_personality,
            current_state,
            trigger,
            options,
            context,
        );

        let chat_options = ChatOptions {
            response_format: Some(ResponseFormat::Json),
            ..Default::default()
        };

        match self.client.chat("", &prompt, &chat_options).await {
            Ok(response) => Ok(Self::parse_response(&response.text, options)),
            Err(e) => {
                warn!(error = %e, "reasoner chat call failed, using fallback");
                Ok(options[0])
            }
        }
    }

    fn parse_response(response_text: &str, options: &[AgentState]) -> AgentState {
        let Some(value) = extract_json(response_text) else {
            warn!("failed to parse reasoner response, using fallback");
            return options[0];
        };

        let state_value = value
            .get("next_state")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_lowercase();

        options
            .iter()
            .find(|opt| opt.as_str() == state_value)
            .copied()
            .unwrap_or_else(|| {
                warn!(state_value, fallback = options[0].as_str(), "reasoner chose a state outside options");
                options[0]
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatResponse;
    use crate::error::{LlmError, Result};
    use async_trait::async_trait;

    struct FixedResponse(String);

    #[async_trait]
    impl ChatModel for FixedResponse {
        async fn chat(&self, _instructions: &str, _prompt: &str, _options: &ChatOptions) -> Result<ChatResponse> {
            Ok(ChatResponse {
                text: self.0.clone(),
                parsed: None,
            })
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl ChatModel for AlwaysFails {
        async fn chat(&self, _instructions: &str, _prompt: &str, _options: &ChatOptions) -> Result<ChatResponse> {
            Err(LlmError::Transient("connection refused".into()))
        }
    }

    #[test]
    fn prompt_lists_every_option_with_its_description() {
        let prompt = build_reasoner_prompt(
            "Ava",
            &["tech".to_string()],
            "curious",
            AgentState::Evaluating,
            "sees_post",
            &[AgentState::EngagingLike, AgentState::Composing],
            None,
        );
        assert!(prompt.contains("Like this post"));
        assert!(prompt.contains("Write a response or original content"));
        assert!(prompt.contains("Ava"));
    }

    #[tokio::test]
    async fn decide_rejects_empty_options() {
        let reasoner = Reasoner::new(Box::new(FixedResponse("{}".to_string())));
        let err = reasoner
            .decide("Ava", &[], "neutral", AgentState::Idle, "start_browsing", &[], None)
            .await
            .unwrap_err();
        assert_eq!(err, "options cannot be empty");
    }

    #[tokio::test]
    async fn decide_picks_the_named_option() {
        let reasoner = Reasoner::new(Box::new(FixedResponse(
            r#"{"next_state": "engaging_like"}"#.to_string(),
        )));
        let chosen = reasoner
            .decide(
                "Ava",
                &["tech".to_string()],
                "neutral",
                AgentState::Evaluating,
                "decides",
                &[AgentState::EngagingLike, AgentState::Composing],
                None,
            )
            .await
            .unwrap();
        assert_eq!(chosen, AgentState::EngagingLike);
    }

    #[tokio::test]
    async fn decide_falls_back_to_first_option_on_transport_failure() {
        let reasoner = Reasoner::new(Box::new(AlwaysFails));
        let chosen = reasoner
            .decide(
                "Ava",
                &["tech".to_string()],
                "neutral",
                AgentState::Evaluating,
                "decides",
                &[AgentState::Composing, AgentState::EngagingLike],
                None,
            )
            .await
            .unwrap();
        assert_eq!(chosen, AgentState::Composing);
    }

    #[tokio::test]
    async fn decide_falls_back_when_response_names_an_unlisted_state() {
        let reasoner = Reasoner::new(Box::new(FixedResponse(
            r#"{"next_state": "resting"}"#.to_string(),
        )));
        let chosen = reasoner
            .decide(
                "Ava",
                &["tech".to_string()],
                "neutral",
                AgentState::Evaluating,
                "decides",
                &[AgentState::Composing, AgentState::EngagingLike],
                None,
            )
            .await
            .unwrap();
        assert_eq!(chosen, AgentState::Composing);
    }
}
