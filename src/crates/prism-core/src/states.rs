//! Behavioural states for social agents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of behavioural states an agent can occupy.
///
/// Serializes to its lowercase wire form so it round-trips directly
/// through checkpoints and decision logs without a custom encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    Idle,
    Scrolling,
    Evaluating,
    Composing,
    EngagingLike,
    EngagingReply,
    EngagingReshare,
    Resting,
}

impl AgentState {
    /// All eight states, in declaration order.
    pub const ALL: [AgentState; 8] = [
        AgentState::Idle,
        AgentState::Scrolling,
        AgentState::Evaluating,
        AgentState::Composing,
        AgentState::EngagingLike,
        AgentState::EngagingReply,
        AgentState::EngagingReshare,
        AgentState::Resting,
    ];

    /// The lowercase wire value used in logs and checkpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentState::Idle => "idle",
            AgentState::Scrolling => "scrolling",
            AgentState::Evaluating => "evaluating",
            AgentState::Composing => "composing",
            AgentState::EngagingLike => "engaging_like",
            AgentState::EngagingReply => "engaging_reply",
            AgentState::EngagingReshare => "engaging_reshare",
            AgentState::Resting => "resting",
        }
    }

    /// Parse the lowercase wire value back into a state.
    pub fn from_str_value(value: &str) -> Option<AgentState> {
        AgentState::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Human-readable description used in reasoner prompts.
    pub fn description(&self) -> &'static str {
        match self {
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
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_lowercase_snake_case() {
        assert_eq!(AgentState::EngagingLike.as_str(), "engaging_like");
        assert_eq!(AgentState::Idle.as_str(), "idle");
    }

    #[test]
    fn round_trips_through_wire_value() {
        for state in AgentState::ALL {
            assert_eq!(AgentState::from_str_value(state.as_str()), Some(state));
        }
    }

    #[test]
    fn serde_round_trip() {
        for state in AgentState::ALL {
            let json = serde_json::to_string(&state).unwrap();
            let back: AgentState = serde_json::from_str(&json).unwrap();
            assert_eq!(back, state);
        }
    }

    #[test]
    fn unknown_wire_value_is_none() {
        assert_eq!(AgentState::from_str_value("dancing"), None);
    }
}
