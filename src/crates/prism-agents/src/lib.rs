//! Agent identity, behavioral state, and decision-making for PRISM.
//!
//! [`SimAgent`] is the capability interface the round executor drives;
//! [`Agent`] is a bare, checkpoint-reconstructible implementation, and
//! [`LlmAgent`] wraps one with a chat backend for the actual
//! engage/ignore decision.

mod agent;
mod decision;
mod llm_agent;
mod profile;

pub use agent::{determine_trigger, Agent, HistoryEntry, SimAgent, DEFAULT_MAX_HISTORY_DEPTH};
pub use decision::{AgentDecision, Choice, DecisionError};
pub use llm_agent::{build_feed_prompt, build_system_prompt, LlmAgent};
pub use profile::{AgentProfile, ProfileError};
