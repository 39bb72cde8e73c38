//! The serializable snapshot written to a checkpoint file.
//!
//! Note: the statechart and reasoner are never serialized. They are
//! reconstructed from configuration by the caller on load.

use chrono::{DateTime, Utc};
use prism_core::AgentState;
use prism_feed::Post;
use std::collections::HashMap;

pub const CURRENT_VERSION: &str = "1.0";
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// Restorable agent state: enough to reconstruct an `Agent`, but not the
/// chat backend an `LlmAgent` wraps around one.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CheckpointedAgent {
    pub agent_id: String,
    pub name: String,
    pub interests: Vec<String>,
    pub personality: String,
    pub state: AgentState,
    pub ticks_in_state: u32,
    pub engagement_threshold: f64,
    pub timeout_threshold: u32,
}

/// Cumulative engagement counters at checkpoint time.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CheckpointMetrics {
    pub total_likes: u64,
    pub total_reshares: u64,
    pub total_replies: u64,
    pub posts_created: u64,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CheckpointData {
    #[serde(default = "default_version")]
    pub version: String,
    pub round_number: u64,
    pub posts: Vec<Post>,
    pub agents: Vec<CheckpointedAgent>,
    pub metrics: CheckpointMetrics,
    pub state_distribution: HashMap<String, usize>,
    pub timestamp: DateTime<Utc>,
}

fn default_version() -> String {
    CURRENT_VERSION.to_string()
}

impl CheckpointData {
    pub fn new(
        round_number: u64,
        posts: Vec<Post>,
        agents: Vec<CheckpointedAgent>,
        metrics: CheckpointMetrics,
        state_distribution: HashMap<String, usize>,
    ) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            round_number,
            posts,
            agents,
            metrics,
            state_distribution,
            timestamp: Utc::now(),
        }
    }
}
