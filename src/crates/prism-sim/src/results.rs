//! Structured results produced by the executor pipeline.

use crate::state::EngagementMetrics;
use prism_core::AgentState;

/// What an agent did, derived from its state *before* the round's
/// transition — composing means it was composing, not where it's headed
/// next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub action: String,
    pub target_post_id: Option<String>,
    pub content: Option<String>,
}

impl ActionResult {
    pub fn new(action: impl Into<String>, target_post_id: Option<String>) -> Self {
        Self {
            action: action.into(),
            target_post_id,
            content: None,
        }
    }
}

/// The outcome of one agent's turn: trigger, transition, and any action
/// taken, plus whether the reasoner had to resolve an ambiguous target.
#[derive(Debug, Clone)]
pub struct DecisionResult {
    pub agent_id: String,
    pub trigger: String,
    pub from_state: AgentState,
    pub to_state: AgentState,
    pub action: Option<ActionResult>,
    pub reasoner_used: bool,
}

/// All decisions made during a single round.
#[derive(Debug, Clone, Default)]
pub struct RoundResult {
    pub round_number: u64,
    pub decisions: Vec<DecisionResult>,
}

/// The outcome of a complete simulation run.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub total_rounds: u64,
    pub final_metrics: EngagementMetrics,
    pub rounds: Vec<RoundResult>,
}
