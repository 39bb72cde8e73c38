//! Error types for the statechart engine.

use crate::states::AgentState;
use thiserror::Error;

/// Result type for statechart construction and queries.
pub type Result<T> = std::result::Result<T, StatechartError>;

#[derive(Error, Debug)]
pub enum StatechartError {
    #[error("initial state {0} is not in the declared state set")]
    UnknownInitialState(AgentState),

    #[error("transition '{trigger}' references undeclared state {state}")]
    UnknownTransitionState { trigger: String, state: AgentState },
}
