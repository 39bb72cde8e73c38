//! Error types for the simulation loop.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("agents list must not be empty")]
    EmptyAgents,

    #[error("feed retrieval failed: {0}")]
    Feed(#[from] prism_feed::FeedError),

    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] prism_checkpoint::CheckpointError),

    #[error("reasoner error: {0}")]
    Reasoner(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
