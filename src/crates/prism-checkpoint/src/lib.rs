//! Atomic checkpoint persistence for PRISM simulation state.
//!
//! A checkpoint captures everything needed to resume a simulation except
//! the statechart and reasoner, which the caller reconstructs from
//! configuration. Writes go through a temp file and an atomic rename so a
//! crash mid-write never corrupts the last good checkpoint.

mod checkpointer;
mod data;
mod error;

pub use checkpointer::Checkpointer;
pub use data::{CheckpointData, CheckpointMetrics, CheckpointedAgent, CURRENT_VERSION, SUPPORTED_VERSIONS};
pub use error::{CheckpointError, Result};
