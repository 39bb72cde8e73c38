//! Simulation-loop configuration. Nested under the `[simulation]` table
//! of the crate-wide TOML config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_max_rounds() -> u32 {
    50
}

fn default_checkpoint_frequency() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

/// Round-loop knobs: how long to run, how often to checkpoint, whether
/// the reasoner and decision logging are active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub max_rounds: u32,
    pub checkpoint_frequency: u32,
    pub checkpoint_dir: Option<PathBuf>,
    pub reasoner_enabled: bool,
    pub log_decisions: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            checkpoint_frequency: default_checkpoint_frequency(),
            checkpoint_dir: None,
            reasoner_enabled: default_true(),
            log_decisions: default_true(),
            log_file: None,
        }
    }
}

/// Rejected configuration values: zero rounds or zero checkpoint
/// frequency would never make progress or never checkpoint.
#[derive(Debug, thiserror::Error)]
pub enum SimulationConfigError {
    #[error("max_rounds must be at least 1")]
    ZeroMaxRounds,
    #[error("checkpoint_frequency must be at least 1")]
    ZeroCheckpointFrequency,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationConfigError> {
        if self.max_rounds < 1 {
            return Err(SimulationConfigError::ZeroMaxRounds);
        }
        if self.checkpoint_frequency < 1 {
            return Err(SimulationConfigError::ZeroCheckpointFrequency);
        }
        Ok(())
    }

    pub fn should_checkpoint(&self, round_number: u64) -> bool {
        round_number > 0 && round_number % self.checkpoint_frequency as u64 == 0
    }
}
