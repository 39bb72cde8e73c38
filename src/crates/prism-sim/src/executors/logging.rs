//! Structured decision logging: one JSON line per agent turn, emitted
//! through `tracing` and optionally appended to a file.

use crate::results::DecisionResult;
use crate::state::SimulationState;
use chrono::Utc;
use serde_json::json;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct LoggingExecutor {
    log_file: Option<PathBuf>,
    file_handle: Option<File>,
}

impl LoggingExecutor {
    pub fn new(log_file: Option<PathBuf>) -> std::io::Result<Self> {
        let file_handle = match &log_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                Some(OpenOptions::new().create(true).append(true).open(path)?)
            }
            None => None,
        };
        Ok(Self { log_file, file_handle })
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn execute(&mut self, state: &SimulationState, decision: &DecisionResult) -> std::io::Result<()> {
        let entry = json!({
            "timestamp": Utc::now().to_rfc3339(),
            "round": state.round_number,
            "agent_id": decision.agent_id,
            "trigger": decision.trigger,
            "from_state": decision.from_state.as_str(),
            "to_state": decision.to_state.as_str(),
            "action_type": decision.action.as_ref().map(|a| a.action.as_str()),
            "reasoner_used": decision.reasoner_used,
        });

        info!(decision = %entry, "agent decision");

        if let Some(handle) = &mut self.file_handle {
            writeln!(handle, "{entry}")?;
            handle.flush()?;
        }
        Ok(())
    }

    pub fn close(&mut self) {
        self.file_handle = None;
    }
}

impl Drop for LoggingExecutor {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ActionResult;
    use prism_agents::Agent;
    use prism_core::{create_social_media_statechart, AgentState};
    use std::io::Read;

    fn decision() -> DecisionResult {
        DecisionResult {
            agent_id: "a1".to_string(),
            trigger: "decides".to_string(),
            from_state: AgentState::Evaluating,
            to_state: AgentState::EngagingLike,
            action: Some(ActionResult::new("like", Some("p1".to_string()))),
            reasoner_used: true,
        }
    }

    #[test]
    fn writes_one_json_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("decisions.jsonl");
        let chart = create_social_media_statechart::<Agent>();
        let agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        let state = SimulationState::new(vec![agent], chart).unwrap();

        let mut executor = LoggingExecutor::new(Some(log_path.clone())).unwrap();
        executor.execute(&state, &decision()).unwrap();
        executor.execute(&state, &decision()).unwrap();
        executor.close();

        let mut contents = String::new();
        File::open(&log_path).unwrap().read_to_string(&mut contents).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["agent_id"], "a1");
        assert_eq!(parsed["reasoner_used"], true);
    }

    #[test]
    fn no_file_is_fine_without_a_log_file() {
        let chart = create_social_media_statechart::<Agent>();
        let agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        let state = SimulationState::new(vec![agent], chart).unwrap();

        let mut executor = LoggingExecutor::new(None).unwrap();
        assert!(executor.execute(&state, &decision()).is_ok());
    }
}
