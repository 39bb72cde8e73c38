//! Orchestrates the round loop: drives every agent through one turn per
//! round, advances state, and checkpoints at the configured frequency.

use crate::config::SimulationConfig;
use crate::error::{Result, SimError};
use crate::executors::{AgentDecisionExecutor, AgentRoundExecutor, FeedRetrievalExecutor, LoggingExecutor, StateUpdateExecutor};
use crate::results::{RoundResult, SimulationResult};
use crate::state::SimulationState;
use prism_agents::{Agent, SimAgent};
use prism_checkpoint::{CheckpointData, CheckpointMetrics, CheckpointedAgent, Checkpointer};
use prism_core::Statechart;
use prism_llm::Reasoner;
use std::path::Path;

pub struct RoundController {
    checkpointer: Option<Checkpointer>,
}

impl RoundController {
    pub fn new() -> Self {
        Self { checkpointer: None }
    }

    pub async fn run_simulation(
        &mut self,
        config: &SimulationConfig,
        state: &mut SimulationState,
        feed: &FeedRetrievalExecutor,
        reasoner: Option<&Reasoner>,
        mut logging: Option<LoggingExecutor>,
    ) -> Result<SimulationResult> {
        if let Some(dir) = &config.checkpoint_dir {
            self.checkpointer = Some(Checkpointer::new(dir)?);
        }

        let decision = AgentDecisionExecutor::new(reasoner);
        let state_update = StateUpdateExecutor::new(feed_retriever_of(feed));

        let mut rounds = Vec::new();
        for _ in 0..config.max_rounds {
            let round_result = run_round(state, feed, &decision, &state_update, logging.as_mut()).await;
            rounds.push(round_result);
            state.advance_round();

            if config.should_checkpoint(state.round_number) {
                if let Some(checkpointer) = &self.checkpointer {
                    checkpointer.save(&to_checkpoint_data(state))?;
                }
            }
        }

        Ok(SimulationResult {
            total_rounds: config.max_rounds as u64,
            final_metrics: state.metrics.clone(),
            rounds,
        })
    }

    pub async fn resume_from_checkpoint(
        &mut self,
        checkpoint_path: &Path,
        config: &SimulationConfig,
        statechart: Statechart<Agent>,
        feed: &FeedRetrievalExecutor,
        reasoner: Option<&Reasoner>,
        mut logging: Option<LoggingExecutor>,
    ) -> Result<SimulationResult> {
        let dir = checkpoint_path.parent().ok_or_else(|| {
            SimError::Checkpoint(prism_checkpoint::CheckpointError::NotFound(
                checkpoint_path.display().to_string(),
            ))
        })?;
        let loader = Checkpointer::new(dir)?;
        let data = loader.load(checkpoint_path)?;
        let mut state = from_checkpoint_data(data, statechart)?;

        if let Some(checkpoint_dir) = &config.checkpoint_dir {
            self.checkpointer = Some(Checkpointer::new(checkpoint_dir)?);
        }

        let decision = AgentDecisionExecutor::new(reasoner);
        let state_update = StateUpdateExecutor::new(feed_retriever_of(feed));

        let start_round = state.round_number;
        let remaining = (config.max_rounds as u64).saturating_sub(start_round);

        let mut rounds = Vec::new();
        for _ in 0..remaining {
            let round_result = run_round(&mut state, feed, &decision, &state_update, logging.as_mut()).await;
            rounds.push(round_result);
            state.advance_round();

            if config.should_checkpoint(state.round_number) {
                if let Some(checkpointer) = &self.checkpointer {
                    checkpointer.save(&to_checkpoint_data(&state))?;
                }
            }
        }

        Ok(SimulationResult {
            total_rounds: config.max_rounds as u64,
            final_metrics: state.metrics.clone(),
            rounds,
        })
    }
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_round<'a>(
    state: &mut SimulationState,
    feed: &'a FeedRetrievalExecutor,
    decision: &'a AgentDecisionExecutor<'a>,
    state_update: &'a StateUpdateExecutor,
    logging: Option<&'a mut LoggingExecutor>,
) -> RoundResult {
    let mut round_executor = AgentRoundExecutor::new(feed, decision, state_update, logging);
    let mut decisions = Vec::with_capacity(state.agents.len());

    for index in 0..state.agents.len() {
        let outcome = round_executor.execute(state, index, None).await;
        decisions.push(outcome);
    }

    RoundResult {
        round_number: state.round_number,
        decisions,
    }
}

fn feed_retriever_of(feed: &FeedRetrievalExecutor) -> std::sync::Arc<prism_feed::FeedRetriever> {
    feed.retriever()
}

fn to_checkpoint_data(state: &SimulationState) -> CheckpointData {
    let agents = state
        .agents
        .iter()
        .map(|a| CheckpointedAgent {
            agent_id: a.agent_id.clone(),
            name: a.name.clone(),
            interests: a.interests.clone(),
            personality: a.personality.clone(),
            state: a.state(),
            ticks_in_state: a.ticks_in_state,
            engagement_threshold: a.engagement_threshold,
            timeout_threshold: a.timeout_threshold,
        })
        .collect();

    let state_distribution = state
        .get_state_distribution()
        .into_iter()
        .map(|(s, count)| (s.as_str().to_string(), count))
        .collect();

    CheckpointData::new(
        state.round_number,
        state.posts.clone(),
        agents,
        CheckpointMetrics {
            total_likes: state.metrics.total_likes,
            total_reshares: state.metrics.total_reshares,
            total_replies: state.metrics.total_replies,
            posts_created: state.metrics.posts_created,
        },
        state_distribution,
    )
}

fn from_checkpoint_data(data: CheckpointData, statechart: Statechart<Agent>) -> Result<SimulationState> {
    let agents: Vec<Agent> = data
        .agents
        .into_iter()
        .map(|a| {
            let mut agent = Agent::new(a.agent_id, a.name, a.interests);
            agent.personality = a.personality;
            agent.state = a.state;
            agent.ticks_in_state = a.ticks_in_state;
            agent.engagement_threshold = a.engagement_threshold;
            agent.timeout_threshold = a.timeout_threshold;
            agent
        })
        .collect();

    let mut state = SimulationState::new(agents, statechart)?;
    state.posts = data.posts;
    state.round_number = data.round_number;
    state.metrics.total_likes = data.metrics.total_likes;
    state.metrics.total_reshares = data.metrics.total_reshares;
    state.metrics.total_replies = data.metrics.total_replies;
    state.metrics.posts_created = data.metrics.posts_created;
    Ok(state)
}
