//! Coordinates the four-step pipeline for a single agent's turn: feed
//! retrieval, decision, state update, logging.

use crate::executors::decision::AgentDecisionExecutor;
use crate::executors::feed::FeedRetrievalExecutor;
use crate::executors::logging::LoggingExecutor;
use crate::executors::state_update::StateUpdateExecutor;
use crate::results::DecisionResult;
use crate::state::SimulationState;
use prism_agents::Agent;
use prism_feed::Post;

pub struct AgentRoundExecutor<'a> {
    feed: &'a FeedRetrievalExecutor,
    decision: &'a AgentDecisionExecutor<'a>,
    state_update: &'a StateUpdateExecutor,
    logging: Option<&'a mut LoggingExecutor>,
}

impl<'a> AgentRoundExecutor<'a> {
    pub fn new(
        feed: &'a FeedRetrievalExecutor,
        decision: &'a AgentDecisionExecutor<'a>,
        state_update: &'a StateUpdateExecutor,
        logging: Option<&'a mut LoggingExecutor>,
    ) -> Self {
        Self { feed, decision, state_update, logging }
    }

    /// Runs the full pipeline for `agent_index` within `state.agents`.
    /// `new_post` carries any post the caller generated for a
    /// compose/reply/reshare action this turn.
    pub async fn execute(
        &mut self,
        state: &mut SimulationState,
        agent_index: usize,
        new_post: Option<Post>,
    ) -> DecisionResult {
        let feed = {
            let agent = &state.agents[agent_index];
            self.feed.execute(agent).await.unwrap_or_default()
        };

        let decision = {
            let agent = &mut state.agents[agent_index];
            self.decision.execute(agent, &state.statechart, &feed).await
        };

        self.state_update.execute(state, &decision, new_post).await;

        if let Some(logging) = self.logging.as_mut() {
            let _ = logging.execute(state, &decision);
        }

        decision
    }
}
