//! State mutation step: applies a decision's action to post counters,
//! cumulative metrics, and the feed index.

use crate::results::DecisionResult;
use crate::state::SimulationState;
use prism_feed::{FeedRetriever, Post};
use std::sync::Arc;

pub struct StateUpdateExecutor {
    retriever: Arc<FeedRetriever>,
}

impl StateUpdateExecutor {
    pub fn new(retriever: Arc<FeedRetriever>) -> Self {
        Self { retriever }
    }

    /// Mutates `state` in place per `decision.action`. `new_post` carries
    /// the post produced by a compose/reply/reshare action, if any.
    pub async fn execute(&self, state: &mut SimulationState, decision: &DecisionResult, new_post: Option<Post>) {
        let Some(action) = &decision.action else {
            return;
        };

        match action.action.as_str() {
            "like" => self.handle_like(state, action.target_post_id.as_deref()),
            "reply" => self.handle_reply(state, action.target_post_id.as_deref(), new_post).await,
            "reshare" => self.handle_reshare(state, action.target_post_id.as_deref(), new_post).await,
            "compose" => self.handle_compose(state, new_post).await,
            _ => {}
        }
    }

    fn handle_like(&self, state: &mut SimulationState, target_post_id: Option<&str>) {
        let Some(target_post_id) = target_post_id else {
            return;
        };
        if let Some(post) = state.get_post_by_id_mut(target_post_id) {
            post.likes += 1;
            state.metrics.increment_like();
        }
    }

    async fn handle_reply(&self, state: &mut SimulationState, target_post_id: Option<&str>, new_post: Option<Post>) {
        if let Some(target_post_id) = target_post_id {
            if let Some(post) = state.get_post_by_id_mut(target_post_id) {
                post.replies += 1;
                state.metrics.increment_reply();
            }
        }
        self.add_new_post(state, new_post).await;
    }

    async fn handle_reshare(&self, state: &mut SimulationState, target_post_id: Option<&str>, new_post: Option<Post>) {
        if let Some(target_post_id) = target_post_id {
            if let Some(post) = state.get_post_by_id_mut(target_post_id) {
                post.reshares += 1;
                state.metrics.increment_reshare();
            }
        }
        self.add_new_post(state, new_post).await;
    }

    async fn handle_compose(&self, state: &mut SimulationState, new_post: Option<Post>) {
        self.add_new_post(state, new_post).await;
    }

    async fn add_new_post(&self, state: &mut SimulationState, new_post: Option<Post>) {
        if let Some(post) = new_post {
            let _ = self.retriever.add_post(&post).await;
            state.add_post(post);
        }
    }
}
