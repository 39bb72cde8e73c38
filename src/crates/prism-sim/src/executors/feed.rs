//! Feed retrieval step of the per-agent pipeline.

use prism_agents::SimAgent;
use prism_feed::{FeedRetriever, Post, Result, SocialGraph};
use std::sync::Arc;

/// Retrieves the feed an agent sees this round, using its interests for
/// preference/X-algo ranking and its id for in-network classification.
pub struct FeedRetrievalExecutor {
    retriever: Arc<FeedRetriever>,
    graph: Option<Arc<SocialGraph>>,
}

impl FeedRetrievalExecutor {
    pub fn new(retriever: Arc<FeedRetriever>, graph: Option<Arc<SocialGraph>>) -> Self {
        Self { retriever, graph }
    }

    /// Shares the underlying retriever so other pipeline steps (state
    /// update indexing new posts) can use the same index.
    pub fn retriever(&self) -> Arc<FeedRetriever> {
        Arc::clone(&self.retriever)
    }

    pub async fn execute(&self, agent: &dyn SimAgent) -> Result<Vec<Post>> {
        self.retriever
            .get_feed(agent.interests(), agent.agent_id(), self.graph.as_deref())
            .await
    }
}
