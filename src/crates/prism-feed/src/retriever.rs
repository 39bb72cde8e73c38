//! Feed retrieval over a [`VectorStore`], with preference/random/X-algo
//! ranking modes.

use crate::error::{FeedError, Result};
use crate::post::Post;
use crate::ranking::{rerank, Candidate, RankingConfig, RankingMode};
use crate::social_graph::SocialGraph;
use crate::store::VectorStore;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Retrieves feeds from a [`VectorStore`], indexing new posts as they are
/// created.
pub struct FeedRetriever {
    store: Arc<dyn VectorStore>,
    feed_size: usize,
    ranking: RankingConfig,
}

impl FeedRetriever {
    /// `feed_size` is trusted as given; range-checking it against the
    /// documented `1..=20` window is `prism-config`'s job at load time,
    /// not this constructor's.
    pub fn new(store: Arc<dyn VectorStore>, feed_size: usize, ranking: RankingConfig) -> Result<Self> {
        ranking.validate()?;
        Ok(Self { store, feed_size, ranking })
    }

    pub async fn add_post(&self, post: &Post) -> Result<()> {
        self.store.upsert(std::slice::from_ref(post)).await
    }

    pub async fn count(&self) -> Result<usize> {
        self.store.count().await
    }

    pub async fn clear(&self) -> Result<()> {
        let all = self.store.get(None).await?;
        let ids: Vec<String> = all.into_iter().map(|p| p.id).collect();
        if !ids.is_empty() {
            self.store.delete(&ids).await?;
        }
        Ok(())
    }

    /// Retrieve a feed for `interests`, using `viewer_id` and `graph` when
    /// `ranking.mode` is [`RankingMode::XAlgo`].
    pub async fn get_feed(
        &self,
        interests: &[String],
        viewer_id: &str,
        graph: Option<&SocialGraph>,
    ) -> Result<Vec<Post>> {
        if self.store.count().await? == 0 {
            return Err(FeedError::EmptyCollection);
        }

        match self.ranking.mode {
            RankingMode::Preference => self.get_feed_preference(interests).await,
            RankingMode::Random => self.get_feed_random().await,
            RankingMode::XAlgo => self.get_feed_x_algo(interests, viewer_id, graph).await,
        }
    }

    async fn get_feed_preference(&self, interests: &[String]) -> Result<Vec<Post>> {
        if interests.is_empty() {
            return Err(FeedError::MissingInterests);
        }
        let query_text = interests.join(" ");
        self.store.query(&query_text, self.feed_size).await
    }

    async fn get_feed_random(&self) -> Result<Vec<Post>> {
        let all = self.store.get(None).await?;
        let mut rng = rand::thread_rng();
        let sample_size = self.feed_size.min(all.len());
        let mut ids: Vec<&Post> = all.iter().collect();
        ids.shuffle(&mut rng);
        Ok(ids.into_iter().take(sample_size).cloned().collect())
    }

    async fn get_feed_x_algo(
        &self,
        interests: &[String],
        viewer_id: &str,
        graph: Option<&SocialGraph>,
    ) -> Result<Vec<Post>> {
        if interests.is_empty() {
            return Err(FeedError::MissingInterests);
        }
        let query_text = interests.join(" ");
        let pool_size = self.ranking.in_network_limit + self.ranking.out_of_network_limit;
        let candidates_posts = self.store.query(&query_text, pool_size).await?;

        let candidates: Vec<Candidate> = candidates_posts
            .into_iter()
            .enumerate()
            .map(|(rank, post)| {
                let in_network = graph
                    .map(|g| g.is_following(viewer_id, &post.author_id))
                    .unwrap_or(false);
                // Base relevance derived from query rank: earlier results
                // are more relevant.
                let base_relevance = 1.0 / (rank as f64 + 1.0);
                Candidate {
                    post,
                    base_relevance,
                    in_network,
                }
            })
            .collect();

        Ok(rerank(candidates, &self.ranking, self.feed_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryVectorStore;

    #[tokio::test]
    async fn empty_collection_fails() {
        let store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::new());
        let retriever = FeedRetriever::new(store, 5, RankingConfig::default()).unwrap();
        let err = retriever
            .get_feed(&["tech".to_string()], "viewer", None)
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::EmptyCollection));
    }

    #[tokio::test]
    async fn preference_mode_requires_interests() {
        let store = InMemoryVectorStore::new();
        store.upsert(&[Post::new("p1", "a1", "tech news")]).await.unwrap();
        let store: Arc<dyn VectorStore> = Arc::new(store);
        let retriever = FeedRetriever::new(store, 5, RankingConfig::default()).unwrap();
        let err = retriever.get_feed(&[], "viewer", None).await.unwrap_err();
        assert!(matches!(err, FeedError::MissingInterests));
    }

    #[tokio::test]
    async fn feed_size_clamped_to_available_posts() {
        let store = InMemoryVectorStore::new();
        store.upsert(&[Post::new("p1", "a1", "tech news")]).await.unwrap();
        let store: Arc<dyn VectorStore> = Arc::new(store);
        let mut ranking = RankingConfig::default();
        ranking.mode = RankingMode::Random;
        let retriever = FeedRetriever::new(store, 5, ranking).unwrap();
        let feed = retriever.get_feed(&[], "viewer", None).await.unwrap();
        assert_eq!(feed.len(), 1);
    }
}
