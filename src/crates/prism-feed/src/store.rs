//! The vector-store contract consumed by the feed retriever.
//!
//! PRISM treats the embedding backend and vector index as external
//! collaborators: any engine that can upsert documents by id, answer a
//! k-NN text query, fetch by id, count, and delete satisfies
//! [`VectorStore`]. [`InMemoryVectorStore`] is a reference implementation
//! used by tests and by callers who don't need a persistent index.

use crate::error::{FeedError, Result};
use crate::post::Post;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// What a query or get should return alongside document ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Include {
    Documents,
    Metadatas,
    Both,
}

/// A vector-indexed document store keyed by post id.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Upsert posts into the index, replacing any existing entry with the
    /// same id.
    async fn upsert(&self, posts: &[Post]) -> Result<()>;

    /// Return up to `n_results` posts most similar to `query_text`.
    async fn query(&self, query_text: &str, n_results: usize) -> Result<Vec<Post>>;

    /// Fetch specific posts by id, or all posts if `ids` is `None`.
    async fn get(&self, ids: Option<&[String]>) -> Result<Vec<Post>>;

    /// Number of indexed posts.
    async fn count(&self) -> Result<usize>;

    /// Remove posts by id.
    async fn delete(&self, ids: &[String]) -> Result<()>;
}

/// A simple in-process [`VectorStore`] that ranks by naive lexical overlap
/// between the query text and post text, rather than a real embedding
/// model. Suitable for tests and for callers that only need the
/// random/get/count/delete surface.
#[derive(Default)]
pub struct InMemoryVectorStore {
    posts: RwLock<HashMap<String, Post>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn overlap_score(query: &str, text: &str) -> usize {
        let query_tokens: std::collections::HashSet<&str> =
            query.split_whitespace().collect();
        text.split_whitespace()
            .filter(|t| query_tokens.contains(t))
            .count()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(&self, posts: &[Post]) -> Result<()> {
        let mut store = self.posts.write().map_err(|_| FeedError::Storage)?;
        for post in posts {
            store.insert(post.id.clone(), post.clone());
        }
        Ok(())
    }

    async fn query(&self, query_text: &str, n_results: usize) -> Result<Vec<Post>> {
        let store = self.posts.read().map_err(|_| FeedError::Storage)?;
        let mut scored: Vec<(usize, &Post)> = store
            .values()
            .map(|p| (Self::overlap_score(query_text, &p.text), p))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));
        Ok(scored
            .into_iter()
            .take(n_results)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn get(&self, ids: Option<&[String]>) -> Result<Vec<Post>> {
        let store = self.posts.read().map_err(|_| FeedError::Storage)?;
        match ids {
            Some(ids) => Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect()),
            None => Ok(store.values().cloned().collect()),
        }
    }

    async fn count(&self) -> Result<usize> {
        let store = self.posts.read().map_err(|_| FeedError::Storage)?;
        Ok(store.len())
    }

    async fn delete(&self, ids: &[String]) -> Result<()> {
        let mut store = self.posts.write().map_err(|_| FeedError::Storage)?;
        for id in ids {
            store.remove(id);
        }
        Ok(())
    }
}
