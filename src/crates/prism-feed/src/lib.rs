//! Post model, vector-store retrieval, and feed ranking for PRISM agents.
//!
//! The embedding backend and vector index are external collaborators:
//! anything implementing [`VectorStore`] can back a [`FeedRetriever`].
//! [`InMemoryVectorStore`] is the reference implementation used by tests.

mod error;
mod post;
mod ranking;
mod retriever;
mod social_graph;
mod store;

pub use error::{FeedError, Result};
pub use post::{MediaConsistencyError, MediaType, Post};
pub use ranking::{rerank, Candidate, RankingConfig, RankingMode};
pub use retriever::FeedRetriever;
pub use social_graph::SocialGraph;
pub use store::{Include, InMemoryVectorStore, VectorStore};
