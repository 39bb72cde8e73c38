//! Error types for feed retrieval and ranking.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("interests required for preference mode")]
    MissingInterests,

    #[error("collection is empty")]
    EmptyCollection,

    #[error("vector store error")]
    Storage,

    #[error("invalid ranking config: author_diversity_floor ({floor}) must be <= author_diversity_decay ({decay})")]
    InvalidRankingConfig { floor: f64, decay: f64 },
}
