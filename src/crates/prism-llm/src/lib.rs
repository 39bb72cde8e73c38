//! Chat/embedding transport contracts, retry policy, and the statechart
//! reasoner for PRISM.
//!
//! The concrete LLM and embedding backends are external collaborators;
//! this crate only defines the traits they must satisfy plus the pieces
//! built on top of them that belong to the simulation: retry/backoff,
//! robust JSON extraction from free-form model output, and the reasoner
//! tiebreaker itself.

mod chat;
mod embedding;
mod error;
mod json_extract;
mod ollama;
mod reasoner;
mod retry;

pub use chat::{ChatModel, ChatOptions, ChatResponse, ResponseFormat};
pub use embedding::{check_embedding_shape, EmbeddingModel};
pub use error::{classify_error, ErrorClass, LlmError, Result};
pub use json_extract::extract_json;
pub use ollama::OllamaChatModel;
pub use reasoner::{build_reasoner_prompt, Reasoner};
pub use retry::{retry_with_backoff, RetryConfig};
