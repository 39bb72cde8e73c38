//! The embedding transport contract consumed by the feed retriever's
//! vector-store adapters.

use crate::error::{LlmError, Result};
use async_trait::async_trait;

/// Turns documents into fixed-dimension vectors. Implementations must
/// return one vector per input document, in order.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    async fn embed(&self, documents: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Validate that an embedding response has one vector per input document.
pub fn check_embedding_shape(documents: &[String], vectors: &[Vec<f32>]) -> Result<()> {
    if documents.len() != vectors.len() {
        return Err(LlmError::EmbeddingLengthMismatch {
            expected: documents.len(),
            got: vectors.len(),
        });
    }
    Ok(())
}
