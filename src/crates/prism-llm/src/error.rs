//! Error types for chat/embedding transports and the reasoner.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LlmError>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("options cannot be empty")]
    EmptyOptions,

    #[error("transient transport error: {0}")]
    Transient(String),

    #[error("permanent transport error: {0}")]
    Permanent(String),

    #[error("embedding response length {got} does not match input length {expected}")]
    EmbeddingLengthMismatch { expected: usize, got: usize },

    #[error("{0}")]
    Other(String),
}

/// Classification of a transport error for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transient,
    Permanent,
}

/// Classify an [`LlmError`] to decide whether it is worth retrying.
pub fn classify_error(error: &LlmError) -> ErrorClass {
    match error {
        LlmError::Transient(_) => ErrorClass::Transient,
        LlmError::Permanent(_) => ErrorClass::Permanent,
        _ => ErrorClass::Permanent,
    }
}
