//! The chat transport contract consumed by agent decisions and the
//! reasoner.

use crate::error::Result;
use async_trait::async_trait;

/// Generation options for a single chat call.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub response_format: Option<ResponseFormat>,
    pub seed: Option<u64>,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 512,
            response_format: None,
            seed: None,
        }
    }
}

/// Requested shape of the model's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

/// A chat completion: raw text plus, when the caller requested JSON, the
/// value parsed out of it.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
    pub parsed: Option<serde_json::Value>,
}

/// A chat-completion backend. PRISM treats the concrete LLM transport
/// (Ollama, a hosted API, a local model server) as an external
/// collaborator: anything that can turn a system instruction and a user
/// prompt into text satisfies this trait.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, instructions: &str, prompt: &str, options: &ChatOptions) -> Result<ChatResponse>;
}
