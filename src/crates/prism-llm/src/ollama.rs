//! An HTTP [`ChatModel`] for Ollama's `/api/chat` endpoint. One concrete
//! transport among the many a deployment could plug in; the rest of the
//! crate never depends on it directly.

use crate::chat::{ChatModel, ChatOptions, ChatResponse, ResponseFormat};
use crate::error::{LlmError, Result};
use crate::retry::{retry_with_backoff, RetryConfig};
use async_trait::async_trait;
use serde_json::json;

pub struct OllamaChatModel {
    client: reqwest::Client,
    host: String,
    model_id: String,
    retry: RetryConfig,
}

impl OllamaChatModel {
    pub fn new(host: impl Into<String>, model_id: impl Into<String>, timeout_secs: f64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs_f64(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
            model_id: model_id.into(),
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn chat_once(&self, instructions: &str, prompt: &str, options: &ChatOptions) -> Result<ChatResponse> {
        let url = format!("{}/api/chat", self.host);
        let mut format_field = None;
        if options.response_format == Some(ResponseFormat::Json) {
            format_field = Some("json");
        }

        let payload = json!({
            "model": self.model_id,
            "stream": false,
            "messages": [
                {"role": "system", "content": instructions},
                {"role": "user", "content": prompt},
            ],
            "options": {
                "temperature": options.temperature,
                "num_predict": options.max_tokens,
                "seed": options.seed,
            },
            "format": format_field,
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(if status.is_server_error() {
                LlmError::Transient(format!("ollama returned {status}: {body}"))
            } else {
                LlmError::Permanent(format!("ollama returned {status}: {body}"))
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Transient(format!("failed to parse ollama response: {e}")))?;

        let text = body["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::Permanent("ollama response missing message.content".to_string()))?
            .to_string();

        let parsed = crate::json_extract::extract_json(&text);

        Ok(ChatResponse { text, parsed })
    }
}

fn classify_reqwest_error(e: &reqwest::Error) -> LlmError {
    if e.is_timeout() || e.is_connect() {
        LlmError::Transient(e.to_string())
    } else {
        LlmError::Permanent(e.to_string())
    }
}

#[async_trait]
impl ChatModel for OllamaChatModel {
    async fn chat(&self, instructions: &str, prompt: &str, options: &ChatOptions) -> Result<ChatResponse> {
        retry_with_backoff(&self.retry, "ollama_chat", || self.chat_once(instructions, prompt, options)).await
    }
}
