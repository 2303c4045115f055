//! Language-model client seam: prompt in, text out.
pub mod mock;
pub mod ollama;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("completion request failed: {0}")]
    RequestFailed(String),

    #[error("empty response from model")]
    EmptyResponse,
}

/// Trait for language-model completion backends.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Complete a prompt and return the model's answer text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
