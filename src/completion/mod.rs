//! Completion backend used when a question is not answerable from the fact store

pub mod client;
pub mod config;
pub mod prompt;

use async_trait::async_trait;

pub use client::ChatCompletionClient;
pub use config::CompletionConfig;
pub use prompt::build_prompt;

/// Generative text backend: prompt in, text out
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Completion backend errors
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("API key not configured (expected in {0})")]
    MissingApiKey(String),

    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response from completion backend")]
    EmptyResponse,
}

impl CompletionError {
    /// Transient failures worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Network(_) | CompletionError::Timeout(_) => true,
            CompletionError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
