//! Completion backend over an OpenAI-compatible chat API

use super::config::CompletionConfig;
use super::{CompletionBackend, CompletionError};
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// HTTP completion client
pub struct ChatCompletionClient {
    http: Client,
    config: CompletionConfig,
    api_key: Option<SecretString>,
}

impl ChatCompletionClient {
    /// Create a new client; the API key is resolved once here
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CompletionError::Initialization(e.to_string()))?;

        let api_key = config.resolve_api_key();
        if api_key.is_none() {
            warn!(
                "No completion API key configured (set {}); fallback answers will be unavailable",
                config.api_key_env
            );
        }

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    fn backoff(attempt: usize) -> Duration {
        Duration::from_millis(100 * (1 << attempt.min(6)))
    }

    async fn send(&self, request: &ChatCompletionRequest, api_key: &SecretString) -> Result<String, CompletionError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(e.to_string())
                } else {
                    CompletionError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }
}

#[async_trait]
impl CompletionBackend for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| CompletionError::MissingApiKey(self.config.api_key_env.clone()))?;

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let start = Instant::now();
        let mut attempt = 0;
        loop {
            debug!("Completion request attempt {} to {}", attempt + 1, self.config.endpoint);

            match self.send(&request, api_key).await {
                Ok(text) => {
                    METRICS.record_completion(true, start.elapsed().as_secs_f64());
                    return Ok(text);
                }
                Err(e) if attempt < self.config.max_retries && e.is_retryable() => {
                    let backoff = Self::backoff(attempt);
                    warn!("Completion attempt {} failed: {}, retrying in {:?}", attempt + 1, e, backoff);
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    METRICS.record_completion(false, start.elapsed().as_secs_f64());
                    return Err(e);
                }
            }
        }
    }
}

// OpenAI-compatible API types
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
