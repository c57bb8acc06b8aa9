//! Configuration for the completion backend

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Completion backend configuration
///
/// The endpoint must speak the OpenAI chat-completions protocol.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    /// Chat completions URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; when absent it is read from `api_key_env`
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first failed attempt
    #[serde(default)]
    pub max_retries: usize,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Completion length cap
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_api_key_env() -> String {
    "LOAN_ADVISOR_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
            temperature: None,
            max_tokens: None,
        }
    }
}

impl CompletionConfig {
    /// Explicit key, or the one found in `api_key_env`
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        self.api_key.clone().or_else(|| {
            std::env::var(&self.api_key_env)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(SecretString::new)
        })
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
