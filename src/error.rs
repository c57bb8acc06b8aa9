//! Error types for the loan advisor

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Crate-wide error
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read fact source {path}: {source}")]
    FactSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Fact parse error at line {line}: {message}")]
    FactParse { line: usize, message: String },

    #[error("Completion error: {0}")]
    Completion(#[from] crate::completion::CompletionError),
}

impl From<config::ConfigError> for AdvisorError {
    fn from(err: config::ConfigError) -> Self {
        AdvisorError::Config(err.to_string())
    }
}

impl AdvisorError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        AdvisorError::FactParse {
            line,
            message: message.into(),
        }
    }
}
