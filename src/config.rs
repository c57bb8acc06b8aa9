//! Application configuration
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. optional TOML file
//! 3. `LOAN_ADVISOR__<SECTION>__<KEY>` environment variables for scalar
//!    keys, plus `LOAN_ADVISOR__ENTITIES__LOAN_TYPES` as a comma-separated list

use crate::completion::CompletionConfig;
use crate::error::Result;
use crate::facts::FactStoreConfig;
use crate::router::RecognizedEntities;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub facts: FactStoreConfig,

    #[serde(default)]
    pub entities: RecognizedEntities,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("LOAN_ADVISOR")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("entities.loan_types")
}

impl AdvisorConfig {
    /// Load configuration; a missing `path` means defaults plus environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(environment)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(source: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
