//! Loan advisor session: fact-backed answers with completion fallback

use crate::completion::{build_prompt, ChatCompletionClient, CompletionBackend};
use crate::config::AdvisorConfig;
use crate::error::Result;
use crate::facts::{FactQuery, FactStore};
use crate::metrics::METRICS;
use crate::router::{QueryRouter, Resolution};
use std::sync::Arc;
use tracing::{error, info};

/// Marker for answers that did not come from the knowledge base
pub const GENERAL_INFO_PREFIX: &str = "[General Info]";

/// One user-facing advisor. Holds no per-turn state.
pub struct LoanAdvisor {
    router: QueryRouter,
    kb: Arc<dyn FactQuery>,
    backend: Arc<dyn CompletionBackend>,
}

impl LoanAdvisor {
    pub fn new(router: QueryRouter, kb: Arc<dyn FactQuery>, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { router, kb, backend }
    }

    /// Load the fact store and build the HTTP backend. Fails if the fact
    /// resource cannot be read or parsed.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        let store = FactStore::from_config(&config.facts)?;
        let backend = ChatCompletionClient::new(config.completion.clone())?;
        let router = QueryRouter::new(config.entities.clone());

        info!(
            "Advisor ready: {} facts, {} loan types, {} people",
            store.len(),
            config.entities.loan_types.len(),
            config.entities.people.len()
        );

        Ok(Self::new(router, Arc::new(store), Arc::new(backend)))
    }

    /// Answer one turn. Never fails: backend errors become error text.
    pub async fn respond(&self, input: &str) -> String {
        match self.router.route(input, self.kb.as_ref()) {
            Resolution::Answered { intent, response } => {
                METRICS.record_turn(intent.label());
                response
            }
            Resolution::Fallback => {
                METRICS.record_turn("fallback");
                self.ask_backend(input).await
            }
        }
    }

    async fn ask_backend(&self, question: &str) -> String {
        let prompt = build_prompt(question);
        match self.backend.complete(&prompt).await {
            Ok(text) => format!("{} {}", GENERAL_INFO_PREFIX, text.trim()),
            Err(e) => {
                error!("Error generating response from completion backend: {}", e);
                format!("I'm sorry, I couldn't generate a response at this time. Error: {}", e)
            }
        }
    }
}
