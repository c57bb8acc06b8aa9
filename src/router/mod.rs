//! Query router: classifies a user turn and answers it from the fact store
//! when one of the intent rules can, otherwise signals fallback.

pub mod eligibility;
pub mod entities;
pub mod intents;

pub use eligibility::{evaluate, EligibilityReport, LoanRequirements, Measure, Profile, Verdict};
pub use entities::{normalize_loan_label, LoanType, PersonEntry, RecognizedEntities};
pub use intents::{default_rules, Intent, IntentRule};

use crate::facts::FactQuery;
use tracing::{debug, info};

/// Outcome of routing one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Answered { intent: Intent, response: String },
    Fallback,
}

/// Stateless router; each turn is resolved independently
#[derive(Debug, Clone)]
pub struct QueryRouter {
    entities: RecognizedEntities,
    rules: Vec<IntentRule>,
}

impl QueryRouter {
    pub fn new(entities: RecognizedEntities) -> Self {
        Self {
            entities,
            rules: default_rules(),
        }
    }

    pub fn route(&self, input: &str, kb: &dyn FactQuery) -> Resolution {
        let lowered = input.to_lowercase();

        for rule in &self.rules {
            if !(rule.matches)(&lowered, &self.entities) {
                continue;
            }

            info!("Input matched intent {}", rule.intent.label());
            if let Some(response) = (rule.handle)(&lowered, &self.entities, kb) {
                return Resolution::Answered {
                    intent: rule.intent,
                    response,
                };
            }
            debug!("Intent {} had no data, passing on", rule.intent.label());
        }

        Resolution::Fallback
    }
}

impl Default for QueryRouter {
    fn default() -> Self {
        Self::new(RecognizedEntities::default())
    }
}
