//! Intent rules: ordered (predicate, handler) pairs
//!
//! A rule fires when its predicate matches the lowercased input. A handler
//! returning `None` passes the turn on to the next rule.

use super::eligibility::EligibilityReport;
use super::entities::RecognizedEntities;
use crate::facts::{FactQuery, QueryKind};
use tracing::debug;

/// Directly answerable intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    LenderLookup,
    InterestRate,
    Eligibility,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::LenderLookup => "lender_lookup",
            Intent::InterestRate => "interest_rate",
            Intent::Eligibility => "eligibility",
        }
    }
}

pub type Predicate = fn(&str, &RecognizedEntities) -> bool;
pub type Handler = fn(&str, &RecognizedEntities, &dyn FactQuery) -> Option<String>;

/// One entry of the routing table
#[derive(Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub matches: Predicate,
    pub handle: Handler,
}

impl std::fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRule").field("intent", &self.intent).finish()
    }
}

/// Built-in rules in priority order
pub fn default_rules() -> Vec<IntentRule> {
    vec![
        IntentRule {
            intent: Intent::LenderLookup,
            matches: is_lender_query,
            handle: answer_lenders,
        },
        IntentRule {
            intent: Intent::InterestRate,
            matches: is_rate_query,
            handle: answer_rate,
        },
        IntentRule {
            intent: Intent::Eligibility,
            matches: is_eligibility_query,
            handle: answer_eligibility,
        },
    ]
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(*n))
}

pub fn is_lender_query(lowered: &str, entities: &RecognizedEntities) -> bool {
    contains_any(lowered, &["which lender", "what lender"])
        && contains_any(lowered, &["offer", "provide"])
        && entities.mentions_loan_type(lowered)
}

pub fn is_rate_query(lowered: &str, entities: &RecognizedEntities) -> bool {
    lowered.contains("interest rate") && entities.mentions_loan_type(lowered)
}

pub fn is_eligibility_query(lowered: &str, _entities: &RecognizedEntities) -> bool {
    contains_any(lowered, &["eligible", "qualify"])
}

fn answer_lenders(lowered: &str, entities: &RecognizedEntities, kb: &dyn FactQuery) -> Option<String> {
    let loan = entities.find_loan_type(lowered)?;
    let rows = kb.query(&QueryKind::LendersOffering(loan.id.clone()));

    let names: Vec<String> = rows
        .iter()
        .filter_map(|row| row.values.first())
        .map(|lender| {
            kb.query_single(&QueryKind::LenderName(lender.clone()))
                .unwrap_or_else(|| lender.value().replace('-', " "))
        })
        .collect();

    if names.is_empty() {
        return Some(format!(
            "Sorry, I couldn't find any lenders offering {} Loans in our database.",
            loan.title()
        ));
    }

    Some(format!(
        "The following lenders offer {} Loans: {}.",
        loan.title(),
        names.join(", ")
    ))
}

fn answer_rate(lowered: &str, entities: &RecognizedEntities, kb: &dyn FactQuery) -> Option<String> {
    let loan = entities.find_loan_type(lowered)?;
    let rate = kb.query_single(&QueryKind::InterestRate(loan.id.clone()));
    if rate.is_none() {
        debug!("No interest rate fact for {}", loan.id);
    }
    rate.map(|rate| format!("The interest rate for {} Loans is {}.", loan.title(), rate))
}

fn answer_eligibility(lowered: &str, entities: &RecognizedEntities, kb: &dyn FactQuery) -> Option<String> {
    let person = entities.find_person(lowered)?;
    let loan = entities.find_loan_type(lowered)?;
    EligibilityReport::lookup(kb, &person.id, &loan).map(|report| report.to_string())
}
