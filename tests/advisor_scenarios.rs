//! End-to-end scenarios for the loan advisor
//!
//! The fact store is built in memory and the completion backend is a
//! recording stub, so every turn can be checked for whether it reached the
//! fallback path.

use async_trait::async_trait;
use loan_advisor::completion::{CompletionBackend, CompletionError};
use loan_advisor::facts::FactStore;
use loan_advisor::router::{normalize_loan_label, QueryRouter, RecognizedEntities};
use loan_advisor::LoanAdvisor;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingBackend {
    prompts: Mutex<Vec<String>>,
}

impl RecordingBackend {
    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionBackend for RecordingBackend {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("general answer".to_string())
    }
}

const ELIGIBILITY_FACTS: &str = r#"
    (John Has-CreditScore 620)
    (John Has-Income 45000)
    (John Has-Age 34)
    (Loan-Types Personal-Loan Has-CreditScoreRequired 650)
    (Loan-Types Personal-Loan Has-MinIncome 30000)
    (Loan-Types Personal-Loan Has-AgeLimit 60)
"#;

fn advisor_with(source: &str) -> (LoanAdvisor, Arc<RecordingBackend>) {
    let store = FactStore::from_source(source).expect("valid fact source");
    let backend = Arc::new(RecordingBackend::default());
    let advisor = LoanAdvisor::new(QueryRouter::default(), Arc::new(store), backend.clone());
    (advisor, backend)
}

#[tokio::test]
async fn test_lender_lookup_resolves_names() {
    let (advisor, backend) = advisor_with(
        r#"
        (Lender L1 Offers Education-Loan)
        (Lender L1 Has-Name "Acme Bank")
        "#,
    );

    let reply = advisor.respond("Which lenders offer Education loans?").await;

    assert_eq!(reply, "The following lenders offer Education Loans: Acme Bank.");
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_lender_lookup_without_matches_says_so() {
    let (advisor, backend) = advisor_with("(Lender L1 Offers Housing-Loan)");

    let reply = advisor.respond("What lenders provide medical loans?").await;

    assert_eq!(
        reply,
        "Sorry, I couldn't find any lenders offering Medical Loans in our database."
    );
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_interest_rate_lookup() {
    let (advisor, backend) =
        advisor_with(r#"(Loan-Types Housing-Loan Has-InterestRate "6.5%")"#);

    let reply = advisor
        .respond("What is the interest rate for Housing loans?")
        .await;

    assert_eq!(reply, "The interest rate for Housing Loans is 6.5%.");
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_missing_interest_rate_falls_through() {
    let (advisor, backend) = advisor_with("(Lender L1 Offers Housing-Loan)");

    let reply = advisor
        .respond("What is the interest rate for refugee loans?")
        .await;

    assert_eq!(reply, "[General Info] general answer");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_john_not_eligible_for_personal_loan() {
    let (advisor, backend) = advisor_with(ELIGIBILITY_FACTS);

    let reply = advisor.respond("Is John eligible for a personal loan?").await;

    let expected = "\
Eligibility check for John and Personal Loan:

Profile:
- Credit Score: 620
- Income: 45000
- Age: 34

Requirements:
- Required Credit Score: 650
- Minimum Income: 30000
- Maximum Age: 60

Results:
- Credit Score: Does not meet requirement
- Income: Meets requirement
- Age: Meets requirement

OVERALL: NOT ELIGIBLE for Personal Loan";

    assert_eq!(reply, expected);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_any_single_missing_fact_falls_through() {
    let lines: Vec<&str> = ELIGIBILITY_FACTS
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    assert_eq!(lines.len(), 6);

    for skip in 0..lines.len() {
        let source: Vec<&str> = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, l)| *l)
            .collect();
        let (advisor, backend) = advisor_with(&source.join("\n"));

        let reply = advisor.respond("Does John qualify for a personal loan?").await;

        assert_eq!(reply, "[General Info] general answer", "missing fact #{skip}");
        assert_eq!(backend.calls(), 1);
    }
}

#[tokio::test]
async fn test_eligibility_without_person_falls_through() {
    let (advisor, backend) = advisor_with(ELIGIBILITY_FACTS);

    advisor.respond("Am I eligible for a personal loan?").await;

    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_unrelated_question_reaches_backend_verbatim() {
    let (advisor, backend) = advisor_with(ELIGIBILITY_FACTS);

    let reply = advisor.respond("What's the weather today?").await;

    assert_eq!(reply, "[General Info] general answer");
    let prompt = backend.last_prompt().unwrap();
    assert!(prompt.contains("**Question**: What's the weather today?"));
}

#[tokio::test]
async fn test_turns_are_independent() {
    let (advisor, backend) =
        advisor_with(r#"(Loan-Types Housing-Loan Has-InterestRate "6.5%")"#);

    let first = advisor.respond("interest rate for housing loans").await;
    let second = advisor.respond("interest rate for housing loans").await;

    assert_eq!(first, second);
    assert_eq!(backend.calls(), 0);
}

#[test]
fn test_normalization_idempotent_for_recognized_labels() {
    for label in RecognizedEntities::default().loan_types {
        let normalized = normalize_loan_label(&label);
        assert!(normalized.ends_with("-Loan"));
        assert_eq!(normalize_loan_label(&normalized), normalized);
    }
}
