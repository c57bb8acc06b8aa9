//! Narrow query interface over the knowledge base
//!
//! The router only speaks in [`QueryKind`]s; how a kind becomes a template
//! and how the template is evaluated stays behind [`FactQuery`].

use super::models::{Atom, Row, Template, Term};
use super::store::FactStore;
use crate::metrics::METRICS;
use tracing::debug;

/// Profile attribute of a recognized person
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAttribute {
    CreditScore,
    Income,
    Age,
}

impl ProfileAttribute {
    pub fn relation(&self) -> &'static str {
        match self {
            ProfileAttribute::CreditScore => "Has-CreditScore",
            ProfileAttribute::Income => "Has-Income",
            ProfileAttribute::Age => "Has-Age",
        }
    }
}

/// Requirement threshold attached to a loan type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    CreditScoreRequired,
    MinIncome,
    AgeLimit,
}

impl Requirement {
    pub fn relation(&self) -> &'static str {
        match self {
            Requirement::CreditScoreRequired => "Has-CreditScoreRequired",
            Requirement::MinIncome => "Has-MinIncome",
            Requirement::AgeLimit => "Has-AgeLimit",
        }
    }
}

/// Template kinds the router may ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// `(Lender $lender Offers <loan>)`
    LendersOffering(String),
    /// `(Lender <lender> Has-Name $name)`; the lender atom as bound by
    /// [`QueryKind::LendersOffering`], so quoted ids keep their form
    LenderName(Atom),
    /// `(Loan-Types <loan> Has-InterestRate $rate)`
    InterestRate(String),
    /// `(<person> Has-<attr> $value)`
    ProfileAttribute(String, ProfileAttribute),
    /// `(Loan-Types <loan> Has-<req> $req)`
    LoanRequirement(String, Requirement),
}

fn var(name: &str) -> Term {
    Term::Var(name.to_string())
}

fn sym(name: &str) -> Term {
    Term::Const(Atom::symbol(name))
}

impl QueryKind {
    /// Short label used in logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            QueryKind::LendersOffering(_) => "lenders_offering",
            QueryKind::LenderName(_) => "lender_name",
            QueryKind::InterestRate(_) => "interest_rate",
            QueryKind::ProfileAttribute(..) => "profile_attribute",
            QueryKind::LoanRequirement(..) => "loan_requirement",
        }
    }

    pub fn template(&self) -> Template {
        let terms = match self {
            QueryKind::LendersOffering(loan) => {
                vec![sym("Lender"), var("lender"), sym("Offers"), sym(loan)]
            }
            QueryKind::LenderName(lender) => {
                vec![sym("Lender"), Term::Const(lender.clone()), sym("Has-Name"), var("name")]
            }
            QueryKind::InterestRate(loan) => {
                vec![sym("Loan-Types"), sym(loan), sym("Has-InterestRate"), var("rate")]
            }
            QueryKind::ProfileAttribute(person, attr) => {
                vec![sym(person), sym(attr.relation()), var("value")]
            }
            QueryKind::LoanRequirement(loan, req) => {
                vec![sym("Loan-Types"), sym(loan), sym(req.relation()), var("req")]
            }
        };
        Template::new(terms)
    }
}

/// Read-only knowledge base seam
pub trait FactQuery: Send + Sync {
    fn query(&self, kind: &QueryKind) -> Vec<Row>;

    /// First bound value of the first row, if any
    fn query_single(&self, kind: &QueryKind) -> Option<String> {
        self.query(kind).first().and_then(Row::first)
    }
}

impl FactQuery for FactStore {
    fn query(&self, kind: &QueryKind) -> Vec<Row> {
        let template = kind.template();
        debug!("Executing {} query: {}", kind.label(), template);

        let rows = self.match_template(&template);
        let outcome = if rows.is_empty() { "miss" } else { "hit" };
        METRICS
            .fact_queries
            .with_label_values(&[kind.label(), outcome])
            .inc();
        rows
    }
}
