//! Eligibility check of a known person against a loan type's requirements

use super::entities::LoanType;
use crate::facts::{FactQuery, ProfileAttribute, QueryKind, Requirement};
use std::fmt;
use tracing::debug;

/// A numeric fact value, keeping the stored text for display
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub raw: String,
    pub value: f64,
}

impl Measure {
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self {
            raw: raw.to_string(),
            value,
        })
    }

    pub fn from_value(value: f64) -> Self {
        Self {
            raw: value.to_string(),
            value,
        }
    }
}

/// Borrower profile
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub credit_score: Measure,
    pub income: Measure,
    pub age: Measure,
}

/// Loan-type thresholds; age is an upper bound, the others lower bounds
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequirements {
    pub min_credit_score: Measure,
    pub min_income: Measure,
    pub max_age: Measure,
}

/// Per-criterion outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub meets_credit: bool,
    pub meets_income: bool,
    pub meets_age: bool,
}

impl Verdict {
    pub fn eligible(&self) -> bool {
        self.meets_credit && self.meets_income && self.meets_age
    }
}

pub fn evaluate(profile: &Profile, requirements: &LoanRequirements) -> Verdict {
    Verdict {
        meets_credit: profile.credit_score.value >= requirements.min_credit_score.value,
        meets_income: profile.income.value >= requirements.min_income.value,
        meets_age: profile.age.value <= requirements.max_age.value,
    }
}

/// Full eligibility outcome, rendered as the user-facing report
#[derive(Debug, Clone)]
pub struct EligibilityReport {
    pub person: String,
    pub loan: LoanType,
    pub profile: Profile,
    pub requirements: LoanRequirements,
    pub verdict: Verdict,
}

impl EligibilityReport {
    /// Run the six lookups and evaluate. Any missing or non-numeric value
    /// yields `None`.
    pub fn lookup(kb: &dyn FactQuery, person: &str, loan: &LoanType) -> Option<Self> {
        let attr = |a: ProfileAttribute| {
            kb.query_single(&QueryKind::ProfileAttribute(person.to_string(), a))
        };
        let req = |r: Requirement| kb.query_single(&QueryKind::LoanRequirement(loan.id.clone(), r));

        let values = [
            attr(ProfileAttribute::CreditScore),
            attr(ProfileAttribute::Income),
            attr(ProfileAttribute::Age),
            req(Requirement::CreditScoreRequired),
            req(Requirement::MinIncome),
            req(Requirement::AgeLimit),
        ];

        let mut measures = Vec::with_capacity(values.len());
        for value in values {
            match value.as_deref().and_then(Measure::parse) {
                Some(m) => measures.push(m),
                None => {
                    debug!("Eligibility data incomplete for {} / {}", person, loan.id);
                    return None;
                }
            }
        }

        let mut it = measures.into_iter();
        let profile = Profile {
            credit_score: it.next()?,
            income: it.next()?,
            age: it.next()?,
        };
        let requirements = LoanRequirements {
            min_credit_score: it.next()?,
            min_income: it.next()?,
            max_age: it.next()?,
        };
        let verdict = evaluate(&profile, &requirements);

        Some(Self {
            person: person.to_string(),
            loan: loan.clone(),
            profile,
            requirements,
            verdict,
        })
    }
}

fn meets(ok: bool) -> &'static str {
    if ok {
        "Meets"
    } else {
        "Does not meet"
    }
}

impl fmt::Display for EligibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loan = self.loan.display_name();
        writeln!(f, "Eligibility check for {} and {}:", self.person, loan)?;
        writeln!(f)?;
        writeln!(f, "Profile:")?;
        writeln!(f, "- Credit Score: {}", self.profile.credit_score.raw)?;
        writeln!(f, "- Income: {}", self.profile.income.raw)?;
        writeln!(f, "- Age: {}", self.profile.age.raw)?;
        writeln!(f)?;
        writeln!(f, "Requirements:")?;
        writeln!(f, "- Required Credit Score: {}", self.requirements.min_credit_score.raw)?;
        writeln!(f, "- Minimum Income: {}", self.requirements.min_income.raw)?;
        writeln!(f, "- Maximum Age: {}", self.requirements.max_age.raw)?;
        writeln!(f)?;
        writeln!(f, "Results:")?;
        writeln!(f, "- Credit Score: {} requirement", meets(self.verdict.meets_credit))?;
        writeln!(f, "- Income: {} requirement", meets(self.verdict.meets_income))?;
        writeln!(f, "- Age: {} requirement", meets(self.verdict.meets_age))?;
        writeln!(f)?;
        let overall = if self.verdict.eligible() { "ELIGIBLE" } else { "NOT ELIGIBLE" };
        write!(f, "OVERALL: {} for {}", overall, loan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::FactStore;

    fn profile(credit: f64, income: f64, age: f64) -> Profile {
        Profile {
            credit_score: Measure::from_value(credit),
            income: Measure::from_value(income),
            age: Measure::from_value(age),
        }
    }

    fn requirements() -> LoanRequirements {
        LoanRequirements {
            min_credit_score: Measure::from_value(650.0),
            min_income: Measure::from_value(30000.0),
            max_age: Measure::from_value(60.0),
        }
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let verdict = evaluate(&profile(650.0, 30000.0, 60.0), &requirements());
        assert!(verdict.eligible());
    }

    #[test]
    fn test_each_criterion_can_fail() {
        let req = requirements();
        assert!(!evaluate(&profile(649.0, 50000.0, 30.0), &req).meets_credit);
        assert!(!evaluate(&profile(700.0, 29999.0, 30.0), &req).meets_income);
        assert!(!evaluate(&profile(700.0, 50000.0, 61.0), &req).meets_age);
    }

    #[test]
    fn test_verdict_is_monotonic() {
        let req = requirements();
        let base = profile(700.0, 40000.0, 40.0);
        assert!(evaluate(&base, &req).eligible());

        for step in [1.0, 10.0, 100.0, 10000.0] {
            let better_credit = profile(700.0 + step, 40000.0, 40.0);
            let better_income = profile(700.0, 40000.0 + step, 40.0);
            let younger = profile(700.0, 40000.0, (40.0 - step).max(0.0));
            assert!(evaluate(&better_credit, &req).eligible());
            assert!(evaluate(&better_income, &req).eligible());
            assert!(evaluate(&younger, &req).eligible());
        }
    }

    #[test]
    fn test_measure_parse() {
        assert_eq!(Measure::parse("620").unwrap().value, 620.0);
        assert_eq!(Measure::parse(" 45000.5 ").unwrap().value, 45000.5);
        assert!(Measure::parse("high").is_none());
        assert!(Measure::parse("NaN").is_none());
    }

    #[test]
    fn test_lookup_and_render() {
        let store = FactStore::from_source(
            r#"
            (John Has-CreditScore 620)
            (John Has-Income 50000)
            (John Has-Age 30)
            (Loan-Types Personal-Loan Has-CreditScoreRequired 650)
            (Loan-Types Personal-Loan Has-MinIncome 25000)
            (Loan-Types Personal-Loan Has-AgeLimit 65)
            "#,
        )
        .unwrap();

        let loan = LoanType::from_label("personal");
        let report = EligibilityReport::lookup(&store, "John", &loan).unwrap();
        let text = report.to_string();

        assert!(text.starts_with("Eligibility check for John and Personal Loan:\n\nProfile:\n"));
        assert!(text.contains("- Credit Score: Does not meet requirement\n"));
        assert!(text.contains("- Income: Meets requirement\n"));
        assert!(text.contains("- Age: Meets requirement\n"));
        assert!(text.ends_with("OVERALL: NOT ELIGIBLE for Personal Loan"));
    }

    #[test]
    fn test_non_numeric_value_is_treated_as_missing() {
        let store = FactStore::from_source(
            r#"
            (Mary Has-CreditScore "excellent")
            (Mary Has-Income 50000)
            (Mary Has-Age 30)
            (Loan-Types Housing-Loan Has-CreditScoreRequired 650)
            (Loan-Types Housing-Loan Has-MinIncome 25000)
            (Loan-Types Housing-Loan Has-AgeLimit 65)
            "#,
        )
        .unwrap();

        let loan = LoanType::from_label("housing");
        assert!(EligibilityReport::lookup(&store, "Mary", &loan).is_none());
    }
}
