//! Loan affordability calculator
//!
//! Caps the monthly instalment (EMI) at 40% of disposable income and
//! discounts it over the tenure to the largest principal that instalment
//! can service.

use std::fmt;
use thiserror::Error;

/// Share of disposable monthly income available for an instalment
pub const EMI_INCOME_SHARE: f64 = 0.4;

#[derive(Debug, Error, PartialEq)]
pub enum CalculatorError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Monthly expenses leave no income for an instalment")]
    NoDisposableIncome,
}

/// Calculator inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordabilityInput {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    /// Annual interest rate in percent
    pub annual_rate: f64,
    pub tenure_years: f64,
}

/// Calculator result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affordability {
    pub max_emi: f64,
    pub loan_amount: f64,
}

impl AffordabilityInput {
    fn validate(&self) -> Result<(), CalculatorError> {
        let fields = [
            self.monthly_income,
            self.monthly_expenses,
            self.annual_rate,
            self.tenure_years,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(CalculatorError::InvalidInput("all values must be numbers"));
        }
        if fields.iter().any(|v| *v < 0.0) {
            return Err(CalculatorError::InvalidInput("values cannot be negative"));
        }
        if self.tenure_years == 0.0 {
            return Err(CalculatorError::InvalidInput("tenure must be greater than zero"));
        }
        if self.monthly_income <= self.monthly_expenses {
            return Err(CalculatorError::NoDisposableIncome);
        }
        Ok(())
    }
}

pub fn affordability(input: &AffordabilityInput) -> Result<Affordability, CalculatorError> {
    input.validate()?;

    let max_emi = (input.monthly_income - input.monthly_expenses) * EMI_INCOME_SHARE;
    let r = input.annual_rate / 12.0 / 100.0;
    let n = input.tenure_years * 12.0;

    let loan_amount = if r == 0.0 {
        max_emi * n
    } else {
        let growth = (1.0 + r).powf(n);
        max_emi * (growth - 1.0) / (r * growth)
    };

    Ok(Affordability {
        max_emi,
        loan_amount,
    })
}

impl fmt::Display for Affordability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Max EMI: {:.2}/month", self.max_emi)?;
        write!(f, "Loan You Can Afford: {:.2}", self.loan_amount)
    }
}
