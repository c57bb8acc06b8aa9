//! Loan advisor
//!
//! Answers loan questions from a small fact store of lenders, loan types and
//! borrower profiles, and hands anything else to a generative completion
//! backend.

pub mod advisor;
pub mod calculator;
pub mod completion;
pub mod config;
pub mod error;
pub mod facts;
pub mod metrics;
pub mod router;

pub use advisor::LoanAdvisor;
pub use config::AdvisorConfig;
pub use error::{AdvisorError, Result};
