//! Fact store for the loan knowledge base
//!
//! Loads a static S-expression resource once at startup and answers
//! template queries against it:
//! - facts are immutable tuples of atoms
//! - templates carry `$variables`; matching returns one row per fact
//! - the router talks to the store only through [`FactQuery`]

pub mod models;
pub mod parser;
pub mod query;
pub mod store;

pub use models::{Atom, Fact, Row, Template, Term};
pub use parser::{parse_facts, parse_template};
pub use query::{FactQuery, ProfileAttribute, QueryKind, Requirement};
pub use store::{FactStore, FactStoreConfig};
