//! In-memory fact store with template matching

use super::models::*;
use super::parser::{parse_facts, parse_template};
use crate::error::{AdvisorError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Fact store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FactStoreConfig {
    /// Path of the fact resource loaded at startup
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

fn default_path() -> PathBuf {
    PathBuf::from("db.metta")
}

impl Default for FactStoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

/// Read-only fact store
///
/// Facts are kept in load order; a head-atom index narrows the scan for
/// templates whose first position is a constant.
#[derive(Debug, Default)]
pub struct FactStore {
    facts: Vec<Fact>,
    by_head: HashMap<Atom, Vec<usize>>,
}

impl FactStore {
    /// Build a store from already-parsed facts
    pub fn from_facts(facts: Vec<Fact>) -> Self {
        let mut by_head: HashMap<Atom, Vec<usize>> = HashMap::new();
        for (idx, fact) in facts.iter().enumerate() {
            if let Some(head) = fact.head() {
                by_head.entry(head.clone()).or_default().push(idx);
            }
        }
        Self { facts, by_head }
    }

    /// Parse a fact resource held in memory
    pub fn from_source(source: &str) -> Result<Self> {
        let parsed = parse_facts(source)?;
        if parsed.skipped_directives > 0 {
            warn!("Skipped {} directive expressions in fact source", parsed.skipped_directives);
        }
        Ok(Self::from_facts(parsed.facts))
    }

    /// Load the fact resource from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| AdvisorError::FactSource {
            path: path.display().to_string(),
            source: e,
        })?;

        let store = Self::from_source(&source)?;
        info!("Loaded {} facts from {}", store.len(), path.display());
        Ok(store)
    }

    /// Load using configuration
    pub fn from_config(config: &FactStoreConfig) -> Result<Self> {
        Self::load(&config.path)
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Return one row per fact unifying with `template`, in load order.
    /// No match yields an empty vector.
    pub fn match_template(&self, template: &Template) -> Vec<Row> {
        let vars = template.variables();

        let candidates: Box<dyn Iterator<Item = &Fact>> = match template.head() {
            Some(Term::Const(head)) => match self.by_head.get(head) {
                Some(indices) => Box::new(indices.iter().map(|&i| &self.facts[i])),
                None => Box::new(std::iter::empty()),
            },
            _ => Box::new(self.facts.iter()),
        };

        let rows: Vec<Row> = candidates
            .filter_map(|fact| unify(template, fact))
            .map(|bindings| Row {
                values: vars
                    .iter()
                    .filter_map(|v| bindings.get(*v).map(|a| (*a).clone()))
                    .collect(),
            })
            .collect();

        debug!("Template {} matched {} facts", template, rows.len());
        rows
    }

    /// Parse and match a template given as text
    pub fn match_str(&self, template: &str) -> Result<Vec<Row>> {
        let template = parse_template(template)?;
        Ok(self.match_template(&template))
    }
}

fn unify<'f>(template: &'f Template, fact: &'f Fact) -> Option<HashMap<&'f str, &'f Atom>> {
    if template.terms.len() != fact.arity() {
        return None;
    }

    let mut bindings: HashMap<&str, &Atom> = HashMap::new();
    for (term, atom) in template.terms.iter().zip(&fact.atoms) {
        match term {
            Term::Const(expected) => {
                if expected != atom {
                    return None;
                }
            }
            Term::Var(name) => match bindings.get(name.as_str()).copied() {
                Some(bound) if bound != atom => return None,
                Some(_) => {}
                None => {
                    bindings.insert(name.as_str(), atom);
                }
            },
        }
    }

    Some(bindings)
}
