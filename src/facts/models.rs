//! Data models for the fact store

use std::fmt;

/// A single atom inside a fact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    /// Bare symbol, e.g. `Education-Loan`
    Symbol(String),
    /// Double-quoted string, stored without quotes
    Str(String),
    /// Nested expression
    Expr(Vec<Atom>),
}

impl Atom {
    pub fn symbol(name: impl Into<String>) -> Self {
        Atom::Symbol(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Atom::Str(value.into())
    }

    /// Value as presented to users: strings lose their quotes
    pub fn value(&self) -> String {
        match self {
            Atom::Symbol(s) | Atom::Str(s) => s.clone(),
            Atom::Expr(_) => self.to_string(),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Symbol(s) => write!(f, "{}", s),
            Atom::Str(s) => write!(f, "{:?}", s),
            Atom::Expr(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Immutable fact: an ordered tuple of atoms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub atoms: Vec<Atom>,
}

impl Fact {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    pub fn arity(&self) -> usize {
        self.atoms.len()
    }

    /// First atom, used as the store's index key
    pub fn head(&self) -> Option<&Atom> {
        self.atoms.first()
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Atom::Expr(self.atoms.clone()))
    }
}

/// Position inside a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Var(String),
    Const(Atom),
}

/// Fact pattern with free variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub terms: Vec<Term>,
}

impl Template {
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Variable names in order of first appearance
    pub fn variables(&self) -> Vec<&str> {
        let mut vars: Vec<&str> = Vec::new();
        for term in &self.terms {
            if let Term::Var(name) = term {
                if !vars.contains(&name.as_str()) {
                    vars.push(name);
                }
            }
        }
        vars
    }

    pub fn head(&self) -> Option<&Term> {
        self.terms.first()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match term {
                Term::Var(name) => write!(f, "${}", name)?,
                Term::Const(atom) => write!(f, "{}", atom)?,
            }
        }
        write!(f, ")")
    }
}

/// Bound values for one matching fact, in template variable order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub values: Vec<Atom>,
}

impl Row {
    /// First bound value as display text
    pub fn first(&self) -> Option<String> {
        self.values.first().map(Atom::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_atom_value_is_unquoted() {
        let atom = Atom::string("Acme Bank");
        assert_eq!(atom.value(), "Acme Bank");
        assert_eq!(atom.to_string(), "\"Acme Bank\"");
    }

    #[test]
    fn test_template_variables_deduplicated() {
        let template = Template::new(vec![
            Term::Var("x".to_string()),
            Term::Const(Atom::symbol("Knows")),
            Term::Var("x".to_string()),
            Term::Var("y".to_string()),
        ]);

        assert_eq!(template.variables(), vec!["x", "y"]);
        assert_eq!(template.to_string(), "($x Knows $x $y)");
    }

    #[test]
    fn test_fact_display() {
        let fact = Fact::new(vec![
            Atom::symbol("Lender"),
            Atom::symbol("L1"),
            Atom::symbol("Has-Name"),
            Atom::string("Acme Bank"),
        ]);
        assert_eq!(fact.to_string(), "(Lender L1 Has-Name \"Acme Bank\")");
        assert_eq!(fact.arity(), 4);
    }
}
