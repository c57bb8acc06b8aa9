//! Recognized entities: loan-type labels and known people
//!
//! These are closed sets searched for as substrings of the lowercased input.
//! Anything outside them is invisible to direct handling.

use serde::Deserialize;

/// A person with a profile in the knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonEntry {
    /// Lowercase substring searched for in the input
    pub keyword: String,
    /// Subject atom used in fact templates
    pub id: String,
}

impl PersonEntry {
    pub fn new(keyword: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            id: id.into(),
        }
    }
}

/// Recognized entity sets, ordered by match priority
#[derive(Debug, Clone, Deserialize)]
pub struct RecognizedEntities {
    #[serde(default = "default_loan_types")]
    pub loan_types: Vec<String>,

    #[serde(default = "default_people")]
    pub people: Vec<PersonEntry>,
}

fn default_loan_types() -> Vec<String> {
    [
        "education",
        "personal",
        "housing",
        "refugee",
        "disaster",
        "medical",
        "small business",
        "agricultural",
        "women empowerment",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_people() -> Vec<PersonEntry> {
    vec![PersonEntry::new("john", "John"), PersonEntry::new("mary", "Mary")]
}

impl Default for RecognizedEntities {
    fn default() -> Self {
        Self {
            loan_types: default_loan_types(),
            people: default_people(),
        }
    }
}

impl RecognizedEntities {
    /// First configured loan type whose label occurs in `lowered`
    pub fn find_loan_type(&self, lowered: &str) -> Option<LoanType> {
        self.loan_types
            .iter()
            .find(|label| lowered.contains(label.to_lowercase().as_str()))
            .map(|label| LoanType::from_label(label))
    }

    pub fn mentions_loan_type(&self, lowered: &str) -> bool {
        self.find_loan_type(lowered).is_some()
    }

    /// First configured person whose keyword occurs in `lowered`
    pub fn find_person(&self, lowered: &str) -> Option<&PersonEntry> {
        self.people
            .iter()
            .find(|p| lowered.contains(p.keyword.to_lowercase().as_str()))
    }
}

/// A recognized loan type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanType {
    /// Label as matched, lowercase (`small business`)
    pub label: String,
    /// Knowledge-base identifier (`Small-Business-Loan`)
    pub id: String,
}

impl LoanType {
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        let id = normalize_loan_label(&label);
        Self { label, id }
    }

    /// Title-cased label (`Small Business`)
    pub fn title(&self) -> String {
        title_case(&self.label, ' ')
    }

    /// Identifier with hyphens as spaces (`Small Business Loan`)
    pub fn display_name(&self) -> String {
        self.id.replace("-Loan", " Loan").replace('-', " ")
    }
}

/// Map a free-text label to its knowledge-base identifier:
/// lowercase, spaces to hyphens, title-case each hyphen-delimited word,
/// then append `-Loan` unless already present.
pub fn normalize_loan_label(label: &str) -> String {
    let hyphenated = label.trim().to_lowercase().replace(' ', "-");
    let mut id = title_case(&hyphenated, '-');
    if !id.ends_with("-Loan") {
        id.push_str("-Loan");
    }
    id
}

fn title_case(text: &str, sep: char) -> String {
    text.split(sep)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(&sep.to_string())
}
