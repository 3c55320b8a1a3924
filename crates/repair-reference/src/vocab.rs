//! Closed vocabularies for categorical fields.

use std::collections::BTreeMap;

/// Creates a compact key by keeping only uppercase alphanumeric characters.
fn compact_key(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

/// A closed set of accepted values plus synonym spellings.
///
/// Matching is lenient: case and non-alphanumeric characters are ignored,
/// so "male." resolves to "Male" without a synonym entry.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    label: String,
    values: Vec<String>,
    synonyms: BTreeMap<String, String>,
}

impl Vocabulary {
    pub fn new(label: impl Into<String>, values: &[&str]) -> Self {
        Self {
            label: label.into(),
            values: values.iter().map(|value| (*value).to_string()).collect(),
            synonyms: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_synonym(mut self, raw: &str, canonical: &str) -> Self {
        debug_assert!(self.values.iter().any(|value| value == canonical));
        self.synonyms
            .insert(compact_key(raw), canonical.to_string());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Resolve a raw value to its canonical vocabulary entry.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let key = compact_key(raw);
        if key.is_empty() {
            return None;
        }
        if let Some(value) = self.values.iter().find(|value| compact_key(value) == key) {
            return Some(value.as_str());
        }
        self.synonyms.get(&key).map(String::as_str)
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.resolve(raw).is_some()
    }
}

pub fn genders() -> Vocabulary {
    Vocabulary::new("gender", &["Male", "Female", "Other"])
        .with_synonym("M", "Male")
        .with_synonym("F", "Female")
}

pub fn marital_statuses() -> Vocabulary {
    Vocabulary::new(
        "marital_status",
        &["Single", "Married", "Divorced", "Widowed"],
    )
    .with_synonym("Widow", "Widowed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_lenient_and_synonym_spellings() {
        let genders = genders();
        assert_eq!(genders.resolve("MALE"), Some("Male"));
        assert_eq!(genders.resolve(" female."), Some("Female"));
        assert_eq!(genders.resolve("m"), Some("Male"));
        assert_eq!(genders.resolve("nonbinary"), None);
        assert_eq!(genders.resolve("  "), None);
    }

    #[test]
    fn marital_statuses_accept_widow_spelling() {
        let statuses = marital_statuses();
        assert_eq!(statuses.resolve("widow"), Some("Widowed"));
        assert_eq!(statuses.resolve("married"), Some("Married"));
        assert!(!statuses.contains("engaged"));
    }
}
