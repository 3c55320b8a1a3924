//! Immutable canonical reference sets with precomputed match keys.

/// Normalize a value for comparison.
///
/// - Trims whitespace
/// - Converts to lowercase
/// - Replaces separators with spaces, collapsing runs
pub fn normalize_key(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['_', '-', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone)]
pub struct RefEntry {
    pub canonical: String,
    pub key: String,
}

/// An immutable set of accepted spellings for one semantic field, each
/// entry carrying its normalized match key.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    label: String,
    entries: Vec<RefEntry>,
}

impl ReferenceSet {
    pub fn new(label: impl Into<String>, values: &[&str]) -> Self {
        let entries = values
            .iter()
            .map(|value| RefEntry {
                canonical: (*value).to_string(),
                key: normalize_key(value),
            })
            .collect();
        Self {
            label: label.into(),
            entries,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entries(&self) -> &[RefEntry] {
        &self.entries
    }

    /// Exact lookup on the normalized key, returning the canonical spelling.
    pub fn resolve_exact(&self, raw: &str) -> Option<&str> {
        let key = normalize_key(raw);
        if key.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.canonical.as_str())
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.resolve_exact(raw).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_key_collapses_separators() {
        assert_eq!(normalize_key("  United   States "), "united states");
        assert_eq!(normalize_key("Timor-Leste"), "timor leste");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn resolve_exact_is_case_and_whitespace_insensitive() {
        let set = ReferenceSet::new("country", &["Germany", "United States"]);
        assert_eq!(set.resolve_exact("  gErMaNy "), Some("Germany"));
        assert_eq!(set.resolve_exact("united  states"), Some("United States"));
        assert_eq!(set.resolve_exact("Atlantis"), None);
        assert_eq!(set.resolve_exact("   "), None);
    }
}
