pub mod cities;
pub mod countries;
pub mod matcher;
pub mod refset;
pub mod vocab;

pub use cities::CANONICAL_CITIES;
pub use countries::CANONICAL_COUNTRIES;
pub use matcher::{FuzzyMatch, best_match};
pub use refset::{RefEntry, ReferenceSet, normalize_key};
pub use vocab::Vocabulary;

/// All reference data one repair run needs, built once and shared.
#[derive(Debug, Clone)]
pub struct ReferenceLibrary {
    pub countries: ReferenceSet,
    pub cities: ReferenceSet,
    pub genders: Vocabulary,
    pub marital_statuses: Vocabulary,
}

impl ReferenceLibrary {
    pub fn builtin() -> Self {
        Self {
            countries: ReferenceSet::new("country", &CANONICAL_COUNTRIES),
            cities: ReferenceSet::new("city", &CANONICAL_CITIES),
            genders: vocab::genders(),
            marital_statuses: vocab::marital_statuses(),
        }
    }
}

impl Default for ReferenceLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_library_covers_the_semantic_fields() {
        let library = ReferenceLibrary::builtin();
        assert!(library.countries.contains("Germany"));
        assert!(library.cities.contains("new york"));
        assert!(library.genders.contains("female"));
        assert!(library.marital_statuses.contains("Divorced"));
    }
}
