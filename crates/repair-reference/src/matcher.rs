//! Fuzzy matching of raw values against a canonical reference set.
//!
//! Pure function over an immutable set: no shared mutable state, safe for
//! concurrent callers. Jaro-Winkler on normalized keys.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler;

use crate::refset::{ReferenceSet, normalize_key};

/// The best canonical candidate for a raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch<'a> {
    pub canonical: &'a str,
    /// Similarity in 0.0..=1.0.
    pub score: f64,
}

/// Score a raw value against every entry of the set and return the best
/// candidate.
///
/// Ties break by shortest canonical name, then lexicographic order, so the
/// result never depends on the iteration order of the reference set.
/// Returns `None` only for empty input or an empty set; thresholding is
/// the caller's policy.
pub fn best_match<'a>(set: &'a ReferenceSet, raw: &str) -> Option<FuzzyMatch<'a>> {
    let key = normalize_key(raw);
    if key.is_empty() {
        return None;
    }
    let mut best: Option<FuzzyMatch<'a>> = None;
    for entry in set.entries() {
        let score = jaro_winkler::similarity(key.chars(), entry.key.chars());
        let candidate = FuzzyMatch {
            canonical: entry.canonical.as_str(),
            score,
        };
        best = Some(match best {
            None => candidate,
            Some(current) => pick(current, candidate),
        });
    }
    best
}

fn pick<'a>(current: FuzzyMatch<'a>, candidate: FuzzyMatch<'a>) -> FuzzyMatch<'a> {
    match candidate
        .score
        .partial_cmp(&current.score)
        .unwrap_or(Ordering::Equal)
    {
        Ordering::Greater => candidate,
        Ordering::Less => current,
        Ordering::Equal => {
            let by_length = candidate.canonical.len().cmp(&current.canonical.len());
            match by_length.then_with(|| candidate.canonical.cmp(current.canonical)) {
                Ordering::Less => candidate,
                _ => current,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> ReferenceSet {
        ReferenceSet::new("country", &["Germany", "France", "Georgia", "Greece"])
    }

    #[test]
    fn misspelling_matches_its_canonical_entry() {
        let set = countries();
        let matched = best_match(&set, "Grmany").expect("candidate");
        assert_eq!(matched.canonical, "Germany");
        assert!(matched.score >= 0.8, "score was {}", matched.score);
    }

    #[test]
    fn gibberish_scores_below_threshold() {
        let set = countries();
        let matched = best_match(&set, "Xyzzyx").expect("candidate");
        assert!(matched.score < 0.8, "score was {}", matched.score);
    }

    #[test]
    fn exact_value_scores_one() {
        let set = countries();
        let matched = best_match(&set, " germany ").expect("candidate");
        assert_eq!(matched.canonical, "Germany");
        assert!((matched.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_input_has_no_candidate() {
        let set = countries();
        assert!(best_match(&set, "   ").is_none());
    }

    #[test]
    fn tie_break_ignores_set_order() {
        let forward = ReferenceSet::new("t", &["Alpha", "Alphb"]);
        let backward = ReferenceSet::new("t", &["Alphb", "Alpha"]);
        let a = best_match(&forward, "Alphx").expect("candidate");
        let b = best_match(&backward, "Alphx").expect("candidate");
        assert_eq!(a.canonical, b.canonical);
        assert_eq!(a.canonical, "Alpha");
    }
}
