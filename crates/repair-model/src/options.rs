//! Configuration for a repair run.

use serde::{Deserialize, Serialize};

/// Options controlling the convergence loop and matching policy.
///
/// The thresholds are deliberately configuration, not hidden heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairOptions {
    /// Maximum detect/correct/enrich cycles before giving up.
    pub max_iterations: u32,

    /// Minimum Jaro-Winkler similarity for a canonical country/city
    /// candidate to be accepted as a correction.
    pub fuzzy_match_threshold: f64,

    /// Loyalty-points threshold for the derived `is_loyal_customer` column.
    pub loyalty_threshold: f64,
}

pub const DEFAULT_MAX_ITERATIONS: u32 = 3;
pub const DEFAULT_FUZZY_MATCH_THRESHOLD: f64 = 0.80;
pub const DEFAULT_LOYALTY_THRESHOLD: f64 = 500.0;

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            fuzzy_match_threshold: DEFAULT_FUZZY_MATCH_THRESHOLD,
            loyalty_threshold: DEFAULT_LOYALTY_THRESHOLD,
        }
    }
}

impl RepairOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn with_fuzzy_match_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_match_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_loyalty_threshold(mut self, threshold: f64) -> Self {
        self.loyalty_threshold = threshold;
        self
    }
}
