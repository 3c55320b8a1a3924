use std::fmt;

use serde::{Deserialize, Serialize};

/// Terminal state of a repair run.
///
/// `IssuesRemaining` is a reported status, not an error: the caller still
/// receives the best-effort dataset and the change log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConvergenceStatus {
    /// A detection pass found zero issues and zero duplicates.
    Converged,
    /// The iteration cap was reached with findings still open.
    IssuesRemaining,
}

impl ConvergenceStatus {
    pub fn is_converged(self) -> bool {
        matches!(self, Self::Converged)
    }
}

impl fmt::Display for ConvergenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Converged => "converged",
            Self::IssuesRemaining => "issues remaining",
        };
        f.write_str(text)
    }
}
