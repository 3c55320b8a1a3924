//! The seam to the external fill capability.

use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;

/// The non-missing fields of a row, handed to the provider as context for
/// one fill.
#[derive(Debug, Clone, Default)]
pub struct RowContext {
    pub fields: BTreeMap<String, String>,
}

impl RowContext {
    pub fn insert(&mut self, column: &str, value: String) {
        self.fields.insert(column.to_string(), value);
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Why a single fill produced nothing.
///
/// Every variant degrades identically: the field is left missing and the
/// pipeline moves on. A timeout is just a failure with a duration.
#[derive(Debug, Error)]
pub enum FillError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("fill failed: {0}")]
    Failed(String),
    #[error("fill timed out after {0:?}")]
    TimedOut(Duration),
}

/// External capability that proposes a value for one missing field.
///
/// Implementations may be slow or unavailable; callers treat both like a
/// per-call failure. `Ok(None)` means the provider had nothing plausible.
pub trait FillProvider {
    fn fill(&self, context: &RowContext, target_field: &str) -> Result<Option<String>, FillError>;

    fn name(&self) -> &str {
        "fill-provider"
    }
}

/// The stand-in used when no provider is configured (e.g. missing
/// credentials). Every call fails, which the engine absorbs per field.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableProvider;

impl FillProvider for UnavailableProvider {
    fn fill(
        &self,
        _context: &RowContext,
        _target_field: &str,
    ) -> Result<Option<String>, FillError> {
        Err(FillError::Unavailable("no provider configured".to_string()))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
