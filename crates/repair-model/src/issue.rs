use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RowId;

/// What a detection rule found wrong with a cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// Empty/null after whitespace trim.
    Missing,
    /// Fails the field-specific pattern or vocabulary check.
    Malformed,
    /// No exact canonical match, but a fuzzy candidate above threshold exists.
    NonCanonical,
    /// Outside the plausible range, or no canonical candidate scores above
    /// threshold; never auto-guessed.
    Implausible,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::NonCanonical => "non-canonical",
            Self::Implausible => "implausible",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIssue {
    pub column: String,
    pub kind: IssueKind,
}

/// Everything one detection pass found.
///
/// Supports row-level lookup (correction iterates rows) and
/// grouped-by-column rendering (the log groups findings per column). An
/// empty report signals convergence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueReport {
    pub cells: BTreeMap<RowId, BTreeSet<CellIssue>>,
    pub duplicates: BTreeSet<RowId>,
}

impl IssueReport {
    pub fn is_clean(&self) -> bool {
        self.cells.is_empty() && self.duplicates.is_empty()
    }

    pub fn flag(&mut self, row_id: RowId, column: &str, kind: IssueKind) {
        self.cells.entry(row_id).or_default().insert(CellIssue {
            column: column.to_string(),
            kind,
        });
    }

    pub fn issues_for(&self, row_id: RowId) -> Option<&BTreeSet<CellIssue>> {
        self.cells.get(&row_id)
    }

    pub fn has(&self, row_id: RowId, column: &str, kind: IssueKind) -> bool {
        self.cells.get(&row_id).is_some_and(|issues| {
            issues.contains(&CellIssue {
                column: column.to_string(),
                kind,
            })
        })
    }

    pub fn cell_issue_count(&self) -> usize {
        self.cells.values().map(BTreeSet::len).sum()
    }

    /// Findings regrouped as (column, kind) -> affected rows, in column
    /// order, for log rendering and the unresolved-issue summary.
    pub fn grouped_by_column(&self) -> BTreeMap<(String, IssueKind), Vec<RowId>> {
        let mut grouped: BTreeMap<(String, IssueKind), Vec<RowId>> = BTreeMap::new();
        for (row_id, issues) in &self.cells {
            for issue in issues {
                grouped
                    .entry((issue.column.clone(), issue.kind))
                    .or_default()
                    .push(*row_id);
            }
        }
        grouped
    }
}
