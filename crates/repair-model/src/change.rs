use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CellValue, RowId};

/// Pseudo-column of whole-row change records (deduplication).
pub const ROW_COLUMN: &str = "(row)";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Corrected,
    Deduplicated,
    Enriched,
    Derived,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Corrected => "corrected",
            Self::Deduplicated => "deduplicated",
            Self::Enriched => "enriched",
            Self::Derived => "derived",
        };
        f.write_str(text)
    }
}

/// An atomic, logged description of one value mutation.
///
/// Independently meaningful: replay-inspecting a single record needs no
/// other context than the row id it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub row_id: RowId,
    pub column: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub action: ActionKind,
}

impl ChangeRecord {
    pub fn corrected(row_id: RowId, column: &str, old: &CellValue, new: &CellValue) -> Self {
        Self {
            row_id,
            column: column.to_string(),
            old_value: render_opt(old),
            new_value: render_opt(new),
            action: ActionKind::Corrected,
        }
    }

    /// Old value is the full row snapshot; new value is absent.
    pub fn deduplicated(row_id: RowId, snapshot: String) -> Self {
        Self {
            row_id,
            column: ROW_COLUMN.to_string(),
            old_value: Some(snapshot),
            new_value: None,
            action: ActionKind::Deduplicated,
        }
    }

    pub fn enriched(row_id: RowId, column: &str, new: &CellValue) -> Self {
        Self {
            row_id,
            column: column.to_string(),
            old_value: None,
            new_value: render_opt(new),
            action: ActionKind::Enriched,
        }
    }

    pub fn derived(row_id: RowId, column: &str, new: &CellValue) -> Self {
        Self {
            row_id,
            column: column.to_string(),
            old_value: None,
            new_value: render_opt(new),
            action: ActionKind::Derived,
        }
    }
}

fn render_opt(value: &CellValue) -> Option<String> {
    if value.is_missing() {
        None
    } else {
        Some(value.render())
    }
}

/// Change records of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassChanges {
    pub pass: u32,
    pub records: Vec<ChangeRecord>,
}

/// Append-only collector threaded through the run by the orchestrator.
///
/// Engines return their records; the orchestrator files them under the
/// current pass. Rendering to text happens once, at the end of the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeLog {
    pub passes: Vec<PassChanges>,
}

impl ChangeLog {
    /// File records under a pass, merging with an existing entry for the
    /// same pass (correction and enrichment share one pass number).
    pub fn append(&mut self, pass: u32, records: Vec<ChangeRecord>) {
        if records.is_empty() {
            return;
        }
        if let Some(existing) = self.passes.iter_mut().find(|entry| entry.pass == pass) {
            existing.records.extend(records);
        } else {
            self.passes.push(PassChanges { pass, records });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.passes.iter().map(|entry| entry.records.len()).sum()
    }

    pub fn records(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.passes.iter().flat_map(|entry| entry.records.iter())
    }

    pub fn counts_by_action(&self) -> BTreeMap<ActionKind, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records() {
            *counts.entry(record.action).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_merges_same_pass_and_skips_empty_batches() {
        let row = RowId::derive("t.csv", 1);
        let mut log = ChangeLog::default();
        log.append(1, Vec::new());
        assert!(log.is_empty());

        log.append(
            1,
            vec![ChangeRecord::corrected(
                row,
                "age",
                &CellValue::Number(130.0),
                &CellValue::Missing,
            )],
        );
        log.append(1, vec![ChangeRecord::enriched(row, "email", &CellValue::Text("a@b.io".into()))]);

        assert_eq!(log.passes.len(), 1);
        assert_eq!(log.total_records(), 2);
        assert_eq!(log.counts_by_action()[&ActionKind::Corrected], 1);
    }
}
