use std::collections::HashSet;

use tracing::debug;

use repair_model::{Dataset, IssueKind, IssueReport, RepairOptions, Row, fields};
use repair_reference::ReferenceLibrary;

use crate::rules;

/// Scan a dataset and report every finding.
///
/// Never mutates and never fails: malformed cells are findings, not
/// errors. An empty report signals convergence.
pub fn detect(
    dataset: &Dataset,
    library: &ReferenceLibrary,
    options: &RepairOptions,
) -> IssueReport {
    let mut report = IssueReport::default();
    let recognized: Vec<&String> = dataset
        .columns
        .iter()
        .filter(|column| fields::is_recognized(column))
        .collect();

    for row in &dataset.rows {
        for column in &recognized {
            let cell = row.get(column);
            if cell.is_missing() {
                report.flag(row.id, column, IssueKind::Missing);
                continue;
            }
            for kind in rules::cell_issues(column, cell, library, options.fuzzy_match_threshold) {
                report.flag(row.id, column, kind);
            }
        }
    }

    detect_duplicates(dataset, &mut report);

    debug!(
        cell_issues = report.cell_issue_count(),
        duplicate_rows = report.duplicates.len(),
        "detection pass complete"
    );
    report
}

/// Hash-group rows by normalized key; the first occurrence is canonical,
/// all later occurrences are flagged.
fn detect_duplicates(dataset: &Dataset, report: &mut IssueReport) {
    let mut seen: HashSet<String> = HashSet::with_capacity(dataset.rows.len());
    for row in &dataset.rows {
        let key = normalized_row_key(&dataset.columns, row);
        if key.chars().all(|ch| ch == '|') {
            continue;
        }
        if !seen.insert(key) {
            report.duplicates.insert(row.id);
        }
    }
}

fn normalized_row_key(columns: &[String], row: &Row) -> String {
    let mut key = String::new();
    for (idx, column) in columns.iter().enumerate() {
        if idx > 0 {
            key.push('|');
        }
        let rendered = row.get(column).render();
        let normalized = rendered
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        key.push_str(&normalized);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use repair_model::{CellValue, RowId};

    fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
        let mut dataset = Dataset::new(columns.iter().map(|c| (*c).to_string()).collect());
        for (idx, values) in rows.iter().enumerate() {
            let mut row = Row::new(RowId::derive("test.csv", (idx as u64) + 1));
            for (column, value) in columns.iter().zip(values.iter()) {
                row.set(column, CellValue::parse(value));
            }
            dataset.push_row(row);
        }
        dataset
    }

    #[test]
    fn clean_dataset_reports_clean() {
        let data = dataset(
            &["first_name", "email", "age", "country"],
            &[
                &["John", "john@example.com", "45", "Germany"],
                &["Jane", "jane@example.com", "30", "France"],
            ],
        );
        let report = detect(&data, &ReferenceLibrary::builtin(), &RepairOptions::default());
        assert!(report.is_clean());
    }

    #[test]
    fn findings_cover_every_rule_family() {
        let data = dataset(
            &["first_name", "email", "phone", "gender", "age", "loyalty_points", "country"],
            &[&["john doe", "not-an-email", "12345678", "unknown", "-4", "-10", "Grmany"]],
        );
        let report = detect(&data, &ReferenceLibrary::builtin(), &RepairOptions::default());
        let row = data.rows[0].id;
        assert!(report.has(row, "first_name", IssueKind::Malformed));
        assert!(report.has(row, "email", IssueKind::Malformed));
        assert!(report.has(row, "phone", IssueKind::Malformed));
        assert!(report.has(row, "gender", IssueKind::Malformed));
        assert!(report.has(row, "age", IssueKind::Implausible));
        assert!(report.has(row, "loyalty_points", IssueKind::Implausible));
        assert!(report.has(row, "country", IssueKind::NonCanonical));
    }

    #[test]
    fn missing_cells_are_findings_not_failures() {
        let data = dataset(&["email", "age"], &[&["", ""]]);
        let report = detect(&data, &ReferenceLibrary::builtin(), &RepairOptions::default());
        let row = data.rows[0].id;
        assert!(report.has(row, "email", IssueKind::Missing));
        assert!(report.has(row, "age", IssueKind::Missing));
        assert_eq!(report.cell_issue_count(), 2);
    }

    #[test]
    fn unrecognized_columns_pass_through() {
        let data = dataset(&["internal_code"], &[&["###not clean###"], &[""]]);
        let report = detect(&data, &ReferenceLibrary::builtin(), &RepairOptions::default());
        assert!(report.is_clean());
    }

    #[test]
    fn duplicate_rule_flags_only_the_later_occurrence() {
        let data = dataset(
            &["first_name", "country"],
            &[
                &["John", "Germany"],
                &["  JOHN ", "germany"],
                &["Jane", "France"],
            ],
        );
        let report = detect(&data, &ReferenceLibrary::builtin(), &RepairOptions::default());
        assert_eq!(report.duplicates.len(), 1);
        assert!(report.duplicates.contains(&data.rows[1].id));
        assert!(!report.duplicates.contains(&data.rows[0].id));
    }

    #[test]
    fn unmatchable_country_is_implausible_not_guessed() {
        let data = dataset(&["country"], &[&["Xyzzyx"]]);
        let report = detect(&data, &ReferenceLibrary::builtin(), &RepairOptions::default());
        assert!(report.has(data.rows[0].id, "country", IssueKind::Implausible));
    }
}
