use tracing::debug;

use repair_detect::rules;
use repair_model::{
    CellValue, ChangeRecord, Dataset, IssueKind, IssueReport, RepairOptions, fields,
};
use repair_reference::{ReferenceLibrary, ReferenceSet, best_match};

/// Apply every fix the issue report allows and return the advanced dataset
/// with one change record per mutation.
///
/// Rows without an issue entry are never touched. Unresolvable findings
/// produce no record; they stay visible through the next detection pass.
pub fn correct(
    dataset: Dataset,
    report: &IssueReport,
    library: &ReferenceLibrary,
    options: &RepairOptions,
) -> (Dataset, Vec<ChangeRecord>) {
    let mut dataset = dataset;
    let mut records = Vec::new();

    drop_duplicates(&mut dataset, report, &mut records);

    for (row_id, issues) in &report.cells {
        // Rows being removed as duplicates get no cell-level fixes.
        if report.duplicates.contains(row_id) {
            continue;
        }
        let Some(row) = dataset.row_mut(*row_id) else {
            continue;
        };
        for issue in issues {
            let old = row.get(&issue.column).clone();
            if old.is_missing() {
                // Missing cells are enrichment's responsibility.
                continue;
            }
            let Some(new) = fixed_value(&issue.column, issue.kind, &old, library, options)
            else {
                continue;
            };
            if new == old {
                continue;
            }
            row.set(&issue.column, new.clone());
            records.push(ChangeRecord::corrected(*row_id, &issue.column, &old, &new));
        }
    }

    debug!(changes = records.len(), "correction pass complete");
    (dataset, records)
}

/// Drop every row flagged as a duplicate, keeping first occurrences, and
/// log one record per dropped row with its full snapshot.
fn drop_duplicates(dataset: &mut Dataset, report: &IssueReport, records: &mut Vec<ChangeRecord>) {
    if report.duplicates.is_empty() {
        return;
    }
    let columns = dataset.columns.clone();
    let mut kept = Vec::with_capacity(dataset.rows.len());
    for row in std::mem::take(&mut dataset.rows) {
        if report.duplicates.contains(&row.id) {
            records.push(ChangeRecord::deduplicated(row.id, row.snapshot(&columns)));
        } else {
            kept.push(row);
        }
    }
    dataset.rows = kept;
}

/// The deterministic fix for one finding, or `None` when no safe fix
/// exists.
fn fixed_value(
    column: &str,
    kind: IssueKind,
    cell: &CellValue,
    library: &ReferenceLibrary,
    options: &RepairOptions,
) -> Option<CellValue> {
    match kind {
        IssueKind::Missing => None,
        IssueKind::NonCanonical => {
            let set = canonical_set(column, library)?;
            let matched = best_match(set, &cell.render())?;
            if matched.score >= options.fuzzy_match_threshold {
                Some(CellValue::Text(matched.canonical.to_string()))
            } else {
                None
            }
        }
        IssueKind::Implausible => match column {
            // Out-of-range ages are cleared, never clamped to a guess.
            fields::AGE => Some(CellValue::Missing),
            fields::LOYALTY_POINTS => Some(CellValue::Number(0.0)),
            _ => None,
        },
        IssueKind::Malformed => fixed_malformed(column, cell, library),
    }
}

fn fixed_malformed(
    column: &str,
    cell: &CellValue,
    library: &ReferenceLibrary,
) -> Option<CellValue> {
    let rendered = cell.render();
    match column {
        _ if fields::is_name_column(column) => {
            if rules::is_name_placeholder(&rendered) {
                Some(CellValue::Missing)
            } else {
                Some(CellValue::Text(rules::title_case(&rendered)))
            }
        }
        fields::GENDER => Some(resolve_vocab(&library.genders, &rendered)),
        fields::MARITAL_STATUS => Some(resolve_vocab(&library.marital_statuses, &rendered)),
        fields::PHONE => Some(fixed_phone(&rendered)),
        // No deterministic fix for a bad email, a non-integer age or a
        // non-numeric loyalty value: hand the cell to enrichment.
        fields::EMAIL | fields::AGE | fields::LOYALTY_POINTS => Some(CellValue::Missing),
        _ => None,
    }
}

fn resolve_vocab(vocab: &repair_reference::Vocabulary, rendered: &str) -> CellValue {
    match vocab.resolve(rendered) {
        Some(canonical) => CellValue::Text(canonical.to_string()),
        None => CellValue::Missing,
    }
}

fn fixed_phone(rendered: &str) -> CellValue {
    match rules::phone_digits(rendered).and_then(|digits| rules::format_phone(&digits)) {
        Some(formatted) => CellValue::Text(formatted),
        None => CellValue::Missing,
    }
}

fn canonical_set<'a>(column: &str, library: &'a ReferenceLibrary) -> Option<&'a ReferenceSet> {
    match column {
        fields::COUNTRY => Some(&library.countries),
        fields::CITY => Some(&library.cities),
        _ => None,
    }
}
