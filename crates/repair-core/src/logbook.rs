//! Renders the collected change records and open findings as the
//! append-only human-readable log.
//!
//! One serialization step at the end of a run: per pass a section per
//! action-kind, grouped by column, each line naming the affected row and
//! the old/new value pair (new value alone where nothing existed before).

use std::collections::BTreeMap;
use std::fmt::Write as _;

use repair_model::{ActionKind, ChangeLog, ChangeRecord, IssueReport};

pub fn render_change_log(log: &ChangeLog) -> String {
    if log.is_empty() {
        return "no changes recorded\n".to_string();
    }
    let mut out = String::new();
    for pass in &log.passes {
        let _ = writeln!(out, "=== pass {} ===", pass.pass);
        let mut grouped: BTreeMap<ActionKind, BTreeMap<&str, Vec<&ChangeRecord>>> =
            BTreeMap::new();
        for record in &pass.records {
            grouped
                .entry(record.action)
                .or_default()
                .entry(record.column.as_str())
                .or_default()
                .push(record);
        }
        for (action, columns) in grouped {
            let _ = writeln!(out, "{action}:");
            for (column, records) in columns {
                let _ = writeln!(out, "  {column}:");
                for record in records {
                    let _ = writeln!(out, "    {}", render_record(record));
                }
            }
        }
    }
    out
}

fn render_record(record: &ChangeRecord) -> String {
    let id = record.row_id.to_hex();
    match (&record.old_value, &record.new_value) {
        (Some(old), Some(new)) => format!("{id} '{old}' -> '{new}'"),
        (Some(old), None) => {
            if record.action == ActionKind::Deduplicated {
                format!("{id} '{old}' -> (removed)")
            } else {
                format!("{id} '{old}' -> (cleared)")
            }
        }
        (None, Some(new)) => format!("{id} -> '{new}'"),
        (None, None) => id,
    }
}

/// Render the findings still open at termination, grouped by column.
pub fn render_issue_report(report: &IssueReport) -> String {
    if report.is_clean() {
        return "no open findings\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "open findings:");
    for ((column, kind), rows) in report.grouped_by_column() {
        let ids: Vec<String> = rows.iter().map(|row| row.to_hex()).collect();
        let _ = writeln!(out, "  {column} ({kind}): {}", ids.join(", "));
    }
    if !report.duplicates.is_empty() {
        let ids: Vec<String> = report.duplicates.iter().map(|row| row.to_hex()).collect();
        let _ = writeln!(out, "  duplicate rows: {}", ids.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use repair_model::{CellValue, IssueKind, RowId};

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn renders_grouped_sections_per_pass() {
        let a = RowId::derive("log.csv", 1);
        let b = RowId::derive("log.csv", 2);
        let mut log = ChangeLog::default();
        log.append(
            1,
            vec![
                ChangeRecord::corrected(a, "country", &text("Grmany"), &text("Germany")),
                ChangeRecord::corrected(a, "first_name", &text("mia"), &text("Mia")),
                ChangeRecord::deduplicated(b, "first_name=Mia; country=Germany".to_string()),
            ],
        );
        log.append(2, vec![ChangeRecord::enriched(a, "email", &text("mia@example.com"))]);

        let rendered = render_change_log(&log);
        let mut settings = insta::Settings::clone_current();
        settings.add_filter(r"\b[0-9a-f]{32}\b", "[row-id]");
        settings.bind(|| {
            insta::assert_snapshot!(rendered, @r"
            === pass 1 ===
            corrected:
              country:
                [row-id] 'Grmany' -> 'Germany'
              first_name:
                [row-id] 'mia' -> 'Mia'
            deduplicated:
              (row):
                [row-id] 'first_name=Mia; country=Germany' -> (removed)
            === pass 2 ===
            enriched:
              email:
                [row-id] -> 'mia@example.com'
            ");
        });
    }

    #[test]
    fn cleared_cells_render_distinctly_from_removed_rows() {
        let a = RowId::derive("log.csv", 3);
        let record = ChangeRecord::corrected(a, "email", &text("not-an-email"), &CellValue::Missing);
        assert!(render_record(&record).ends_with("'not-an-email' -> (cleared)"));
    }

    #[test]
    fn empty_log_and_clean_report_render_placeholders() {
        assert_eq!(render_change_log(&ChangeLog::default()), "no changes recorded\n");
        assert_eq!(render_issue_report(&IssueReport::default()), "no open findings\n");
    }

    #[test]
    fn issue_report_groups_by_column() {
        let a = RowId::derive("log.csv", 4);
        let mut report = IssueReport::default();
        report.flag(a, "email", IssueKind::Missing);
        report.flag(a, "country", IssueKind::Implausible);
        let rendered = render_issue_report(&report);
        assert!(rendered.starts_with("open findings:\n"));
        assert!(rendered.contains("country (implausible):"));
        assert!(rendered.contains("email (missing):"));
    }
}
