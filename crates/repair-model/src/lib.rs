pub mod change;
pub mod fields;
pub mod ids;
pub mod issue;
pub mod options;
pub mod status;
pub mod table;

pub use change::{ActionKind, ChangeLog, ChangeRecord, PassChanges, ROW_COLUMN};
pub use ids::RowId;
pub use issue::{CellIssue, IssueKind, IssueReport};
pub use options::RepairOptions;
pub use status::ConvergenceStatus;
pub use table::{CellValue, Dataset, Row};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_report_counts() {
        let row = RowId::derive("customers.csv", 1);
        let mut report = IssueReport::default();
        report.flag(row, fields::EMAIL, IssueKind::Malformed);
        report.flag(row, fields::AGE, IssueKind::Implausible);
        report.duplicates.insert(RowId::derive("customers.csv", 2));

        assert_eq!(report.cell_issue_count(), 2);
        assert!(!report.is_clean());
        assert!(report.has(row, fields::EMAIL, IssueKind::Malformed));
        assert!(!report.has(row, fields::EMAIL, IssueKind::Missing));
    }

    #[test]
    fn change_record_serializes() {
        let record = ChangeRecord::corrected(
            RowId::derive("customers.csv", 4),
            fields::COUNTRY,
            &CellValue::Text("Grmany".to_string()),
            &CellValue::Text("Germany".to_string()),
        );
        let json = serde_json::to_string(&record).expect("serialize record");
        let round: ChangeRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round.column, "country");
        assert_eq!(round.action, ActionKind::Corrected);
        assert_eq!(round.new_value.as_deref(), Some("Germany"));
    }
}
