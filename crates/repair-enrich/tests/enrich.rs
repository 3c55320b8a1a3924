use repair_enrich::{FillError, FillProvider, RowContext, UnavailableProvider, enrich};
use repair_model::{ActionKind, CellValue, Dataset, RepairOptions, Row, RowId, fields};
use repair_reference::ReferenceLibrary;

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

/// Fails for the row named Five, answers for everyone else.
struct FlakyEmailProvider;

impl FillProvider for FlakyEmailProvider {
    fn fill(&self, context: &RowContext, target_field: &str) -> Result<Option<String>, FillError> {
        assert_eq!(target_field, fields::EMAIL);
        match context.get(fields::FIRST_NAME) {
            Some("Five") => Err(FillError::Failed("knowledge source said no".to_string())),
            Some(name) => Ok(Some(format!("{}@example.com", name.to_lowercase()))),
            None => Ok(None),
        }
    }
}

#[test]
fn one_rows_failure_does_not_block_the_next_rows_fill() {
    let data = dataset(
        &["first_name", "email", "loyalty_points"],
        &[&["Five", "", "10"], &["Six", "", "20"]],
    );
    let five = data.rows[0].id;
    let six = data.rows[1].id;
    let (after, records) = enrich(
        data,
        &ReferenceLibrary::builtin(),
        &FlakyEmailProvider,
        &RepairOptions::default(),
    );

    assert!(after.rows[0].get("email").is_missing());
    assert_eq!(
        after.rows[1].get("email"),
        &CellValue::Text("six@example.com".to_string())
    );
    let enriched: Vec<_> = records
        .iter()
        .filter(|r| r.action == ActionKind::Enriched)
        .collect();
    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].row_id, six);
    assert!(enriched.iter().all(|r| r.row_id != five));
}

struct StaticProvider(&'static str);

impl FillProvider for StaticProvider {
    fn fill(&self, _context: &RowContext, _target_field: &str) -> Result<Option<String>, FillError> {
        Ok(Some(self.0.to_string()))
    }
}

struct EmptyHandedProvider;

impl FillProvider for EmptyHandedProvider {
    fn fill(&self, _context: &RowContext, _target_field: &str) -> Result<Option<String>, FillError> {
        Ok(None)
    }
}

#[test]
fn unusable_fills_are_discarded_without_a_record() {
    let data = dataset(&["first_name", "email"], &[&["Mia", ""]]);
    let (after, records) = enrich(
        data,
        &ReferenceLibrary::builtin(),
        &StaticProvider("definitely not an email"),
        &RepairOptions::default(),
    );
    assert!(after.rows[0].get("email").is_missing());
    assert!(records.iter().all(|r| r.action != ActionKind::Enriched));
}

#[test]
fn empty_handed_provider_is_a_no_op_for_fills() {
    let data = dataset(&["first_name", "email"], &[&["Mia", ""]]);
    let (after, records) = enrich(
        data,
        &ReferenceLibrary::builtin(),
        &EmptyHandedProvider,
        &RepairOptions::default(),
    );
    assert!(after.rows[0].get("email").is_missing());
    assert!(records.iter().all(|r| r.action != ActionKind::Enriched));
}

struct SlowProvider;

impl FillProvider for SlowProvider {
    fn fill(&self, _context: &RowContext, _target_field: &str) -> Result<Option<String>, FillError> {
        Err(FillError::TimedOut(std::time::Duration::from_secs(30)))
    }
}

#[test]
fn timeouts_degrade_exactly_like_failures() {
    let data = dataset(&["first_name", "email"], &[&["Mia", ""]]);
    let (after, records) = enrich(
        data,
        &ReferenceLibrary::builtin(),
        &SlowProvider,
        &RepairOptions::default(),
    );
    assert!(after.rows[0].get("email").is_missing());
    assert!(records.iter().all(|r| r.action != ActionKind::Enriched));
}

#[test]
fn near_canonical_country_fill_is_canonicalized_on_the_way_in() {
    let data = dataset(&["first_name", "country"], &[&["Mia", ""]]);
    let (after, records) = enrich(
        data,
        &ReferenceLibrary::builtin(),
        &StaticProvider("germny"),
        &RepairOptions::default(),
    );
    assert_eq!(
        after.rows[0].get("country"),
        &CellValue::Text("Germany".to_string())
    );
    let enriched: Vec<_> = records
        .iter()
        .filter(|r| r.action == ActionKind::Enriched)
        .collect();
    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].new_value.as_deref(), Some("Germany"));
}

#[test]
fn derived_columns_log_one_record_per_row_in_the_same_pass() {
    let data = dataset(
        &["first_name", "age", "loyalty_points"],
        &[&["Ann", "25", "800"], &["Bob", "40", "100"]],
    );
    let (after, records) = enrich(
        data,
        &ReferenceLibrary::builtin(),
        &UnavailableProvider,
        &RepairOptions::default(),
    );

    assert!(after.has_column(fields::IS_LOYAL_CUSTOMER));
    assert!(after.has_column(fields::CUSTOMER_PERSONA));
    assert_eq!(
        after.rows[0].get(fields::IS_LOYAL_CUSTOMER),
        &CellValue::Text("Yes".to_string())
    );
    assert_eq!(
        after.rows[1].get(fields::IS_LOYAL_CUSTOMER),
        &CellValue::Text("No".to_string())
    );
    assert_eq!(
        after.rows[0].get(fields::CUSTOMER_PERSONA),
        &CellValue::Text("Loyal early adopter".to_string())
    );

    let derived: Vec<_> = records
        .iter()
        .filter(|r| r.action == ActionKind::Derived)
        .collect();
    // One record per row per new column.
    assert_eq!(derived.len(), 4);

    // A second pass derives nothing new.
    let (_, second) = enrich(
        after,
        &ReferenceLibrary::builtin(),
        &UnavailableProvider,
        &RepairOptions::default(),
    );
    assert!(second.iter().all(|r| r.action != ActionKind::Derived));
}

#[test]
fn loyalty_flag_waits_for_points_to_exist() {
    let data = dataset(&["first_name", "loyalty_points"], &[&["Ann", ""]]);
    let (after, records) = enrich(
        data,
        &ReferenceLibrary::builtin(),
        &UnavailableProvider,
        &RepairOptions::default(),
    );
    assert!(after.rows[0].get(fields::IS_LOYAL_CUSTOMER).is_missing());
    // Persona still derives from what is available.
    assert_eq!(
        after.rows[0].get(fields::CUSTOMER_PERSONA),
        &CellValue::Text("Occasional shopper".to_string())
    );
    let derived: Vec<_> = records
        .iter()
        .filter(|r| r.action == ActionKind::Derived)
        .collect();
    assert_eq!(derived.len(), 1);
}
