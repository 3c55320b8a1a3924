use tracing::debug;

use repair_detect::rules;
use repair_model::{CellValue, ChangeRecord, Dataset, RepairOptions, Row, fields};
use repair_reference::{ReferenceLibrary, best_match};

use crate::derive;
use crate::provider::{FillProvider, RowContext};

/// Fill residual missing fields through the external capability, then
/// derive the computed columns from the completed rows.
///
/// Per-field failures (including provider unavailability and timeouts)
/// leave the field missing and log nothing; one row's failure never blocks
/// the rest of the dataset.
pub fn enrich(
    dataset: Dataset,
    library: &ReferenceLibrary,
    provider: &dyn FillProvider,
    options: &RepairOptions,
) -> (Dataset, Vec<ChangeRecord>) {
    let mut dataset = dataset;
    let mut records = Vec::new();

    fill_missing(&mut dataset, library, provider, options, &mut records);
    derive_columns(&mut dataset, options, &mut records);

    debug!(
        changes = records.len(),
        provider = provider.name(),
        "enrichment pass complete"
    );
    (dataset, records)
}

fn fill_missing(
    dataset: &mut Dataset,
    library: &ReferenceLibrary,
    provider: &dyn FillProvider,
    options: &RepairOptions,
    records: &mut Vec<ChangeRecord>,
) {
    let recognized: Vec<String> = dataset
        .columns
        .iter()
        .filter(|column| fields::is_recognized(column))
        .cloned()
        .collect();
    let all_columns = dataset.columns.clone();

    for row in &mut dataset.rows {
        let targets: Vec<String> = recognized
            .iter()
            .filter(|column| row.get(column).is_missing())
            .cloned()
            .collect();
        if targets.is_empty() {
            continue;
        }
        // Context is the row as it stood before this row's fills, so the
        // per-field calls stay independent of each other.
        let context = row_context(row, &all_columns);
        for target in targets {
            match provider.fill(&context, &target) {
                Ok(Some(raw)) => {
                    if let Some(value) = acceptable_fill(&target, &raw, library, options) {
                        row.set(&target, value.clone());
                        records.push(ChangeRecord::enriched(row.id, &target, &value));
                    } else {
                        debug!(row = %row.id, field = %target, "unusable fill discarded");
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    debug!(row = %row.id, field = %target, %error, "fill failed, left missing");
                }
            }
        }
    }
}

fn row_context(row: &Row, columns: &[String]) -> RowContext {
    let mut context = RowContext::default();
    for column in columns {
        let cell = row.get(column);
        if !cell.is_missing() {
            context.insert(column, cell.render());
        }
    }
    context
}

/// Validate and normalize a provider value before accepting it.
///
/// A fill that would itself be flagged by the field's rule is discarded;
/// near-canonical country/city values are canonicalized on the way in.
fn acceptable_fill(
    column: &str,
    raw: &str,
    library: &ReferenceLibrary,
    options: &RepairOptions,
) -> Option<CellValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match column {
        fields::EMAIL => {
            rules::is_valid_email(trimmed).then(|| CellValue::Text(trimmed.to_string()))
        }
        fields::PHONE => {
            if rules::phone_issue(trimmed).is_none() {
                Some(CellValue::Text(trimmed.to_string()))
            } else {
                rules::phone_digits(trimmed)
                    .and_then(|digits| rules::format_phone(&digits))
                    .map(CellValue::Text)
            }
        }
        fields::GENDER => library
            .genders
            .resolve(trimmed)
            .map(|canonical| CellValue::Text(canonical.to_string())),
        fields::MARITAL_STATUS => library
            .marital_statuses
            .resolve(trimmed)
            .map(|canonical| CellValue::Text(canonical.to_string())),
        fields::AGE => {
            let age = trimmed.parse::<i64>().ok()?;
            (rules::AGE_MIN..=rules::AGE_MAX)
                .contains(&age)
                .then_some(CellValue::Number(age as f64))
        }
        fields::LOYALTY_POINTS => {
            let points = trimmed.parse::<f64>().ok().filter(|v| v.is_finite())?;
            (points >= 0.0).then_some(CellValue::Number(points))
        }
        fields::COUNTRY => canonicalized(&library.countries, trimmed, options),
        fields::CITY => canonicalized(&library.cities, trimmed, options),
        _ if fields::is_name_column(column) => {
            if rules::is_name_placeholder(trimmed) {
                None
            } else {
                Some(CellValue::Text(rules::title_case(trimmed)))
            }
        }
        _ => Some(CellValue::parse(trimmed)),
    }
}

fn canonicalized(
    set: &repair_reference::ReferenceSet,
    raw: &str,
    options: &RepairOptions,
) -> Option<CellValue> {
    if let Some(exact) = set.resolve_exact(raw) {
        return Some(CellValue::Text(exact.to_string()));
    }
    let matched = best_match(set, raw)?;
    (matched.score >= options.fuzzy_match_threshold)
        .then(|| CellValue::Text(matched.canonical.to_string()))
}

/// Append the derived columns and compute them for every row that does not
/// carry a value yet; each computed cell logs one `derived` record.
fn derive_columns(dataset: &mut Dataset, options: &RepairOptions, records: &mut Vec<ChangeRecord>) {
    dataset.add_column(fields::IS_LOYAL_CUSTOMER);
    dataset.add_column(fields::CUSTOMER_PERSONA);

    for row in &mut dataset.rows {
        let points = rules::numeric_value(row.get(fields::LOYALTY_POINTS));
        let age = rules::integer_value(row.get(fields::AGE)).and_then(derive::plausible_age);
        let loyal = points.map(|value| value >= options.loyalty_threshold);

        if row.get(fields::IS_LOYAL_CUSTOMER).is_missing()
            && let Some(points) = points
        {
            let value = CellValue::Text(
                derive::loyalty_flag(points, options.loyalty_threshold).to_string(),
            );
            row.set(fields::IS_LOYAL_CUSTOMER, value.clone());
            records.push(ChangeRecord::derived(row.id, fields::IS_LOYAL_CUSTOMER, &value));
        }

        if row.get(fields::CUSTOMER_PERSONA).is_missing() {
            let value = CellValue::Text(derive::persona(age, loyal).to_string());
            row.set(fields::CUSTOMER_PERSONA, value.clone());
            records.push(ChangeRecord::derived(row.id, fields::CUSTOMER_PERSONA, &value));
        }
    }
}
