use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use tracing::debug;

use repair_model::{CellValue, Dataset, Row, RowId};

#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Stable source identifier for row-id derivation (e.g. the input path).
    pub source_id: String,
}

impl IngestOptions {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
        }
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Load a delimited customer file into a [`Dataset`].
///
/// The header row defines the column schema. Fully empty records are
/// skipped; every kept record gets a deterministic row id derived from the
/// source id and its record number. An unreadable or unparseable file is
/// the one fatal error of the pipeline.
pub fn read_customer_csv(path: &Path, options: &IngestOptions) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("read header: {}", path.display()))?
        .iter()
        .map(normalize_header)
        .collect();
    if headers.iter().all(String::is_empty) {
        bail!("no header row in {}", path.display());
    }

    let mut dataset = Dataset::new(headers.clone());
    let mut record_number = 0u64;
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        record_number += 1;
        let mut row = Row::new(RowId::derive(&options.source_id, record_number));
        for (idx, header) in headers.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            row.set(header, CellValue::parse(raw));
        }
        dataset.push_row(row);
    }
    debug!(
        rows = dataset.rows.len(),
        columns = dataset.columns.len(),
        source = %options.source_id,
        "csv loaded"
    );
    Ok(dataset)
}
