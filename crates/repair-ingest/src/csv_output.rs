use std::path::Path;

use anyhow::{Context, Result};

use repair_model::Dataset;

/// Write a [`Dataset`] back out as CSV.
///
/// Column order is the dataset's schema order (original columns first,
/// derived columns appended); missing cells render empty.
pub fn write_customer_csv(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("write csv: {}", path.display()))?;
    writer
        .write_record(&dataset.columns)
        .with_context(|| format!("write header: {}", path.display()))?;
    for row in &dataset.rows {
        let record: Vec<String> = dataset
            .columns
            .iter()
            .map(|column| row.get(column).render())
            .collect();
        writer
            .write_record(&record)
            .with_context(|| format!("write record: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv: {}", path.display()))?;
    Ok(())
}
