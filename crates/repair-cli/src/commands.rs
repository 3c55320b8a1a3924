use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use repair_core::{RepairOutcome, render_change_log, render_issue_report, run};
use repair_enrich::UnavailableProvider;
use repair_ingest::{IngestOptions, read_customer_csv, write_customer_csv};
use repair_model::{ActionKind, ConvergenceStatus, IssueReport, RepairOptions, fields};
use repair_reference::ReferenceLibrary;

use crate::cli::RunArgs;
use crate::summary::{apply_table_style, header_cell};

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub log: PathBuf,
    pub rows_in: usize,
    pub rows_out: usize,
    pub status: ConvergenceStatus,
    pub iterations: u32,
    pub counts: BTreeMap<ActionKind, usize>,
    pub unresolved: IssueReport,
}

pub fn run_repair(args: &RunArgs) -> Result<RunResult> {
    let options = RepairOptions::default()
        .with_max_iterations(args.max_iterations)
        .with_fuzzy_match_threshold(args.fuzzy_threshold)
        .with_loyalty_threshold(args.loyalty_threshold);
    let library = ReferenceLibrary::builtin();

    let source_id = args.input.display().to_string();
    let dataset = read_customer_csv(&args.input, &IngestOptions::new(source_id))?;
    let rows_in = dataset.rows.len();
    info!(rows = rows_in, input = %args.input.display(), "input loaded");

    // Credential handling belongs to the invoking front-end; without one,
    // enrichment degrades to leaving residual gaps missing.
    let provider = UnavailableProvider;
    let span = info_span!("repair", input = %args.input.display());
    let outcome = span.in_scope(|| run(dataset, &library, &provider, &options));

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    write_customer_csv(&output, &outcome.dataset)?;
    append_change_log(&args.log, &args.input, &output, &outcome)?;

    Ok(RunResult {
        input: args.input.clone(),
        output,
        log: args.log.clone(),
        rows_in,
        rows_out: outcome.dataset.rows.len(),
        status: outcome.status,
        iterations: outcome.iterations,
        counts: outcome.change_log.counts_by_action(),
        unresolved: outcome.unresolved,
    })
}

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Rule")]);
    apply_table_style(&mut table);
    for column in fields::RECOGNIZED {
        table.add_row(vec![column, fields::rule_summary(column)]);
    }
    for column in [fields::IS_LOYAL_CUSTOMER, fields::CUSTOMER_PERSONA] {
        table.add_row(vec![column, "derived during enrichment"]);
    }
    println!("{table}");
    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}_cleaned.csv"))
}

/// Append this run's rendered change log (and any open findings) to the
/// audit log file, creating parent directories as needed.
fn append_change_log(
    log_path: &Path,
    input: &Path,
    output: &Path,
    outcome: &RepairOutcome,
) -> Result<()> {
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log directory: {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open change log: {}", log_path.display()))?;
    writeln!(
        file,
        "--- repair run: {} -> {} ({} after {} iteration(s)) ---",
        input.display(),
        output.display(),
        outcome.status,
        outcome.iterations
    )?;
    file.write_all(render_change_log(&outcome.change_log).as_bytes())?;
    if !outcome.unresolved.is_clean() {
        file.write_all(render_issue_report(&outcome.unresolved).as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(dir: &Path, input_name: &str) -> RunArgs {
        RunArgs {
            input: dir.join(input_name),
            output: None,
            log: dir.join("logs/repair_log.txt"),
            max_iterations: 3,
            fuzzy_threshold: 0.8,
            loyalty_threshold: 500.0,
        }
    }

    #[test]
    fn default_output_sits_next_to_the_input() {
        let path = default_output_path(Path::new("data/customers.csv"));
        assert_eq!(path, Path::new("data/customers_cleaned.csv"));
    }

    #[test]
    fn run_repair_writes_output_and_appends_the_change_log() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("customers.csv"),
            "first_name,country,age\nmia,Grmany,45\nMia,germany,45\n",
        )
        .unwrap();

        let result = run_repair(&args(dir.path(), "customers.csv")).unwrap();
        assert_eq!(result.rows_in, 2);
        assert_eq!(result.rows_out, 1);
        assert_eq!(result.status, ConvergenceStatus::Converged);

        let output = std::fs::read_to_string(dir.path().join("customers_cleaned.csv")).unwrap();
        assert!(output.contains("Mia,Germany,45"));

        let log = std::fs::read_to_string(dir.path().join("logs/repair_log.txt")).unwrap();
        assert!(log.contains("--- repair run:"));
        assert!(log.contains("corrected:"));
        assert!(log.contains("deduplicated:"));

        // A second run appends rather than truncates.
        run_repair(&args(dir.path(), "customers.csv")).unwrap();
        let appended = std::fs::read_to_string(dir.path().join("logs/repair_log.txt")).unwrap();
        assert_eq!(appended.matches("--- repair run:").count(), 2);
    }

    #[test]
    fn unreadable_input_is_a_fatal_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_repair(&args(dir.path(), "absent.csv"));
        assert!(result.is_err());
    }
}
