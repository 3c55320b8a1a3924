//! The convergence loop: Detect -> Correct -> Enrich until the data is
//! clean or the iteration budget runs out.

use tracing::{info, info_span, warn};

use repair_correct::correct;
use repair_detect::detect;
use repair_enrich::{FillProvider, enrich};
use repair_model::{
    ChangeLog, ConvergenceStatus, Dataset, IssueReport, RepairOptions, fields,
};
use repair_reference::ReferenceLibrary;

/// Everything a repair run produces.
///
/// The dataset is returned regardless of convergence; the status and the
/// final issue report make non-convergence observable without being an
/// error.
#[derive(Debug, Clone)]
pub struct RepairOutcome {
    pub dataset: Dataset,
    pub status: ConvergenceStatus,
    /// Completed correction/enrichment cycles.
    pub iterations: u32,
    pub change_log: ChangeLog,
    /// Findings still open at termination; empty when converged.
    pub unresolved: IssueReport,
}

/// Drive the pipeline to convergence or to the iteration cap.
///
/// Correction's own changes are never assumed clean: every cycle starts
/// with a fresh detection pass over the advanced dataset.
pub fn run(
    dataset: Dataset,
    library: &ReferenceLibrary,
    provider: &dyn FillProvider,
    options: &RepairOptions,
) -> RepairOutcome {
    let mut dataset = dataset;
    let mut change_log = ChangeLog::default();
    let mut iteration = 0u32;

    loop {
        let pass = iteration + 1;
        let span = info_span!("pass", number = pass);
        let _guard = span.enter();

        let report = detect(&dataset, library, options);
        info!(
            cell_issues = report.cell_issue_count(),
            duplicate_rows = report.duplicates.len(),
            "detection complete"
        );

        if report.is_clean() {
            info!(iterations = iteration, "converged");
            return RepairOutcome {
                dataset,
                status: ConvergenceStatus::Converged,
                iterations: iteration,
                change_log,
                unresolved: IssueReport::default(),
            };
        }
        if iteration >= options.max_iterations {
            warn!(
                iterations = iteration,
                open_issues = report.cell_issue_count(),
                "iteration budget exhausted, returning best effort"
            );
            return RepairOutcome {
                dataset,
                status: ConvergenceStatus::IssuesRemaining,
                iterations: iteration,
                change_log,
                unresolved: report,
            };
        }

        let (corrected, records) = correct(dataset, &report, library, options);
        dataset = corrected;
        info!(changes = records.len(), "correction complete");
        change_log.append(pass, records);

        if has_missing_recognized(&dataset) {
            let (enriched, records) = enrich(dataset, library, provider, options);
            dataset = enriched;
            info!(changes = records.len(), "enrichment complete");
            change_log.append(pass, records);
        }

        iteration += 1;
    }
}

fn has_missing_recognized(dataset: &Dataset) -> bool {
    let recognized: Vec<&String> = dataset
        .columns
        .iter()
        .filter(|column| fields::is_recognized(column))
        .collect();
    dataset
        .rows
        .iter()
        .any(|row| recognized.iter().any(|column| row.get(column).is_missing()))
}
