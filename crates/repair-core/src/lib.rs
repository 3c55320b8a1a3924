pub mod logbook;
pub mod pipeline;

pub use logbook::{render_change_log, render_issue_report};
pub use pipeline::{RepairOutcome, run};
