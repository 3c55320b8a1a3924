//! CLI argument definitions for the record repair tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use repair_model::options::{
    DEFAULT_FUZZY_MATCH_THRESHOLD, DEFAULT_LOYALTY_THRESHOLD, DEFAULT_MAX_ITERATIONS,
};

#[derive(Parser)]
#[command(
    name = "record-repair",
    version,
    about = "Customer record repair - detect, correct and enrich messy customer CSVs",
    long_about = "Repair messy tabular customer records through repeated\n\
                  detect/correct/enrich passes until the data converges or the\n\
                  iteration budget is exhausted. Every mutation is logged to an\n\
                  append-only change log for after-the-fact audit."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write diagnostic logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Repair a customer CSV and write the cleaned output plus change log.
    Run(RunArgs),

    /// List the recognized columns and the rule applied to each.
    Fields,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the input CSV file.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the cleaned output CSV (default: <input>_cleaned.csv).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path of the append-only change log.
    #[arg(
        short = 'l',
        long = "log",
        value_name = "PATH",
        default_value = "logs/repair_log.txt"
    )]
    pub log: PathBuf,

    /// Maximum detect/correct/enrich cycles before best-effort output.
    #[arg(
        long = "max-iterations",
        value_name = "N",
        default_value_t = DEFAULT_MAX_ITERATIONS
    )]
    pub max_iterations: u32,

    /// Minimum similarity for fuzzy country/city corrections.
    #[arg(
        long = "fuzzy-threshold",
        value_name = "SCORE",
        default_value_t = DEFAULT_FUZZY_MATCH_THRESHOLD
    )]
    pub fuzzy_threshold: f64,

    /// Points balance needed for the derived loyalty flag.
    #[arg(
        long = "loyalty-threshold",
        value_name = "POINTS",
        default_value_t = DEFAULT_LOYALTY_THRESHOLD
    )]
    pub loyalty_threshold: f64,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
