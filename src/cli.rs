// src/cli.rs

//! CLI argument parsing using `clap`.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::types::HoldPointPlacement;

/// Command-line arguments for `wbsplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wbsplan",
    version,
    about = "Build a dated work breakdown schedule from project deliverables.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the deliverables file (JSON array).
    #[arg(long, value_name = "PATH")]
    pub deliverables: String,

    /// Path to the config file (TOML).
    ///
    /// Default: `Wbsplan.toml` in the current working directory; built-in
    /// defaults are used when that file does not exist.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Scheduling reference date (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Place client-review hold points at phase `exit` or `entry`,
    /// overriding `[phases].hold_point_placement`.
    #[arg(long, value_name = "PLACEMENT")]
    pub hold_point_placement: Option<HoldPointPlacement>,

    /// Print the dated tree as JSON instead of an outline.
    #[arg(long)]
    pub json: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WBSPLAN_LOG`, then `RUST_LOG`, then `info` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the phase grouping, but don't schedule.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
