// src/logging.rs

//! Logging setup for `wbsplan` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` CLI flag
//! 2. `WBSPLAN_LOG` (a level or full filter directives, e.g.
//!    `wbsplan::wbs=debug`)
//! 3. `RUST_LOG`
//! 4. `info`
//!
//! Logs go to stderr; stdout carries only the schedule.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

const ENV_VAR: &str = "WBSPLAN_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let directive = filter_directive(
        cli_level,
        std::env::var(ENV_VAR).ok().as_deref(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// Pick the filter directive string. Blank or unparsable environment values
/// are skipped.
pub fn filter_directive(
    cli_level: Option<LogLevel>,
    wbsplan_log: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    if let Some(lvl) = cli_level {
        return level_name(lvl).to_string();
    }

    [wbsplan_log, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty() && EnvFilter::try_new(s).is_ok())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

fn level_name(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
