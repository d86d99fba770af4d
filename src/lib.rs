// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod render;
pub mod types;
pub mod wbs;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, default_config_path, load_and_validate, load_or_default};
use crate::wbs::{WbsSession, load_deliverables};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - deliverable loading
/// - tree building + scheduling
/// - output (outline or JSON)
pub fn run(args: CliArgs) -> Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(placement) = args.hold_point_placement {
        debug!(?placement, "hold point placement overridden on the command line");
        cfg = cfg.with_hold_point_placement(placement);
    }

    let deliverables = load_deliverables(&args.deliverables)
        .with_context(|| format!("reading deliverables from {}", args.deliverables))?;
    debug!(count = deliverables.len(), "loaded deliverables");

    if args.dry_run {
        print!("{}", render::dry_run(&cfg, &deliverables));
        return Ok(());
    }

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    info!(%today, "scheduling against reference date");

    let session = WbsSession::from_deliverables(&deliverables, cfg, today)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.nodes())?);
    } else {
        print!("{}", render::outline(&session.nodes()));
        println!("{}", render::summary(session.report()));
    }

    Ok(())
}

/// An explicit `--config` must exist; the default path may be absent.
fn load_config(explicit: Option<&str>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => {
            let path = PathBuf::from(path);
            load_and_validate(&path)
                .with_context(|| format!("loading config from {}", path.display()))
        }
        None => Ok(load_or_default(default_config_path())?),
    }
}
