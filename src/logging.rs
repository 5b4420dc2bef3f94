//! Tracing setup.
//!
//! Two layers: the console (filtered by `RUST_LOG`, default `info`) and a
//! per-process log file `generation_log_<timestamp>.log` that always
//! records this crate's debug output, including raw API responses.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::domain::TIMESTAMP_FORMAT;

/// Log file name for a process started at `timestamp`
pub fn log_file_name(timestamp: &DateTime<Local>) -> String {
    format!("generation_log_{}.log", timestamp.format(TIMESTAMP_FORMAT))
}

/// Install the global subscriber and return the log file path
pub fn init(log_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let log_path = log_dir.join(log_file_name(&Local::now()));
    let file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

    let console = fmt::layer()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .with_filter(
            Targets::new()
                .with_target("distillery", Level::DEBUG)
                .with_default(Level::INFO),
        );

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(log_path)
}
