//! Logging setup
//!
//! The TUI owns the terminal, so log records go to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use crate::config::{project_dirs, LogPreferences};

/// Resolve where the log file lives
pub fn log_path(prefs: &LogPreferences) -> PathBuf {
    if let Some(ref file) = prefs.file {
        return file.clone();
    }
    match project_dirs() {
        Some(dirs) => dirs.data_local_dir().join("mrqr.log"),
        None => PathBuf::from("mrqr.log"),
    }
}

/// Install the global logger. `RUST_LOG` overrides the configured level.
pub fn init(prefs: &LogPreferences) -> Result<PathBuf> {
    let path = log_path(prefs);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {:?}", path))?;

    Builder::from_env(Env::default().default_filter_or(prefs.level.as_str()))
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Logger already initialised")?;

    Ok(path)
}
