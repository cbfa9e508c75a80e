//! Logging init: file under XDG state dir, or graceful fallback to stderr.
//!
//! Step banners and transfer progress go straight to the terminal; the log
//! carries the structured `distro`/`step` events for later inspection.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,distrib_core=debug,distrib_dl=debug";
/// Stderr only shows problems unless `RUST_LOG` says otherwise.
const STDERR_FILTER: &str = "warn";

pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("distrib-dl")?;
    Ok(xdg_dirs.place_state_file("distrib-dl.log")?)
}

/// Initialize structured logging to `~/.local/state/distrib-dl/distrib-dl.log`.
/// Returns Err when the file cannot be opened so the caller can fall back to
/// `init_logging_stderr`.
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    init_logging_at(&path)?;
    tracing::info!("distrib-dl logging initialized at {}", path.display());
    Ok(())
}

fn init_logging_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_or(DEFAULT_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Log to stderr only. Never fails; a second subscriber is silently ignored.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_or(STDERR_FILTER))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
