//! CLI for distrib-dl.

mod commands;

use anyhow::Result;
use clap::Parser;
use distrib_core::config;
use distrib_core::fetch::FetchMode;
use std::path::PathBuf;

use commands::{run_distributions, run_list};

/// Download and verify operating system installer images.
#[derive(Debug, Parser)]
#[command(name = "distrib-dl")]
#[command(
    about = "distrib-dl: download and verify OS installer images",
    long_about = None
)]
pub struct Cli {
    /// Only check that every URL is reachable; download nothing.
    #[arg(short = 'c', long)]
    pub check: bool,

    /// Base directory; each distribution gets its own subdirectory.
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Download everything but skip signature and checksum verification.
    #[arg(long)]
    pub no_verify: bool,

    /// Re-download files even when the remote copy is unchanged.
    #[arg(long)]
    pub force: bool,

    /// Print the catalog for the configured versions and exit.
    #[arg(long)]
    pub list: bool,

    /// Distributions to process (`all`, or none, for every one).
    #[arg(value_name = "DISTRO")]
    pub distributions: Vec<String>,
}

impl Cli {
    pub fn fetch_mode(&self) -> FetchMode {
        if self.force {
            FetchMode::Always
        } else {
            FetchMode::IfNewer
        }
    }

    /// Parse arguments and run. `Ok(false)` means at least one distribution failed.
    pub fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        if cli.list {
            run_list(&cfg.versions)?;
            return Ok(true);
        }
        run_distributions(&cli, &cfg)
    }
}

/// Process exit status for a finished run: 0 only when every selected
/// distribution succeeded.
pub fn exit_code(outcome: &Result<bool>) -> i32 {
    match outcome {
        Ok(true) => 0,
        Ok(false) | Err(_) => 1,
    }
}

#[cfg(test)]
mod tests;
