//! Run configuration and per-run outcome report.

use std::path::PathBuf;

use crate::catalog::Distro;
use crate::error::RecipeFailure;
use crate::fetch::FetchMode;

/// Options shared by every recipe of one invocation. Built once from the
/// command line, read-only after. Which distributions run is decided by the
/// recipe list handed to `dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Each distribution gets `<base_dir>/<name>/`.
    pub base_dir: PathBuf,
    /// Run signature and checksum checks.
    pub verify: bool,
    /// Probe URLs only; nothing is written and nothing is verified.
    pub check_only: bool,
    pub fetch_mode: FetchMode,
}

impl RunConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            verify: true,
            check_only: false,
            fetch_mode: FetchMode::IfNewer,
        }
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }

    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    /// Check-only runs never verify.
    pub fn verification_enabled(&self) -> bool {
        self.verify && !self.check_only
    }
}

/// Outcome of every processed distribution, in processing order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<(Distro, Result<(), RecipeFailure>)>,
}

impl RunReport {
    pub fn record(&mut self, distro: Distro, outcome: Result<(), RecipeFailure>) {
        self.outcomes.push((distro, outcome));
    }

    pub fn failures(&self) -> impl Iterator<Item = &RecipeFailure> {
        self.outcomes.iter().filter_map(|(_, r)| r.as_ref().err())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}
