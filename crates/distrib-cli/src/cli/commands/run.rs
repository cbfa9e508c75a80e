//! `distrib-dl [DISTRO...]` – fetch and verify the selected distributions.

use anyhow::Result;
use distrib_core::catalog;
use distrib_core::config::DistribConfig;
use distrib_core::digest::Sha2Digester;
use distrib_core::dispatch::{dispatch, select};
use distrib_core::fetch::CurlFetcher;
use distrib_core::orchestrator::Orchestrator;
use distrib_core::retry::RetryPolicy;
use distrib_core::run::RunConfig;
use distrib_core::signature::GpgVerifier;

use super::console::Console;
use crate::cli::Cli;

pub fn run_distributions(cli: &Cli, cfg: &DistribConfig) -> Result<bool> {
    // Names and templates are all checked before the first request goes out.
    let selection = select(cli.distributions.as_slice())?;
    let recipes = catalog::recipes(&selection, &cfg.versions)?;

    let run_cfg = RunConfig::new(&cli.dir)
        .with_verify(!cli.no_verify)
        .with_check_only(cli.check)
        .with_fetch_mode(cli.fetch_mode());
    tracing::debug!("run config: {:?}", run_cfg);

    let retry = cfg
        .retry
        .as_ref()
        .map(RetryPolicy::try_from)
        .transpose()?
        .unwrap_or_default();
    let orchestrator = Orchestrator::new(
        CurlFetcher::new(retry),
        Sha2Digester,
        GpgVerifier::new(cfg.gpg_homedir.clone()),
    );

    let mut console = Console::default();
    let report = dispatch(&orchestrator, &recipes, &run_cfg, &mut console);
    console.summary(&report);
    Ok(report.is_success())
}
