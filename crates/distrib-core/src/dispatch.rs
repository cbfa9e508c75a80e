//! Selection of distributions by name and sequential processing of a run.

use std::str::FromStr;

use crate::catalog::Distro;
use crate::digest::Digester;
use crate::error::Error;
use crate::fetch::Fetcher;
use crate::orchestrator::{Orchestrator, RunObserver};
use crate::recipe::Recipe;
use crate::run::{RunConfig, RunReport};
use crate::signature::SignatureVerifier;

/// Keyword selecting every supported distribution.
pub const ALL_KEYWORD: &str = "all";

/// Turn command-line names into distributions.
///
/// No names, or `all` anywhere, selects every distribution in catalog order.
/// Every name is validated first, so a typo aborts before any work starts.
/// Repeated names are processed once, at their first position.
pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Vec<Distro>, Error> {
    let mut selected = Vec::with_capacity(names.len());
    let mut everything = names.is_empty();
    for name in names {
        let name = name.as_ref();
        if name == ALL_KEYWORD {
            everything = true;
            continue;
        }
        let distro = Distro::from_str(name)?;
        if !selected.contains(&distro) {
            selected.push(distro);
        }
    }
    if everything {
        return Ok(Distro::ALL.to_vec());
    }
    Ok(selected)
}

/// Run each recipe in order. A failed recipe is recorded and the next one
/// still runs.
pub fn dispatch<F, D, S>(
    orchestrator: &Orchestrator<F, D, S>,
    recipes: &[Recipe],
    cfg: &RunConfig,
    observer: &mut dyn RunObserver,
) -> RunReport
where
    F: Fetcher,
    D: Digester,
    S: SignatureVerifier,
{
    let mut report = RunReport::default();
    for recipe in recipes {
        let outcome = orchestrator.run_observed(recipe, cfg, observer);
        if let Err(failure) = &outcome {
            tracing::warn!(distro = %recipe.distro, "{}", failure);
        }
        observer.finished(recipe.distro, &outcome);
        report.record(recipe.distro, outcome);
    }
    tracing::info!(
        processed = report.outcomes.len(),
        failed = report.failed_count(),
        "run finished"
    );
    report
}
