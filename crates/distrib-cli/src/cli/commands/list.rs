//! `distrib-dl --list` – print the resolved catalog without touching the network.

use anyhow::Result;
use distrib_core::catalog::{self, Distro, Versions};
use distrib_core::recipe::{ChecksumSource, KeySource, Recipe, SignatureScheme, SignedTarget};

pub fn run_list(versions: &Versions) -> Result<()> {
    for distro in Distro::ALL {
        let recipe = catalog::recipe(distro, versions)?;
        print!("{}", describe(&recipe));
    }
    Ok(())
}

fn describe(recipe: &Recipe) -> String {
    let checksum = match &recipe.checksum {
        ChecksumSource::None => "none".to_string(),
        ChecksumSource::List {
            artifact,
            algorithm,
        } => format!("{} ({})", artifact.filename, algorithm),
        ChecksumSource::Sidecar {
            artifact,
            algorithm,
        } => format!("{} ({}, sidecar)", artifact.filename, algorithm),
    };
    let signature = match &recipe.signature {
        SignatureScheme::None => "none".to_string(),
        SignatureScheme::Detached { artifact, target } => {
            let covers = match target {
                SignedTarget::ChecksumList => "checksum list",
                SignedTarget::Image => "image",
            };
            format!("{} over {}", artifact.filename, covers)
        }
        SignatureScheme::Clearsigned => "clearsigned checksum list".to_string(),
    };
    let key = match &recipe.key {
        KeySource::None => "none".to_string(),
        KeySource::Url(artifact) => artifact.url.clone(),
        KeySource::Lookup(lookup) => lookup.to_string(),
    };
    format!(
        "{}\n  image:     {}\n  checksum:  {}\n  signature: {}\n  key:       {}\n",
        recipe.distro, recipe.image.url, checksum, signature, key
    )
}
