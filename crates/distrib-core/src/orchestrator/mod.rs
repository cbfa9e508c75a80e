//! Verification orchestrator: runs one recipe through fetch, signature and
//! checksum steps.
//!
//! Order for a full run:
//! 1. create `<base>/<distro>/`
//! 2. fetch checksum list or sidecar, detached signature, key file
//! 3. (verify) import or locate the signing key
//! 4. (verify) check a signature that covers the checksum list
//! 5. fetch the image
//! 6. (verify) check a signature that covers the image
//! 7. (verify) check the image digest
//!
//! The first failing step aborts the recipe. Nothing is deleted on failure.
//! With verification disabled the verify steps are skipped and the fetch
//! steps are unchanged. Check-only runs probe each URL and write nothing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Distro;
use crate::digest::Digester;
use crate::error::{Error, RecipeFailure, Step};
use crate::fetch::{FetchMode, FetchOutcome, Fetcher, HeadResult};
use crate::recipe::{Artifact, ChecksumSource, KeySource, Recipe, SignatureScheme, SignedTarget};
use crate::run::RunConfig;
use crate::signature::SignatureVerifier;

/// A step is about to start.
#[derive(Debug, Clone, Copy)]
pub struct StepEvent<'a> {
    pub distro: Distro,
    pub step: Step,
    /// URL, file name or key identity the step works on.
    pub detail: &'a str,
}

/// Receives progress while recipes run. Every method defaults to a no-op.
pub trait RunObserver {
    fn step(&mut self, _event: &StepEvent<'_>) {}

    /// A check-only run found `url` reachable.
    fn reachable(&mut self, _distro: Distro, _url: &str, _head: &HeadResult) {}

    fn finished(&mut self, _distro: Distro, _outcome: &Result<(), RecipeFailure>) {}
}

impl RunObserver for () {}

/// Sequences the fetch, digest and signature capabilities for one recipe.
#[derive(Debug, Clone)]
pub struct Orchestrator<F, D, S> {
    fetcher: F,
    digester: D,
    verifier: S,
}

impl<F, D, S> Orchestrator<F, D, S>
where
    F: Fetcher,
    D: Digester,
    S: SignatureVerifier,
{
    pub fn new(fetcher: F, digester: D, verifier: S) -> Self {
        Self {
            fetcher,
            digester,
            verifier,
        }
    }

    pub fn run(&self, recipe: &Recipe, cfg: &RunConfig) -> Result<(), RecipeFailure> {
        self.run_observed(recipe, cfg, &mut ())
    }

    pub fn run_observed(
        &self,
        recipe: &Recipe,
        cfg: &RunConfig,
        observer: &mut dyn RunObserver,
    ) -> Result<(), RecipeFailure> {
        let mut job = Job {
            recipe,
            dir: cfg.base_dir.join(recipe.dir_name()),
            mode: cfg.fetch_mode,
            observer,
        };
        if cfg.check_only {
            return self.probe_all(&mut job);
        }

        let dir_display = job.dir.display().to_string();
        job.announce(Step::CreateDir, &dir_display);
        fs::create_dir_all(&job.dir)
            .map_err(|source| Error::Filesystem {
                path: job.dir.clone(),
                source,
            })
            .map_err(|e| job.fail(Step::CreateDir, e))?;

        if let Some(list) = recipe.checksum.artifact() {
            self.fetch(&mut job, Step::FetchChecksums, list)?;
        }
        if let SignatureScheme::Detached { artifact, .. } = &recipe.signature {
            self.fetch(&mut job, Step::FetchSignature, artifact)?;
        }
        if let KeySource::Url(key) = &recipe.key {
            self.fetch(&mut job, Step::FetchKey, key)?;
        }

        let verify = cfg.verification_enabled();
        if verify && recipe.signature.is_signed() {
            self.resolve_key(&mut job)
                .map_err(|e| job.fail(Step::ResolveKey, e))?;
            self.verify_signature(&mut job, SignedTarget::ChecksumList)
                .map_err(|e| job.fail(Step::VerifySignature, e))?;
        }

        self.fetch(&mut job, Step::FetchImage, &recipe.image)?;

        if verify {
            self.verify_signature(&mut job, SignedTarget::Image)
                .map_err(|e| job.fail(Step::VerifySignature, e))?;
            self.verify_checksum(&mut job)
                .map_err(|e| job.fail(Step::VerifyChecksum, e))?;
        } else {
            tracing::info!(distro = %recipe.distro, "verification disabled");
        }

        tracing::info!(distro = %recipe.distro, "recipe completed");
        Ok(())
    }

    fn probe_all(&self, job: &mut Job<'_>) -> Result<(), RecipeFailure> {
        let recipe = job.recipe;
        for url in recipe.urls() {
            job.announce(Step::Probe, url);
            match self.fetcher.probe(url) {
                Ok(head) => {
                    tracing::info!(
                        distro = %recipe.distro,
                        url,
                        status = head.status,
                        content_length = ?head.content_length,
                        last_modified = ?head.last_modified,
                        "reachable"
                    );
                    job.observer.reachable(recipe.distro, url, &head);
                }
                Err(source) => {
                    let err = Error::Transfer {
                        url: url.to_string(),
                        source,
                    };
                    return Err(job.fail(Step::Probe, err));
                }
            }
        }
        Ok(())
    }

    fn fetch(&self, job: &mut Job<'_>, step: Step, artifact: &Artifact) -> Result<(), RecipeFailure> {
        job.announce(step, &artifact.url);
        let dest = artifact.local_path(&job.dir);
        match self.fetcher.fetch(&artifact.url, &dest, job.mode) {
            Ok(FetchOutcome::Unchanged) => {
                tracing::info!(distro = %job.recipe.distro, %step, "{} unchanged, keeping local copy", artifact.filename);
                Ok(())
            }
            Ok(FetchOutcome::Downloaded { bytes }) => {
                tracing::debug!(distro = %job.recipe.distro, %step, bytes, "fetched {}", artifact.filename);
                Ok(())
            }
            Err(source) => {
                let err = Error::Transfer {
                    url: artifact.url.clone(),
                    source,
                };
                Err(job.fail(step, err))
            }
        }
    }

    fn resolve_key(&self, job: &mut Job<'_>) -> Result<(), Error> {
        let recipe = job.recipe;
        match &recipe.key {
            KeySource::Url(key) => {
                let path = require(key.local_path(&job.dir))?;
                job.announce(Step::ResolveKey, &key.filename);
                self.verifier.import_key(&path)?;
            }
            KeySource::Lookup(lookup) => {
                job.announce(Step::ResolveKey, &lookup.to_string());
                self.verifier.locate_key(lookup)?;
            }
            KeySource::None => {
                return Err(Error::Config(format!(
                    "{} declares a signature but no signing key",
                    recipe.distro
                )));
            }
        }
        Ok(())
    }

    /// Verifies the signature if it covers `target`; otherwise does nothing.
    fn verify_signature(&self, job: &mut Job<'_>, target: SignedTarget) -> Result<(), Error> {
        let recipe = job.recipe;
        match &recipe.signature {
            SignatureScheme::Detached {
                artifact,
                target: covers,
            } if *covers == target => {
                let signed = match target {
                    SignedTarget::Image => &recipe.image,
                    SignedTarget::ChecksumList => checksum_list(recipe)?,
                };
                let signed_path = require(signed.local_path(&job.dir))?;
                let sig_path = require(artifact.local_path(&job.dir))?;
                job.announce(Step::VerifySignature, &signed.filename);
                self.verifier.verify_detached(&signed_path, &sig_path)?;
            }
            SignatureScheme::Clearsigned if target == SignedTarget::ChecksumList => {
                let list = checksum_list(recipe)?;
                let path = require(list.local_path(&job.dir))?;
                job.announce(Step::VerifySignature, &list.filename);
                self.verifier.verify_clearsigned(&path)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn verify_checksum(&self, job: &mut Job<'_>) -> Result<(), Error> {
        let recipe = job.recipe;
        match &recipe.checksum {
            ChecksumSource::None => {
                tracing::info!(distro = %recipe.distro, "no published checksum to verify");
            }
            ChecksumSource::List {
                artifact,
                algorithm,
            } => {
                let list = require(artifact.local_path(&job.dir))?;
                let image = require(recipe.image.local_path(&job.dir))?;
                job.announce(Step::VerifyChecksum, &recipe.image.filename);
                self.digester
                    .verify_listed(&image, &list, *algorithm, &recipe.image.filename)?;
            }
            ChecksumSource::Sidecar {
                artifact,
                algorithm,
            } => {
                let sidecar = require(artifact.local_path(&job.dir))?;
                let image = require(recipe.image.local_path(&job.dir))?;
                job.announce(Step::VerifyChecksum, &recipe.image.filename);
                self.digester.verify_sidecar(&image, &sidecar, *algorithm)?;
            }
        }
        Ok(())
    }
}

/// Per-recipe state threaded through the steps.
struct Job<'a> {
    recipe: &'a Recipe,
    dir: PathBuf,
    mode: FetchMode,
    observer: &'a mut dyn RunObserver,
}

impl Job<'_> {
    fn announce(&mut self, step: Step, detail: &str) {
        tracing::info!(distro = %self.recipe.distro, %step, "{}", detail);
        self.observer.step(&StepEvent {
            distro: self.recipe.distro,
            step,
            detail,
        });
    }

    fn fail(&self, step: Step, error: Error) -> RecipeFailure {
        tracing::error!(distro = %self.recipe.distro, %step, "{}", error);
        RecipeFailure::new(self.recipe.distro, step, error)
    }
}

fn checksum_list(recipe: &Recipe) -> Result<&Artifact, Error> {
    match &recipe.checksum {
        ChecksumSource::List { artifact, .. } => Ok(artifact),
        _ => Err(Error::Config(format!(
            "{}: signature covers a checksum list the recipe does not declare",
            recipe.distro
        ))),
    }
}

fn require(path: PathBuf) -> Result<PathBuf, Error> {
    if is_file(&path) {
        Ok(path)
    } else {
        Err(Error::MissingFile(path))
    }
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
