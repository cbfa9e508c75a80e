//! Error taxonomy for recipe resolution, capabilities and orchestration.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::Distro;
use crate::digest::ChecksumError;
use crate::retry::FetchError;
use crate::signature::SignatureError;

/// Failure of a single step, or a fatal configuration problem.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad option or config value. Always raised before any network activity.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown distribution '{0}'")]
    UnknownDistribution(String),

    /// Unreachable host, HTTP error status, timeout or partial transfer.
    #[error("transfer of {url} failed: {source}")]
    Transfer {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("signature verification failed: {0}")]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    /// A file a verification step depends on is not on disk.
    #[error("expected local file is missing: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Orchestrator step names, used to tag progress events and failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateDir,
    FetchChecksums,
    FetchSignature,
    FetchKey,
    ResolveKey,
    VerifySignature,
    FetchImage,
    VerifyChecksum,
    Probe,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::CreateDir => "create directory",
            Step::FetchChecksums => "fetch checksums",
            Step::FetchSignature => "fetch signature",
            Step::FetchKey => "fetch key",
            Step::ResolveKey => "resolve signing key",
            Step::VerifySignature => "verify signature",
            Step::FetchImage => "fetch image",
            Step::VerifyChecksum => "verify checksum",
            Step::Probe => "probe",
        };
        f.write_str(s)
    }
}

/// A recipe that stopped at `step` with `error`.
#[derive(Debug, Error)]
#[error("{distro}: {step} failed: {error}")]
pub struct RecipeFailure {
    pub distro: Distro,
    pub step: Step,
    pub error: Error,
}

impl RecipeFailure {
    pub fn new(distro: Distro, step: Step, error: Error) -> Self {
        Self {
            distro,
            step,
            error,
        }
    }
}
