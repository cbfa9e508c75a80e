//! Digest capability: verify a local file against a vendor checksum list.
//!
//! The algorithm is always carried explicitly by the recipe; nothing here
//! looks at list filenames to guess it.

mod hasher;
mod list;

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use hasher::{file_digest, Sha2Digester};
pub use list::{find_entry, parse_checksum_list, ChecksumEntry};

/// Checksum algorithm used by a vendor's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    /// Length of the lowercase hex digest.
    pub fn hex_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 64,
            DigestAlgorithm::Sha512 => 128,
        }
    }

    /// Tag used in BSD-style lines, e.g. `SHA256 (file) = ...`.
    pub fn bsd_tag(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "SHA256",
            DigestAlgorithm::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Sha256 => f.write_str("sha256"),
            DigestAlgorithm::Sha512 => f.write_str("sha512"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("{algorithm} mismatch for {file}: expected {expected}, got {actual}")]
    Mismatch {
        file: String,
        algorithm: DigestAlgorithm,
        expected: String,
        actual: String,
    },

    #[error("no {algorithm} entry for {file} in {}", list.display())]
    MissingEntry {
        file: String,
        list: PathBuf,
        algorithm: DigestAlgorithm,
    },

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Verifies file digests against checksum artifacts.
pub trait Digester {
    /// Checks `file` against the entry named `name` in `list`. Entries for
    /// other files are ignored; a missing entry for `name` is an error.
    fn verify_listed(
        &self,
        file: &Path,
        list: &Path,
        algorithm: DigestAlgorithm,
        name: &str,
    ) -> Result<(), ChecksumError>;

    /// Checks `file` against a per-file sidecar holding either a bare digest
    /// or an entry for the file's own name.
    fn verify_sidecar(
        &self,
        file: &Path,
        sidecar: &Path,
        algorithm: DigestAlgorithm,
    ) -> Result<(), ChecksumError>;
}
