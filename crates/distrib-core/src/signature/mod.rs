//! Signature capability: detached and inline OpenPGP verification.

mod gpg;

use std::fmt;
use std::path::Path;
use thiserror::Error;

pub use gpg::GpgVerifier;

/// Where a signing key is looked up when the vendor does not ship a key file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLookup {
    /// Fetch by full fingerprint from a keyserver.
    Keyserver {
        server: &'static str,
        fingerprint: &'static str,
    },
    /// Resolve via Web Key Directory from the signer's address.
    Wkd { email: &'static str },
}

impl fmt::Display for KeyLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyLookup::Keyserver {
                server,
                fingerprint,
            } => write!(f, "{} from {}", fingerprint, server),
            KeyLookup::Wkd { email } => write!(f, "WKD {}", email),
        }
    }
}

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{action} failed ({status}): {stderr}")]
    Rejected {
        action: &'static str,
        status: String,
        stderr: String,
    },
}

/// Verifies OpenPGP signatures against trusted keys.
pub trait SignatureVerifier {
    /// Import a key file into the trusted keyring.
    fn import_key(&self, key_file: &Path) -> Result<(), SignatureError>;

    /// Fetch a key from a keyserver or WKD into the trusted keyring.
    fn locate_key(&self, lookup: &KeyLookup) -> Result<(), SignatureError>;

    /// Verify `signature` as a detached signature over `signed`.
    fn verify_detached(&self, signed: &Path, signature: &Path) -> Result<(), SignatureError>;

    /// Verify a file carrying its own inline (clearsigned) signature.
    fn verify_clearsigned(&self, signed: &Path) -> Result<(), SignatureError>;
}
