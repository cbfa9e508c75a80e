//! Resolved download recipe: what to fetch for one distribution and how to
//! verify it. Built by the catalog; immutable afterwards.

use std::path::Path;

use crate::catalog::Distro;
use crate::digest::DigestAlgorithm;
use crate::error::Error;
use crate::signature::KeyLookup;
use crate::url_model;

/// A remote file and the local name it is saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub url: String,
    pub filename: String,
}

impl Artifact {
    /// Artifact saved under the last path segment of `url`.
    pub fn from_url(url: impl Into<String>) -> Result<Self, Error> {
        let url = url.into();
        url_model::validate(&url)?;
        let filename = url_model::filename_from_url_path(&url)
            .ok_or_else(|| Error::Config(format!("URL has no file name: {}", url)))?;
        Ok(Self { url, filename })
    }

    /// Artifact at `base/name`, saved as `name`.
    pub fn in_dir(base: &str, name: &str) -> Result<Self, Error> {
        let url = url_model::join(base, name);
        url_model::validate(&url)?;
        Ok(Self {
            url,
            filename: name.to_string(),
        })
    }

    pub fn local_path(&self, dir: &Path) -> std::path::PathBuf {
        dir.join(&self.filename)
    }
}

/// Published digest material for the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumSource {
    /// The vendor publishes nothing to check against.
    None,
    /// A list covering several files; only the image's entry is consulted.
    List {
        artifact: Artifact,
        algorithm: DigestAlgorithm,
    },
    /// A per-image file holding just this image's digest.
    Sidecar {
        artifact: Artifact,
        algorithm: DigestAlgorithm,
    },
}

impl ChecksumSource {
    pub fn artifact(&self) -> Option<&Artifact> {
        match self {
            ChecksumSource::None => None,
            ChecksumSource::List { artifact, .. } | ChecksumSource::Sidecar { artifact, .. } => {
                Some(artifact)
            }
        }
    }
}

/// Which file a detached signature covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedTarget {
    ChecksumList,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureScheme {
    None,
    Detached {
        artifact: Artifact,
        target: SignedTarget,
    },
    /// The checksum list carries an inline OpenPGP signature.
    Clearsigned,
}

impl SignatureScheme {
    pub fn is_signed(&self) -> bool {
        !matches!(self, SignatureScheme::None)
    }
}

/// Where the signing key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    None,
    /// Key file published by the vendor; downloaded next to the image.
    Url(Artifact),
    /// Key fetched into the keyring by fingerprint or WKD address.
    Lookup(KeyLookup),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub distro: Distro,
    pub image: Artifact,
    pub checksum: ChecksumSource,
    pub signature: SignatureScheme,
    pub key: KeySource,
}

impl Recipe {
    /// Output subdirectory under the run's base directory.
    pub fn dir_name(&self) -> &'static str {
        self.distro.name()
    }

    /// Every URL the recipe touches, in fetch order.
    pub fn urls(&self) -> Vec<&str> {
        let mut urls = Vec::with_capacity(4);
        if let Some(a) = self.checksum.artifact() {
            urls.push(a.url.as_str());
        }
        if let SignatureScheme::Detached { artifact, .. } = &self.signature {
            urls.push(artifact.url.as_str());
        }
        if let KeySource::Url(a) = &self.key {
            urls.push(a.url.as_str());
        }
        urls.push(self.image.url.as_str());
        urls
    }

    /// Structural checks: a signature needs a key, and anything that signs
    /// the checksum list needs a checksum list.
    pub fn validate(&self) -> Result<(), Error> {
        let name = self.distro.name();
        if self.signature.is_signed() && self.key == KeySource::None {
            return Err(Error::Config(format!(
                "{}: signature declared without a signing key source",
                name
            )));
        }
        let signs_list = matches!(
            self.signature,
            SignatureScheme::Clearsigned
                | SignatureScheme::Detached {
                    target: SignedTarget::ChecksumList,
                    ..
                }
        );
        if signs_list && !matches!(self.checksum, ChecksumSource::List { .. }) {
            return Err(Error::Config(format!(
                "{}: signature covers a checksum list the recipe does not declare",
                name
            )));
        }
        Ok(())
    }
}
