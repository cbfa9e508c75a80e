//! SHA-2 digests of local files, computed on demand after the transfer.

use sha2::{Digest, Sha256, Sha512};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use super::list::{find_entry, matches_algorithm, parse_checksum_list};
use super::{ChecksumError, DigestAlgorithm, Digester};

const BUF_SIZE: usize = 64 * 1024;

/// Compute the digest of a file as lowercase hex.
/// Reads in chunks to keep memory use bounded; suitable for multi-GB images.
pub fn file_digest(path: &Path, algorithm: DigestAlgorithm) -> io::Result<String> {
    match algorithm {
        DigestAlgorithm::Sha256 => hash_with::<Sha256>(path),
        DigestAlgorithm::Sha512 => hash_with::<Sha512>(path),
    }
}

fn hash_with<D: Digest>(path: &Path) -> io::Result<String> {
    let mut f = File::open(path)?;
    let mut hasher = D::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// `Digester` backed by the `sha2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha2Digester;

impl Sha2Digester {
    fn compare(
        &self,
        file: &Path,
        algorithm: DigestAlgorithm,
        expected: &str,
    ) -> Result<(), ChecksumError> {
        tracing::debug!("computing {} of {}", algorithm, file.display());
        let actual = file_digest(file, algorithm).map_err(|source| ChecksumError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        if actual.eq_ignore_ascii_case(expected) {
            tracing::debug!("{} ok for {}: {}", algorithm, file.display(), actual);
            Ok(())
        } else {
            Err(ChecksumError::Mismatch {
                file: display_name(file),
                algorithm,
                expected: expected.to_ascii_lowercase(),
                actual,
            })
        }
    }
}

impl Digester for Sha2Digester {
    fn verify_listed(
        &self,
        file: &Path,
        list: &Path,
        algorithm: DigestAlgorithm,
        name: &str,
    ) -> Result<(), ChecksumError> {
        let text = read_list(list)?;
        let entries = parse_checksum_list(&text);
        let entry =
            find_entry(&entries, name, algorithm).ok_or_else(|| ChecksumError::MissingEntry {
                file: name.to_string(),
                list: list.to_path_buf(),
                algorithm,
            })?;
        self.compare(file, algorithm, &entry.digest)
    }

    fn verify_sidecar(
        &self,
        file: &Path,
        sidecar: &Path,
        algorithm: DigestAlgorithm,
    ) -> Result<(), ChecksumError> {
        let text = read_list(sidecar)?;
        let entries = parse_checksum_list(&text);
        let name = display_name(file);
        let entry = find_entry(&entries, &name, algorithm)
            .or_else(|| {
                entries
                    .iter()
                    .find(|e| e.name.is_empty() && matches_algorithm(e, algorithm))
            })
            .ok_or_else(|| ChecksumError::MissingEntry {
                file: name.clone(),
                list: sidecar.to_path_buf(),
                algorithm,
            })?;
        self.compare(file, algorithm, &entry.digest)
    }
}

fn read_list(path: &Path) -> Result<String, ChecksumError> {
    let bytes = fs::read(path).map_err(|source| ChecksumError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
