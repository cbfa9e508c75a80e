//! Fetch capability: retrieve a URL to a local path, or probe it.
//!
//! Transfers go to `<dest>.part` and are renamed into place only after a
//! complete, successful response, so an interrupted run never leaves a
//! truncated file under the final name.

mod curl_fetcher;
mod head;
mod progress;

use std::path::{Path, PathBuf};

use crate::retry::FetchError;

pub use curl_fetcher::CurlFetcher;
pub use head::{parse_headers, HeadResult};
pub use progress::TransferProgress;

/// Whether an existing local copy may be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Skip the transfer when the remote is not newer than the local file.
    #[default]
    IfNewer,
    /// Always transfer.
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded { bytes: u64 },
    /// Remote unchanged since the local copy; nothing was written.
    Unchanged,
}

/// Retrieves remote resources.
pub trait Fetcher {
    /// Download `url` to `dest`.
    fn fetch(&self, url: &str, dest: &Path, mode: FetchMode) -> Result<FetchOutcome, FetchError>;

    /// Check that `url` is reachable without downloading the body or
    /// touching the filesystem.
    fn probe(&self, url: &str) -> Result<HeadResult, FetchError>;
}

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `file.iso` → `file.iso.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("file.iso"));
        assert_eq!(p.to_string_lossy(), "file.iso.part");
        let p2 = temp_path(Path::new("/tmp/SHA512SUMS"));
        assert_eq!(p2.to_string_lossy(), "/tmp/SHA512SUMS.part");
    }

    #[test]
    fn default_mode_is_if_newer() {
        assert_eq!(FetchMode::default(), FetchMode::IfNewer);
    }
}
