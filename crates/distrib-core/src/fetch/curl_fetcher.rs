//! Single-stream GET via libcurl with skip-if-unchanged support.

use curl::easy::{Easy, TimeCondition};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::head::{self, HeadResult};
use super::progress::TransferProgress;
use super::{temp_path, FetchMode, FetchOutcome, Fetcher};
use crate::retry::{run_with_retry, FetchError, RetryPolicy};

/// `Fetcher` backed by the curl crate. Blocking; one transfer at a time.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    retry: RetryPolicy,
    show_progress: bool,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl CurlFetcher {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            retry,
            show_progress: true,
        }
    }

    /// Disable the stderr progress line.
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str, dest: &Path, mode: FetchMode) -> Result<FetchOutcome, FetchError> {
        let since = match mode {
            FetchMode::IfNewer => local_mtime(dest),
            FetchMode::Always => None,
        };
        run_with_retry(&self.retry, || {
            download(url, dest, since, self.show_progress)
        })
    }

    fn probe(&self, url: &str) -> Result<HeadResult, FetchError> {
        run_with_retry(&self.retry, || head::probe(url))
    }
}

fn local_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path)
        .ok()
        .filter(|m| m.is_file())
        .and_then(|m| m.modified().ok())
}

fn discard(part: &Path) {
    if part.exists() {
        if let Err(e) = fs::remove_file(part) {
            tracing::debug!("could not remove {}: {}", part.display(), e);
        }
    }
}

/// One transfer attempt. The body is written to `<dest>.part`, created on
/// the first received chunk so a 304 leaves no trace on disk.
fn download(
    url: &str,
    dest: &Path,
    since: Option<SystemTime>,
    show_progress: bool,
) -> Result<FetchOutcome, FetchError> {
    let part = temp_path(dest);
    let mut out: Option<BufWriter<File>> = None;
    let mut written: u64 = 0;
    let mut write_error: Option<std::io::Error> = None;
    let mut progress = show_progress.then(|| {
        TransferProgress::new(
            dest.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| url.to_string()),
        )
    });

    let mut easy = Easy::new();
    easy.url(url).map_err(FetchError::Curl)?;
    easy.follow_location(true).map_err(FetchError::Curl)?;
    easy.max_redirections(10).map_err(FetchError::Curl)?;
    easy.connect_timeout(Duration::from_secs(30))
        .map_err(FetchError::Curl)?;
    // Abort if throughput drops below 1 KiB/s for 60s instead of a hard
    // wall-clock limit, which multi-GB images on slow links would hit.
    easy.low_speed_limit(1024).map_err(FetchError::Curl)?;
    easy.low_speed_time(Duration::from_secs(60))
        .map_err(FetchError::Curl)?;
    easy.fetch_filetime(true).map_err(FetchError::Curl)?;
    if let Some(t) = since {
        let secs = t
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        easy.time_condition(TimeCondition::IfModifiedSince)
            .map_err(FetchError::Curl)?;
        easy.time_value(secs).map_err(FetchError::Curl)?;
    }
    easy.progress(progress.is_some()).map_err(FetchError::Curl)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                if out.is_none() {
                    match File::create(&part) {
                        Ok(f) => out = Some(BufWriter::new(f)),
                        Err(e) => {
                            write_error = Some(e);
                            return Ok(0); // abort transfer
                        }
                    }
                }
                let Some(w) = out.as_mut() else {
                    return Ok(0);
                };
                match w.write_all(data) {
                    Ok(()) => {
                        written += data.len() as u64;
                        Ok(data.len())
                    }
                    Err(e) => {
                        write_error = Some(e);
                        Ok(0)
                    }
                }
            })
            .map_err(FetchError::Curl)?;
        transfer
            .progress_function(|dltotal, dlnow, _, _| {
                if let Some(p) = progress.as_mut() {
                    p.update(dlnow as u64, dltotal as u64);
                }
                true
            })
            .map_err(FetchError::Curl)?;
        transfer.perform()
    };

    if let Some(p) = &progress {
        p.finish();
    }
    if let Some(e) = write_error {
        drop(out.take());
        discard(&part);
        return Err(FetchError::Io(e));
    }
    if let Err(e) = performed {
        drop(out.take());
        discard(&part);
        return Err(FetchError::Curl(e));
    }

    let code = easy.response_code().map_err(FetchError::Curl)?;
    if since.is_some() {
        let unmet = easy.time_condition_unmet().map_err(FetchError::Curl)?;
        if code == 304 || unmet {
            drop(out.take());
            discard(&part);
            tracing::debug!(url, "remote not newer than {}", dest.display());
            return Ok(FetchOutcome::Unchanged);
        }
    }
    if !head::is_success(url, code) {
        drop(out.take());
        discard(&part);
        return Err(head::status_error(url, code));
    }

    let expected = easy.content_length_download().map_err(FetchError::Curl)?;
    if expected >= 0.0 && written != expected as u64 {
        drop(out.take());
        discard(&part);
        return Err(FetchError::PartialTransfer {
            expected: expected as u64,
            received: written,
        });
    }
    let filetime = easy.filetime().map_err(FetchError::Curl)?;

    let file = match out.take() {
        Some(w) => w.into_inner().map_err(|e| FetchError::Io(e.into_error()))?,
        // Empty body: nothing triggered the lazy create.
        None => File::create(&part).map_err(FetchError::Io)?,
    };
    // Stamp the remote modification time so the next run can skip this file.
    if let Some(secs) = filetime.filter(|s| *s >= 0) {
        if let Err(e) = file.set_modified(UNIX_EPOCH + Duration::from_secs(secs as u64)) {
            tracing::debug!("could not set mtime on {}: {}", part.display(), e);
        }
    }
    drop(file);
    fs::rename(&part, dest).map_err(FetchError::Io)?;

    tracing::info!(url, dest = %dest.display(), bytes = written, "downloaded");
    Ok(FetchOutcome::Downloaded { bytes: written })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mtime_missing_file() {
        assert!(local_mtime(Path::new("/nonexistent/dir/file.iso")).is_none());
    }

    #[test]
    fn local_mtime_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(local_mtime(dir.path()).is_none());
    }

    #[test]
    fn discard_removes_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let part = temp_path(&dir.path().join("x.iso"));
        fs::write(&part, b"partial").unwrap();
        discard(&part);
        assert!(!part.exists());
    }
}
