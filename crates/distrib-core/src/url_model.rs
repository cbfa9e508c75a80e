//! URL joining and filename derivation for recipe artifacts.

use crate::error::Error;

/// Extracts the last path segment from a URL for use as a local filename.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Joins a mirror base URL and a file name with exactly one `/` between them.
pub fn join(base: &str, name: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        name.trim_start_matches('/')
    )
}

/// Checks that `url` is an absolute http(s) or ftp URL.
pub fn validate(url: &str) -> Result<url::Url, Error> {
    let parsed =
        url::Url::parse(url).map_err(|e| Error::Config(format!("invalid URL {}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" | "ftp" => Ok(parsed),
        other => Err(Error::Config(format!(
            "unsupported URL scheme '{}' in {}",
            other, url
        ))),
    }
}
