//! HTTP HEAD / metadata probing.
//!
//! Used by check-only runs to confirm a URL answers without transferring the
//! body. Captures `Content-Length` and `Last-Modified` for the report.

use std::str;
use std::time::Duration;

use crate::retry::FetchError;

/// Result of a HEAD request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadResult {
    /// Final status code after redirects.
    pub status: u32,
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// `Last-Modified` value if present.
    pub last_modified: Option<String>,
}

/// Performs a HEAD request and returns parsed metadata.
///
/// Follows redirects. FTP URLs are probed with curl's no-body mode, which
/// checks the file exists and reports its size.
pub(crate) fn probe(url: &str) -> Result<HeadResult, FetchError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::Curl)?;
    easy.nobody(true).map_err(FetchError::Curl)?; // HEAD request
    easy.follow_location(true).map_err(FetchError::Curl)?;
    easy.connect_timeout(Duration::from_secs(15))
        .map_err(FetchError::Curl)?;
    easy.timeout(Duration::from_secs(30))
        .map_err(FetchError::Curl)?;

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(FetchError::Curl)?;
        transfer.perform().map_err(FetchError::Curl)?;
    }

    let code = easy.response_code().map_err(FetchError::Curl)?;
    if !is_success(url, code) {
        return Err(status_error(url, code));
    }

    let mut result = parse_headers(&headers);
    result.status = code;
    Ok(result)
}

/// HTTP needs a 2xx; FTP reports its own reply codes, anything below 400 is fine.
pub(crate) fn is_success(url: &str, code: u32) -> bool {
    if url.starts_with("ftp://") {
        return code < 400;
    }
    (200..300).contains(&code)
}

pub(crate) fn status_error(url: &str, code: u32) -> FetchError {
    if url.starts_with("ftp://") {
        FetchError::FtpReply(code)
    } else {
        FetchError::Http(code)
    }
}

/// Parse collected header lines into a HeadResult.
///
/// With redirects, headers of every hop are collected; later values win.
pub fn parse_headers(lines: &[String]) -> HeadResult {
    let mut result = HeadResult::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    result.content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("last-modified") {
                result.last_modified = Some(value.to_string());
            }
        }
    }

    result
}
