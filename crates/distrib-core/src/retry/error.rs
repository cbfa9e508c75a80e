//! Transfer error type for retry classification.

use std::fmt;

/// Error returned by a single transfer attempt (curl failure, HTTP error, or
/// local write failure). Kept separate from the crate error so attempts can
/// be classified before the orchestrator sees them.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-success status.
    Http(u32),
    /// FTP server answered with an error reply (e.g. 550, no such file).
    FtpReply(u32),
    /// Transfer ended before `Content-Length` bytes arrived.
    PartialTransfer { expected: u64, received: u64 },
    /// Writing the local file failed. Not retried.
    Io(std::io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::FtpReply(code) => write!(f, "FTP reply {}", code),
            FetchError::PartialTransfer { expected, received } => {
                write!(
                    f,
                    "partial transfer: expected {} bytes, got {}",
                    expected, received
                )
            }
            FetchError::Io(e) => write!(f, "local file: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Io(e) => Some(e),
            FetchError::Http(_)
            | FetchError::FtpReply(_)
            | FetchError::PartialTransfer { .. } => None,
        }
    }
}
