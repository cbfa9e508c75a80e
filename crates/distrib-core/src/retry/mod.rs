//! Retry and backoff policy for transfers.
//!
//! Classifies curl and HTTP failures (timeouts, throttling, connection
//! errors) and decides exponential backoff, so the fetch capability can
//! recover from flaky mirrors without the orchestrator knowing about it.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_ftp_reply, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
