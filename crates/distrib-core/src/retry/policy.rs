use crate::config::RetryConfig;
use crate::error::Error;
use std::time::Duration;

/// Why a transfer attempt failed, as far as retrying is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect or low-speed timeout.
    Timeout,
    /// Mirror asked us to back off (HTTP 429/503, FTP 421).
    Throttled,
    /// DNS, refused or reset connection, short body.
    Connection,
    /// Server-side HTTP failure other than throttling.
    Http5xx(u16),
    /// Not worth repeating: 4xx, missing FTP file, local disk errors.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    NoRetry,
    RetryAfter(Duration),
}

/// Exponential backoff with a ceiling, applied per transfer.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts per transfer, the first one included.
    pub max_attempts: u32,
    /// Delay after the first failure; doubled after each further one.
    pub base_delay: Duration,
    pub max_delay: Duration,
}

/// Same values as an absent `[retry]` section in config.toml.
impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Rejects a `base_delay_secs` that is NaN, infinite or too large for a
/// `Duration`. Negative delays clamp to zero.
impl TryFrom<&RetryConfig> for RetryPolicy {
    type Error = Error;

    fn try_from(cfg: &RetryConfig) -> Result<Self, Error> {
        let base_delay = Duration::try_from_secs_f64(cfg.base_delay_secs.max(0.0))
            .ok()
            .filter(|_| !cfg.base_delay_secs.is_nan())
            .ok_or_else(|| {
                Error::Config(format!(
                    "invalid retry.base_delay_secs: {}",
                    cfg.base_delay_secs
                ))
            })?;
        Ok(Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay,
            max_delay: Duration::from_secs(cfg.max_delay_secs),
        })
    }
}

impl RetryPolicy {
    /// `failed_attempt` is 1-based: the attempt that just failed.
    pub fn decide(&self, failed_attempt: u32, kind: ErrorKind) -> RetryDecision {
        if failed_attempt >= self.max_attempts || kind == ErrorKind::Other {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.backoff(failed_attempt))
    }

    fn backoff(&self, failed_attempt: u32) -> Duration {
        let doublings = failed_attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << doublings)
            .min(self.max_delay)
    }
}
