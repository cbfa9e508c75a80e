//! Tests for the process exit status.

use super::parse;
use crate::cli::{exit_code, run_distributions};
use distrib_core::config::{DistribConfig, RetryConfig};

#[test]
fn success_exits_zero() {
    assert_eq!(exit_code(&Ok(true)), 0);
}

#[test]
fn failed_distribution_exits_one() {
    assert_eq!(exit_code(&Ok(false)), 1);
}

#[test]
fn fatal_error_exits_one() {
    assert_eq!(exit_code(&Err(anyhow::anyhow!("unknown distribution"))), 1);
}

#[test]
fn unknown_distribution_is_fatal() {
    let cli = parse(&["distrib-dl", "gentoo"]);
    let outcome = run_distributions(&cli, &DistribConfig::default());
    let err = outcome.as_ref().unwrap_err();
    assert!(format!("{:#}", err).contains("gentoo"));
    assert_eq!(exit_code(&outcome), 1);
}

#[test]
fn unusable_retry_delay_is_fatal() {
    let cli = parse(&["distrib-dl", "proxmox"]);
    let cfg = DistribConfig {
        retry: Some(RetryConfig {
            base_delay_secs: f64::INFINITY,
            ..RetryConfig::default()
        }),
        ..DistribConfig::default()
    };
    let outcome = run_distributions(&cli, &cfg);
    let err = outcome.as_ref().unwrap_err();
    assert!(format!("{:#}", err).contains("retry.base_delay_secs"));
    assert_eq!(exit_code(&outcome), 1);
}
