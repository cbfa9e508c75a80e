//! Tests for option flags.

use super::parse;
use crate::cli::Cli;
use clap::Parser;
use distrib_core::fetch::FetchMode;
use std::path::Path;

#[test]
fn cli_parse_defaults() {
    let cli = parse(&["distrib-dl"]);
    assert!(!cli.check);
    assert!(!cli.no_verify);
    assert!(!cli.force);
    assert!(!cli.list);
    assert_eq!(cli.dir, Path::new("."));
    assert_eq!(cli.fetch_mode(), FetchMode::IfNewer);
    assert!(cli.distributions.is_empty());
}

#[test]
fn cli_parse_check_short_and_long() {
    assert!(parse(&["distrib-dl", "-c"]).check);
    assert!(parse(&["distrib-dl", "--check", "kali"]).check);
}

#[test]
fn cli_parse_dir() {
    let cli = parse(&["distrib-dl", "-d", "/srv/iso", "debian"]);
    assert_eq!(cli.dir, Path::new("/srv/iso"));
    let cli = parse(&["distrib-dl", "--dir", "/tmp/x"]);
    assert_eq!(cli.dir, Path::new("/tmp/x"));
}

#[test]
fn cli_parse_no_verify() {
    let cli = parse(&["distrib-dl", "--no-verify", "ubuntu"]);
    assert!(cli.no_verify);
    assert_eq!(cli.distributions, vec!["ubuntu"]);
}

#[test]
fn cli_parse_force_always_fetches() {
    let cli = parse(&["distrib-dl", "--force"]);
    assert!(cli.force);
    assert_eq!(cli.fetch_mode(), FetchMode::Always);
}

#[test]
fn cli_parse_list() {
    assert!(parse(&["distrib-dl", "--list"]).list);
}

#[test]
fn cli_rejects_unknown_flag() {
    assert!(Cli::try_parse_from(["distrib-dl", "--verify-harder"]).is_err());
}

#[test]
fn cli_dir_requires_value() {
    assert!(Cli::try_parse_from(["distrib-dl", "--dir"]).is_err());
}
