//! `SignatureVerifier` backed by the `gpg` executable.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{KeyLookup, SignatureError, SignatureVerifier};

/// Runs `gpg` in batch mode, optionally against a dedicated home directory.
#[derive(Debug, Clone)]
pub struct GpgVerifier {
    program: OsString,
    homedir: Option<PathBuf>,
}

impl Default for GpgVerifier {
    fn default() -> Self {
        Self {
            program: OsString::from("gpg"),
            homedir: None,
        }
    }
}

impl GpgVerifier {
    pub fn new(homedir: Option<PathBuf>) -> Self {
        Self {
            homedir,
            ..Self::default()
        }
    }

    /// Use a different executable (e.g. `gpg2`).
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub(crate) fn base_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--batch".into(), "--keyid-format".into(), "0xlong".into()];
        if let Some(home) = &self.homedir {
            args.push("--homedir".into());
            args.push(home.as_os_str().to_owned());
        }
        args
    }

    fn run(&self, action: &'static str, args: &[OsString]) -> Result<(), SignatureError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.base_args()).args(args);
        tracing::debug!(?cmd, "running gpg for {}", action);

        let output = cmd.output().map_err(|source| SignatureError::Spawn {
            program: self.program.to_string_lossy().into_owned(),
            source,
        })?;

        // gpg reports signer identity on stderr; pass it through so the user sees it.
        let _ = std::io::stderr().write_all(&output.stderr);

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::warn!(status = %output.status, "gpg {} failed", action);
        Err(SignatureError::Rejected {
            action,
            status: output.status.to_string(),
            stderr,
        })
    }
}

pub(crate) fn lookup_args(lookup: &KeyLookup) -> Vec<OsString> {
    match lookup {
        KeyLookup::Keyserver {
            server,
            fingerprint,
        } => vec![
            "--keyserver".into(),
            (*server).into(),
            "--recv-keys".into(),
            (*fingerprint).into(),
        ],
        KeyLookup::Wkd { email } => vec![
            "--auto-key-locate".into(),
            "clear,wkd".into(),
            "--locate-external-keys".into(),
            (*email).into(),
        ],
    }
}

impl SignatureVerifier for GpgVerifier {
    fn import_key(&self, key_file: &Path) -> Result<(), SignatureError> {
        self.run("key import", &["--import".into(), key_file.into()])
    }

    fn locate_key(&self, lookup: &KeyLookup) -> Result<(), SignatureError> {
        self.run("key lookup", &lookup_args(lookup))
    }

    fn verify_detached(&self, signed: &Path, signature: &Path) -> Result<(), SignatureError> {
        self.run(
            "signature check",
            &["--verify".into(), signature.into(), signed.into()],
        )
    }

    fn verify_clearsigned(&self, signed: &Path) -> Result<(), SignatureError> {
        self.run("signature check", &["--verify".into(), signed.into()])
    }
}
