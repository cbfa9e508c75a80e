//! In-memory capability fakes that record every call, for orchestrator and
//! dispatcher tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::digest::{ChecksumError, DigestAlgorithm, Digester, Sha2Digester};
use crate::fetch::{FetchMode, FetchOutcome, Fetcher, HeadResult};
use crate::retry::FetchError;
use crate::signature::{KeyLookup, SignatureError, SignatureVerifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Fetch(String),
    Probe(String),
    ImportKey(String),
    LocateKey(String),
    VerifyDetached { signed: String, signature: String },
    VerifyClearsigned(String),
    VerifyListed(String),
    VerifySidecar(String),
}

impl Call {
    pub(crate) fn is_verification(&self) -> bool {
        !matches!(self, Call::Fetch(_) | Call::Probe(_))
    }
}

pub(crate) type CallLog = Rc<RefCell<Vec<Call>>>;

/// `Last-Modified` reported for every reachable URL.
pub(crate) const LAST_MODIFIED: &str = "Sat, 14 Jun 2025 10:12:00 GMT";

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Serves configured bodies (or a default payload). An existing file with
/// `FetchMode::IfNewer` counts as unchanged on the remote.
#[derive(Debug, Default)]
pub(crate) struct FakeFetcher {
    pub log: CallLog,
    pub bodies: HashMap<String, Vec<u8>>,
    pub failing: HashSet<String>,
    /// URLs that report success without writing anything.
    pub phantom: HashSet<String>,
    pub transfers: Cell<usize>,
}

impl FakeFetcher {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn serve(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn phantom(mut self, url: &str) -> Self {
        self.phantom.insert(url.to_string());
        self
    }
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, url: &str, dest: &Path, mode: FetchMode) -> Result<FetchOutcome, FetchError> {
        self.log.borrow_mut().push(Call::Fetch(name_of(dest)));
        if self.failing.contains(url) {
            return Err(FetchError::Http(404));
        }
        if self.phantom.contains(url) {
            return Ok(FetchOutcome::Downloaded { bytes: 0 });
        }
        if mode == FetchMode::IfNewer && dest.exists() {
            return Ok(FetchOutcome::Unchanged);
        }
        let body = self
            .bodies
            .get(url)
            .cloned()
            .unwrap_or_else(|| b"payload".to_vec());
        fs::write(dest, &body).map_err(FetchError::Io)?;
        self.transfers.set(self.transfers.get() + 1);
        Ok(FetchOutcome::Downloaded {
            bytes: body.len() as u64,
        })
    }

    fn probe(&self, url: &str) -> Result<HeadResult, FetchError> {
        self.log.borrow_mut().push(Call::Probe(url.to_string()));
        if self.failing.contains(url) {
            return Err(FetchError::Http(404));
        }
        Ok(HeadResult {
            status: 200,
            content_length: self.bodies.get(url).map(|b| b.len() as u64),
            last_modified: Some(LAST_MODIFIED.to_string()),
        })
    }
}

/// Records calls; either accepts everything or delegates to the real digester.
#[derive(Debug, Default)]
pub(crate) struct FakeDigester {
    pub log: CallLog,
    pub accept_all: bool,
}

impl FakeDigester {
    pub fn real(log: CallLog) -> Self {
        Self {
            log,
            accept_all: false,
        }
    }

    pub fn accepting(log: CallLog) -> Self {
        Self {
            log,
            accept_all: true,
        }
    }
}

impl Digester for FakeDigester {
    fn verify_listed(
        &self,
        file: &Path,
        list: &Path,
        algorithm: DigestAlgorithm,
        name: &str,
    ) -> Result<(), ChecksumError> {
        self.log
            .borrow_mut()
            .push(Call::VerifyListed(name.to_string()));
        if self.accept_all {
            return Ok(());
        }
        Sha2Digester.verify_listed(file, list, algorithm, name)
    }

    fn verify_sidecar(
        &self,
        file: &Path,
        sidecar: &Path,
        algorithm: DigestAlgorithm,
    ) -> Result<(), ChecksumError> {
        self.log
            .borrow_mut()
            .push(Call::VerifySidecar(name_of(file)));
        if self.accept_all {
            return Ok(());
        }
        Sha2Digester.verify_sidecar(file, sidecar, algorithm)
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeVerifier {
    pub log: CallLog,
    pub reject: bool,
}

impl FakeVerifier {
    pub fn new(log: CallLog) -> Self {
        Self { log, reject: false }
    }

    pub fn rejecting(log: CallLog) -> Self {
        Self { log, reject: true }
    }

    fn outcome(&self) -> Result<(), SignatureError> {
        if self.reject {
            return Err(SignatureError::Rejected {
                action: "signature check",
                status: "exit status: 1".into(),
                stderr: "BAD signature".into(),
            });
        }
        Ok(())
    }
}

impl SignatureVerifier for FakeVerifier {
    fn import_key(&self, key_file: &Path) -> Result<(), SignatureError> {
        self.log
            .borrow_mut()
            .push(Call::ImportKey(name_of(key_file)));
        Ok(())
    }

    fn locate_key(&self, lookup: &KeyLookup) -> Result<(), SignatureError> {
        self.log
            .borrow_mut()
            .push(Call::LocateKey(lookup.to_string()));
        Ok(())
    }

    fn verify_detached(&self, signed: &Path, signature: &Path) -> Result<(), SignatureError> {
        self.log.borrow_mut().push(Call::VerifyDetached {
            signed: name_of(signed),
            signature: name_of(signature),
        });
        self.outcome()
    }

    fn verify_clearsigned(&self, signed: &Path) -> Result<(), SignatureError> {
        self.log
            .borrow_mut()
            .push(Call::VerifyClearsigned(name_of(signed)));
        self.outcome()
    }
}

/// Lowercase hex SHA-256 of `data`.
pub(crate) fn sha256_hex(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    hex::encode(Sha256::digest(data))
}

/// Number of entries (files and directories) below `dir`, recursively.
pub(crate) fn count_entries(dir: &Path) -> usize {
    match fs::read_dir(dir) {
        Ok(rd) => rd
            .flatten()
            .map(|e| 1 + count_entries(&e.path()))
            .sum(),
        Err(_) => 0,
    }
}
