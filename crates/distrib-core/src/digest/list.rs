//! Checksum list parsing.
//!
//! Understands the formats vendors actually publish:
//! - GNU coreutils: `<hex>  <name>` or `<hex> *<name>` (binary mode)
//! - BSD tagged: `SHA512 (<name>) = <hex>`
//! - bare digest on its own line (single-file sidecars)
//!
//! Blank lines, `#` comments and OpenPGP clearsign armour are skipped, as is
//! anything after the signature block begins. Lines that parse as none of the
//! above are ignored rather than treated as errors.

use super::DigestAlgorithm;

/// One line of a checksum list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    /// File name as written in the list (empty for a bare digest).
    pub name: String,
    /// Lowercase hex digest.
    pub digest: String,
    /// BSD algorithm tag, if the line had one.
    pub tag: Option<String>,
}

/// Parse every recognizable entry from a checksum list.
pub fn parse_checksum_list(text: &str) -> Vec<ChecksumEntry> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.starts_with("-----BEGIN PGP SIGNATURE") {
            break;
        }
        if line.is_empty() || line.starts_with('#') || line.starts_with("-----") {
            continue;
        }
        // Clearsign header, e.g. "Hash: SHA256".
        if line.starts_with("Hash:") {
            continue;
        }
        if let Some(entry) = parse_bsd_line(line).or_else(|| parse_gnu_line(line)) {
            entries.push(entry);
        }
    }
    entries
}

/// Find the entry for `name` that matches `algorithm`. Entries with a
/// different BSD tag or a digest of the wrong length are skipped, so lists
/// that mix algorithms resolve to the right line.
pub fn find_entry<'a>(
    entries: &'a [ChecksumEntry],
    name: &str,
    algorithm: DigestAlgorithm,
) -> Option<&'a ChecksumEntry> {
    let wanted = normalize_name(name);
    entries
        .iter()
        .filter(|e| matches_algorithm(e, algorithm))
        .find(|e| normalize_name(&e.name) == wanted)
}

pub(super) fn matches_algorithm(entry: &ChecksumEntry, algorithm: DigestAlgorithm) -> bool {
    if entry.digest.len() != algorithm.hex_len() {
        return false;
    }
    match &entry.tag {
        Some(tag) => tag.eq_ignore_ascii_case(algorithm.bsd_tag()),
        None => true,
    }
}

fn normalize_name(name: &str) -> &str {
    name.trim_start_matches("./")
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// `TAG (name) = hex`
fn parse_bsd_line(line: &str) -> Option<ChecksumEntry> {
    let (tag, rest) = line.split_once(" (")?;
    let (name, digest) = rest.rsplit_once(") = ")?;
    let tag = tag.trim();
    let digest = digest.trim();
    if tag.is_empty() || tag.contains(char::is_whitespace) || !is_hex(digest) {
        return None;
    }
    Some(ChecksumEntry {
        name: name.to_string(),
        digest: digest.to_ascii_lowercase(),
        tag: Some(tag.to_string()),
    })
}

/// `hex  name`, `hex *name`, or a bare `hex`.
fn parse_gnu_line(line: &str) -> Option<ChecksumEntry> {
    let (digest, name) = match line.split_once(char::is_whitespace) {
        Some((d, n)) => (d, n.trim_start()),
        None => (line, ""),
    };
    if !is_hex(digest) || digest.len() < 32 {
        return None;
    }
    let name = name.strip_prefix('*').unwrap_or(name);
    Some(ChecksumEntry {
        name: name.to_string(),
        digest: digest.to_ascii_lowercase(),
        tag: None,
    })
}
