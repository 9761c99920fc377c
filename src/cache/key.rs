//! Repository Key Module
//!
//! Maps `(owner, repo)` pairs onto remote store keys and local file paths.

use std::fmt;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::cache::MAX_KEY_LENGTH;
use crate::error::{CacheError, Result};

/// Prefix of every remote store key.
pub const KEY_PREFIX: &str = "repo_data";

/// Longest escaped segment used verbatim as a path component.
///
/// Leaves room for `.json` plus the writer's temp suffix under the 255-byte
/// file name limit.
pub const MAX_FILE_SEGMENT: usize = 200;

// == Repo Key ==
/// Validated composite cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoKey {
    owner: String,
    repo: String,
}

impl RepoKey {
    // == Constructor ==
    /// Validates and builds a key.
    ///
    /// Both parts must be non-empty and at most `MAX_KEY_LENGTH` bytes.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();
        validate_part("owner", &owner)?;
        validate_part("repo", &repo)?;
        Ok(Self { owner, repo })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    // == Remote Key ==
    /// Key used in the remote store, e.g. `repo_data:octocat:Hello-World`.
    pub fn storage_key(&self) -> String {
        format!(
            "{}:{}:{}",
            KEY_PREFIX,
            escape_segment(&self.owner),
            escape_segment(&self.repo)
        )
    }

    // == File Path ==
    /// Path of the cache file under `root`: `{root}/{owner}/{repo}.json`.
    ///
    /// Segments are escaped, so the mapping is injective and never leaves `root`.
    /// Escaped segments longer than `MAX_FILE_SEGMENT` become `~{sha256}`.
    pub fn file_path(&self, root: &Path) -> PathBuf {
        root.join(file_segment(&self.owner))
            .join(format!("{}.json", file_segment(&self.repo)))
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

fn validate_part(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CacheError::InvalidKey(format!("{} cannot be empty", name)));
    }
    if value.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "{} exceeds maximum length of {} bytes",
            name, MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

/// Percent-escapes every byte outside `[A-Za-z0-9._-]`, plus a leading dot.
///
/// `%` is always escaped, so distinct inputs never share an output.
fn escape_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for (i, byte) in segment.bytes().enumerate() {
        let plain = byte.is_ascii_alphanumeric()
            || byte == b'-'
            || byte == b'_'
            || (byte == b'.' && i > 0);
        if plain {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

/// Escaped segment, or a digest of it when too long for a file name.
///
/// `~` never appears in escaped output, so digests cannot collide with it.
fn file_segment(segment: &str) -> String {
    let escaped = escape_segment(segment);
    if escaped.len() <= MAX_FILE_SEGMENT {
        return escaped;
    }
    format!("~{}", hex::encode(Sha256::digest(segment.as_bytes())))
}
