//! Request DTOs for the cache API
//!
//! Defines the path parameters shared by the `/cache/:owner/:repo` routes.
//! Payload bodies are free-form JSON and need no DTO.

use serde::Deserialize;

use crate::cache::RepoKey;
use crate::error::Result;

/// Path parameters of `/cache/:owner/:repo`
#[derive(Debug, Clone, Deserialize)]
pub struct RepoPath {
    /// Repository owner (user or organisation)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoPath {
    /// Validates the parameters into a cache key.
    pub fn key(&self) -> Result<RepoKey> {
        RepoKey::new(self.owner.as_str(), self.repo.as_str())
    }
}
