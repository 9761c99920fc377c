//! Store Capability Module
//!
//! The seam between the router and its backing stores.

use std::time::Duration;

use async_trait::async_trait;

use crate::cache::RepoKey;
use crate::error::Result;

// == Store Trait ==
/// A key-value store holding serialized payloads.
///
/// Each store decides how to lay a `RepoKey` out. Values are JSON text.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name used in logs and responses.
    fn name(&self) -> &'static str;

    /// Returns the stored value, or `None` if absent or expired.
    async fn get(&self, key: &RepoKey) -> Result<Option<String>>;

    /// Stores a value, overwriting any previous one.
    ///
    /// `ttl` is a retention hint; stores without expiry ignore it.
    async fn set(&self, key: &RepoKey, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Removes a value. Deleting an absent key is not an error.
    async fn delete(&self, key: &RepoKey) -> Result<()>;

    /// Returns true if a non-expired value exists.
    async fn exists(&self, key: &RepoKey) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Lightweight connectivity check used by the availability probe.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
