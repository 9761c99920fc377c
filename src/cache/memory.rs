//! In-Memory Store Module
//!
//! HashMap-backed store with per-entry TTL. Stands in for either tier in
//! tests that need no Redis server or file system.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheEntry, RepoKey, Store};
use crate::error::Result;

// == Memory Store ==
/// In-process store honouring the TTL hint.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (non-expired) entries.
    pub async fn len(&self) -> usize {
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &RepoKey) -> Result<Option<String>> {
        let storage_key = key.storage_key();
        {
            let entries = self.entries.read().await;
            match entries.get(&storage_key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: remove lazily, unless it was rewritten in between
        let mut entries = self.entries.write().await;
        if entries
            .get(&storage_key)
            .is_some_and(|entry| entry.is_expired())
        {
            entries.remove(&storage_key);
        }
        Ok(None)
    }

    async fn set(&self, key: &RepoKey, value: &str, ttl: Option<Duration>) -> Result<()> {
        let entry = CacheEntry::new(value.to_string(), ttl);
        self.entries.write().await.insert(key.storage_key(), entry);
        Ok(())
    }

    async fn delete(&self, key: &RepoKey) -> Result<()> {
        self.entries.write().await.remove(&key.storage_key());
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn key(repo: &str) -> RepoKey {
        RepoKey::new("octocat", repo).unwrap()
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();

        store.set(&key("a"), r#"{"files":1}"#, None).await.unwrap();

        assert_eq!(
            store.get(&key("a")).await.unwrap().as_deref(),
            Some(r#"{"files":1}"#)
        );
        assert!(store.exists(&key("a")).await.unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryStore::new();
        assert!(store.get(&key("missing")).await.unwrap().is_none());
        assert!(!store.exists(&key("missing")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.set(&key("a"), "1", None).await.unwrap();

        store.delete(&key("a")).await.unwrap();
        store.delete(&key("a")).await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_ttl_expiration() {
        let store = MemoryStore::new();
        store
            .set(&key("short"), "1", Some(Duration::from_millis(50)))
            .await
            .unwrap();
        store
            .set(&key("long"), "2", Some(Duration::from_secs(60)))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(store.get(&key("short")).await.unwrap().is_none());
        assert!(store.get(&key("long")).await.unwrap().is_some());
    }
}
