//! Fallback Store Module
//!
//! Two-tier composite: every operation goes to the primary first and, if the
//! primary errors, is retried once against the secondary. Deletes always reach
//! both tiers. A failing primary is never demoted; the next call tries it again.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::cache::{RepoKey, Store};
use crate::error::Result;

// == Fallback Store ==
pub struct FallbackStore {
    primary: Arc<dyn Store>,
    secondary: Arc<dyn Store>,
    fallbacks: AtomicU64,
}

impl FallbackStore {
    pub fn new(primary: Arc<dyn Store>, secondary: Arc<dyn Store>) -> Self {
        Self {
            primary,
            secondary,
            fallbacks: AtomicU64::new(0),
        }
    }

    /// How many operations were served by the secondary so far.
    pub fn fallback_count(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }

    fn degrade(&self, op: &str, key: &RepoKey, err: &dyn std::fmt::Display) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
        warn!(
            "{} {} failed on {} store, using {} store: {}",
            op,
            key,
            self.primary.name(),
            self.secondary.name(),
            err
        );
    }
}

#[async_trait]
impl Store for FallbackStore {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn get(&self, key: &RepoKey) -> Result<Option<String>> {
        match self.primary.get(key).await {
            Ok(value) => Ok(value),
            Err(err) => {
                self.degrade("get", key, &err);
                self.secondary.get(key).await
            }
        }
    }

    async fn set(&self, key: &RepoKey, value: &str, ttl: Option<Duration>) -> Result<()> {
        match self.primary.set(key, value, ttl).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.degrade("set", key, &err);
                self.secondary.set(key, value, ttl).await
            }
        }
    }

    /// Deletes from both tiers: a copy written during an earlier fallback
    /// must not resurface at the next primary outage.
    async fn delete(&self, key: &RepoKey) -> Result<()> {
        match self.primary.delete(key).await {
            Ok(()) => {
                if let Err(err) = self.secondary.delete(key).await {
                    warn!(
                        "delete {} on {} store failed, stale copy may remain: {}",
                        key,
                        self.secondary.name(),
                        err
                    );
                }
                Ok(())
            }
            Err(err) => {
                self.degrade("delete", key, &err);
                self.secondary.delete(key).await
            }
        }
    }

    async fn exists(&self, key: &RepoKey) -> Result<bool> {
        match self.primary.exists(key).await {
            Ok(exists) => Ok(exists),
            Err(err) => {
                self.degrade("exists", key, &err);
                self.secondary.exists(key).await
            }
        }
    }

    async fn ping(&self) -> Result<()> {
        self.primary.ping().await
    }
}
