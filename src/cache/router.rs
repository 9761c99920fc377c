//! Cache Router Module
//!
//! Front door of the cache. Probes the remote store once, then routes every
//! operation to either the remote tier (with per-call fallback to the local
//! store) or the local store alone. No operation here ever fails the caller:
//! problems are logged and surface as a cache miss.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheStats, FallbackStore, FileStore, RedisStore, RepoKey, Store};
use crate::config::Config;

// == Backend ==
/// Which tier the probe settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Remote store, falling back to local per call
    Remote,
    /// Local store only
    Local,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Remote => write!(f, "remote"),
            Backend::Local => write!(f, "local"),
        }
    }
}

/// Outcome of the probe, fixed for the router's lifetime.
struct Selection {
    backend: Backend,
    store: Arc<dyn Store>,
    tiers: Option<Arc<FallbackStore>>,
}

// == Cache Router ==
/// Routes repository cache operations to the selected store.
pub struct CacheRouter {
    remote: Option<Arc<dyn Store>>,
    local: Arc<dyn Store>,
    ttl: Duration,
    probe_timeout: Duration,
    selection: OnceCell<Selection>,
    stats: Mutex<CacheStats>,
}

impl CacheRouter {
    // == Constructors ==
    /// Creates a router over an optional remote store and a local store.
    ///
    /// Nothing is probed until `init` or the first operation.
    pub fn new(remote: Option<Arc<dyn Store>>, local: Arc<dyn Store>) -> Self {
        let defaults = Config::default();
        Self {
            remote,
            local,
            ttl: defaults.ttl(),
            probe_timeout: defaults.probe_timeout(),
            selection: OnceCell::new(),
            stats: Mutex::new(CacheStats::new()),
        }
    }

    /// Builds the Redis and file stores described by `config`.
    ///
    /// An unparseable `REDIS_URL` is treated like an absent one.
    pub fn from_config(config: &Config) -> Self {
        let remote: Option<Arc<dyn Store>> = match config.redis_url.as_deref() {
            None => None,
            Some(url) => match RedisStore::open(url) {
                Ok(store) => Some(Arc::new(store) as Arc<dyn Store>),
                Err(err) => {
                    warn!("Invalid REDIS_URL, using file-based cache: {}", err);
                    None
                }
            },
        };
        let local: Arc<dyn Store> = Arc::new(FileStore::new(&config.cache_dir));

        Self::new(remote, local)
            .with_ttl(config.ttl())
            .with_probe_timeout(config.probe_timeout())
    }

    /// Retention window passed to the store on every save.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    // == Store Selection ==
    /// Runs the availability probe if it has not run yet.
    ///
    /// Concurrent callers share a single probe; later calls return the
    /// cached verdict.
    pub async fn init(&self) -> Backend {
        self.selected().await.backend
    }

    /// The verdict, or `None` while nothing has been probed.
    pub fn backend(&self) -> Option<Backend> {
        self.selection.get().map(|s| s.backend)
    }

    /// Name of the store operations are routed to, once probed.
    pub fn store_name(&self) -> Option<&'static str> {
        self.selection.get().map(|s| s.store.name())
    }

    async fn selected(&self) -> &Selection {
        self.selection.get_or_init(|| self.probe()).await
    }

    async fn probe(&self) -> Selection {
        let Some(remote) = &self.remote else {
            info!("Remote cache not configured, using file-based cache");
            return self.local_selection();
        };

        match timeout(self.probe_timeout, remote.ping()).await {
            Ok(Ok(())) => {
                info!(
                    "{} cache connected, falling back to {} cache on errors",
                    remote.name(),
                    self.local.name()
                );
                let tiers = Arc::new(FallbackStore::new(remote.clone(), self.local.clone()));
                Selection {
                    backend: Backend::Remote,
                    store: tiers.clone(),
                    tiers: Some(tiers),
                }
            }
            Ok(Err(err)) => {
                warn!("Remote cache connection failed, using file-based cache: {}", err);
                self.local_selection()
            }
            Err(_) => {
                warn!(
                    "Remote cache did not answer within {:?}, using file-based cache",
                    self.probe_timeout
                );
                self.local_selection()
            }
        }
    }

    fn local_selection(&self) -> Selection {
        Selection {
            backend: Backend::Local,
            store: self.local.clone(),
            tiers: None,
        }
    }

    fn key(owner: &str, repo: &str) -> Option<RepoKey> {
        match RepoKey::new(owner, repo) {
            Ok(key) => Some(key),
            Err(err) => {
                warn!("Ignoring cache request for {}/{}: {}", owner, repo, err);
                None
            }
        }
    }

    // == Has Cache ==
    /// True if a live entry exists for the repository.
    pub async fn has_cache(&self, owner: &str, repo: &str) -> bool {
        let Some(key) = Self::key(owner, repo) else {
            return false;
        };
        let store = &self.selected().await.store;

        match store.exists(&key).await {
            Ok(exists) => exists,
            Err(err) => {
                error!("Cache check error for {}: {}", key, err);
                self.stats.lock().await.record_error();
                false
            }
        }
    }

    // == Save To Cache ==
    /// Serializes `payload` and stores it. Failures are logged only.
    pub async fn save_to_cache<T>(&self, owner: &str, repo: &str, payload: &T)
    where
        T: Serialize + ?Sized,
    {
        let Some(key) = Self::key(owner, repo) else {
            return;
        };
        let value = match serde_json::to_string(payload) {
            Ok(value) => value,
            Err(err) => {
                warn!("Could not serialize payload for {}: {}", key, err);
                self.stats.lock().await.record_error();
                return;
            }
        };
        let selection = self.selected().await;

        match selection.store.set(&key, &value, Some(self.ttl)).await {
            Ok(()) => {
                info!("Cached data for {} ({} cache)", key, selection.backend);
                self.stats.lock().await.record_write();
            }
            Err(err) => {
                error!("Cache save error for {}: {}", key, err);
                self.stats.lock().await.record_error();
            }
        }
    }

    // == Get From Cache ==
    /// Returns the cached payload, or `None` if absent or unreadable as `T`.
    pub async fn get_from_cache<T>(&self, owner: &str, repo: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let key = Self::key(owner, repo)?;
        let store = &self.selected().await.store;

        let raw = match store.get(&key).await {
            Ok(raw) => raw,
            Err(err) => {
                error!("Cache retrieval error for {}: {}", key, err);
                let mut stats = self.stats.lock().await;
                stats.record_error();
                stats.record_miss();
                return None;
            }
        };

        let Some(raw) = raw else {
            debug!("Cache miss for {}", key);
            self.stats.lock().await.record_miss();
            return None;
        };

        match serde_json::from_str(&raw) {
            Ok(payload) => {
                debug!("Cache hit for {}", key);
                self.stats.lock().await.record_hit();
                Some(payload)
            }
            Err(err) => {
                warn!("Discarding unreadable cache entry for {}: {}", key, err);
                let mut stats = self.stats.lock().await;
                stats.record_decode_failure();
                stats.record_miss();
                None
            }
        }
    }

    /// `get_from_cache` for schema-less payloads.
    pub async fn get_json(&self, owner: &str, repo: &str) -> Option<Value> {
        self.get_from_cache(owner, repo).await
    }

    // == Clear Cache ==
    /// Removes the entry if present. Failures are logged only.
    pub async fn clear_cache(&self, owner: &str, repo: &str) {
        let Some(key) = Self::key(owner, repo) else {
            return;
        };
        let selection = self.selected().await;

        match selection.store.delete(&key).await {
            Ok(()) => {
                info!("Cleared cache for {} ({} cache)", key, selection.backend);
                self.stats.lock().await.record_clear();
            }
            Err(err) => {
                error!("Cache clear error for {}: {}", key, err);
                self.stats.lock().await.record_error();
            }
        }
    }

    // == Stats ==
    /// Returns a snapshot of the router's counters.
    pub async fn stats(&self) -> CacheStats {
        let mut stats = self.stats.lock().await.clone();
        if let Some(tiers) = self.selection.get().and_then(|s| s.tiers.as_ref()) {
            stats.set_fallbacks(tiers.fallback_count());
        }
        stats
    }
}
