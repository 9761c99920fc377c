//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Retention window for remote entries: 6 hours.
pub const DEFAULT_TTL_SECS: u64 = 6 * 60 * 60;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote store endpoint; `None` means local-only mode
    pub redis_url: Option<String>,
    /// Root directory of the local file store
    pub cache_dir: PathBuf,
    /// Remote entry retention window in seconds
    pub ttl_secs: u64,
    /// Upper bound on the one-time availability probe, in milliseconds
    pub probe_timeout_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Remote store endpoint (default: unset, local-only)
    /// - `CACHE_DIR` - Local file store root (default: `.cache/repos`)
    /// - `CACHE_TTL` - Remote retention in seconds (default: 21600)
    /// - `PROBE_TIMEOUT_MS` - Probe timeout in milliseconds (default: 2000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_url: env::var("REDIS_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            cache_dir: env::var("CACHE_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            ttl_secs: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_secs),
            probe_timeout_ms: env::var("PROBE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.probe_timeout_ms),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            cache_dir: PathBuf::from(".cache/repos"),
            ttl_secs: DEFAULT_TTL_SECS,
            probe_timeout_ms: 2000,
            server_port: 3000,
        }
    }
}
