//! Response DTOs for the cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheStats, RepoKey};

/// Response body for `GET /cache/:owner/:repo`
#[derive(Debug, Clone, Serialize)]
pub struct CachedResponse {
    pub owner: String,
    pub repo: String,
    /// The cached analysis payload, as stored
    pub data: Value,
}

impl CachedResponse {
    pub fn new(key: &RepoKey, data: Value) -> Self {
        Self {
            owner: key.owner().to_string(),
            repo: key.repo().to_string(),
            data,
        }
    }
}

/// Response body for `GET /cache/:owner/:repo/exists`
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub owner: String,
    pub repo: String,
    pub exists: bool,
}

impl ExistsResponse {
    pub fn new(key: &RepoKey, exists: bool) -> Self {
        Self {
            owner: key.owner().to_string(),
            repo: key.repo().to_string(),
            exists,
        }
    }
}

/// Response body for `PUT /cache/:owner/:repo`
#[derive(Debug, Clone, Serialize)]
pub struct SaveResponse {
    /// Success message
    pub message: String,
}

impl SaveResponse {
    pub fn new(key: &RepoKey) -> Self {
        Self {
            message: format!("Cached data for {}", key),
        }
    }
}

/// Response body for `DELETE /cache/:owner/:repo`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
}

impl ClearResponse {
    pub fn new(key: &RepoKey) -> Self {
        Self {
            message: format!("Cleared cache for {}", key),
        }
    }
}

/// Response body for the stats endpoint (`GET /stats`)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Store operations are routed to, `null` before the probe
    pub backend: Option<String>,
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(backend: Option<&str>, stats: CacheStats) -> Self {
        Self {
            backend: backend.map(str::to_string),
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the health endpoint (`GET /health`)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Store operations are routed to, `null` before the probe
    pub backend: Option<String>,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(backend: Option<&str>) -> Self {
        Self {
            status: "healthy".to_string(),
            backend: backend.map(str::to_string),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
