//! API Handlers
//!
//! HTTP request handlers for each cache endpoint. The router never fails, so
//! the only errors surfaced here are invalid keys and cache misses.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::CacheRouter;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CachedResponse, ClearResponse, ExistsResponse, HealthResponse, RepoPath, SaveResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache router
    pub cache: Arc<CacheRouter>,
}

impl AppState {
    /// Creates a new AppState around the given router.
    pub fn new(cache: CacheRouter) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The router is not probed yet; call `cache.init()` at startup.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheRouter::from_config(config))
    }
}

/// Handler for `GET /cache/:owner/:repo`
pub async fn get_handler(
    State(state): State<AppState>,
    Path(path): Path<RepoPath>,
) -> Result<Json<CachedResponse>> {
    let key = path.key()?;

    match state.cache.get_json(key.owner(), key.repo()).await {
        Some(data) => Ok(Json(CachedResponse::new(&key, data))),
        None => Err(CacheError::NotFound(key.to_string())),
    }
}

/// Handler for `GET /cache/:owner/:repo/exists`
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(path): Path<RepoPath>,
) -> Result<Json<ExistsResponse>> {
    let key = path.key()?;
    let exists = state.cache.has_cache(key.owner(), key.repo()).await;

    Ok(Json(ExistsResponse::new(&key, exists)))
}

/// Handler for `PUT /cache/:owner/:repo`
///
/// Storage failures are logged by the router; the caller still gets `200`.
pub async fn save_handler(
    State(state): State<AppState>,
    Path(path): Path<RepoPath>,
    Json(payload): Json<Value>,
) -> Result<Json<SaveResponse>> {
    let key = path.key()?;
    state
        .cache
        .save_to_cache(key.owner(), key.repo(), &payload)
        .await;

    Ok(Json(SaveResponse::new(&key)))
}

/// Handler for `DELETE /cache/:owner/:repo`
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(path): Path<RepoPath>,
) -> Result<Json<ClearResponse>> {
    let key = path.key()?;
    state.cache.clear_cache(key.owner(), key.repo()).await;

    Ok(Json(ClearResponse::new(&key)))
}

/// Handler for `GET /stats`
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::new(state.cache.store_name(), stats))
}

/// Handler for `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.store_name()))
}
