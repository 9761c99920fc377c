//! API Module
//!
//! HTTP handlers and routing for the repository cache.
//!
//! # Endpoints
//! - `GET /cache/:owner/:repo` - Cached analysis for a repository
//! - `GET /cache/:owner/:repo/exists` - Whether an analysis is cached
//! - `PUT /cache/:owner/:repo` - Store an analysis (any JSON body)
//! - `DELETE /cache/:owner/:repo` - Drop a cached analysis
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
