//! Repo Cache - Repository analysis cache
//!
//! Stores per-repository analysis payloads in Redis when it is reachable and
//! in local files otherwise, behind a single `CacheRouter`.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{Backend, CacheRouter};
pub use config::Config;
