//! API Routes
//!
//! Configures the Axum router with all cache endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, exists_handler, get_handler, health_handler, save_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin, the analysis front-end calls from the browser
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/cache/:owner/:repo",
            get(get_handler).put(save_handler).delete(clear_handler),
        )
        .route("/cache/:owner/:repo/exists", get(exists_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheRouter, FileStore};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    fn create_test_app(dir: &TempDir) -> Router {
        let cache = CacheRouter::new(None, Arc::new(FileStore::new(dir.path())));
        create_router(AppState::new(cache))
    }

    async fn send(app: Router, method: &str, uri: &str, body: Body) -> StatusCode {
        app.oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = TempDir::new().unwrap();
        let status = send(create_test_app(&dir), "GET", "/health", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let dir = TempDir::new().unwrap();
        let status = send(create_test_app(&dir), "GET", "/stats", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_put_endpoint() {
        let dir = TempDir::new().unwrap();
        let status = send(
            create_test_app(&dir),
            "PUT",
            "/cache/octocat/Hello-World",
            Body::from(r#"{"files":12}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_put_rejects_non_json() {
        let dir = TempDir::new().unwrap();
        let status = send(
            create_test_app(&dir),
            "PUT",
            "/cache/octocat/Hello-World",
            Body::from("{not json"),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let dir = TempDir::new().unwrap();
        let status = send(
            create_test_app(&dir),
            "GET",
            "/cache/octocat/nothing",
            Body::empty(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
