//! API Routes
//!
//! Configures the Axum router with all collection endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, health_handler, invalidate_handler, list_handler,
    refresh_handler, stats_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/data` - Read the collection (cached)
/// - `POST /api/data` - Append a document
/// - `PUT /api/data/:id` - Merge fields into a document
/// - `DELETE /api/data/:id` - Remove a document
/// - `POST /api/update-data` - Re-read the store into the cache
/// - `POST /api/invalidate-cache` - Flush the cache
/// - `GET /api/cache-stats` - Cache counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Compression: gzip when the client accepts it
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/data", get(list_handler).post(create_handler))
        .route("/api/data/:id", put(update_handler).delete(delete_handler))
        .route("/api/update-data", post(refresh_handler))
        .route("/api/invalidate-cache", post(invalidate_handler))
        .route("/api/cache-stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResponseCache;
    use crate::store::MemoryStore;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(ResponseCache::new(100), Arc::new(MemoryStore::default()));
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/data").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalidate_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/invalidate-cache")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_gzip_when_accepted() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/cache-stats")
                    .header(header::ACCEPT_ENCODING, "gzip")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_ENCODING).unwrap(),
            "gzip"
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
