//! API routes.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::auth::{login, verify};
use crate::handlers::folders::{create_folder, delete_folder, list_folders, rename_folder};
use crate::handlers::health::{health, ready};
use crate::handlers::videos::{
    delete_video, list_recycle_bin, list_videos, move_video, rename_video, restore_video,
    upload_video,
};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, rate_limit_middleware, request_id, request_logging, security_headers,
    RateLimiterCache,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    // Brute-force protection on credential checks
    let login_rate_limiter = Arc::new(RateLimiterCache::new(state.config.rate_limit_rps));

    let auth_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/verify", get(verify))
        .layer(middleware::from_fn_with_state(
            login_rate_limiter,
            rate_limit_middleware,
        ));

    let folder_routes = Router::new()
        .route("/folders", get(list_folders))
        .route("/folders", post(create_folder))
        .route("/folders/rename", put(rename_folder))
        // Wildcard so nested folder paths survive routing
        .route("/folders/*folder", delete(delete_folder));

    let video_routes = Router::new()
        .route("/videos", get(list_videos))
        .route("/videos/rename", put(rename_video))
        .route("/videos/move", put(move_video))
        .route("/videos/restore", put(restore_video))
        .route("/videos/*key", delete(delete_video))
        .route("/recycle-bin", get(list_recycle_bin))
        .route("/upload", post(upload_video));

    let api_routes = Router::new()
        .merge(auth_routes)
        .merge(folder_routes)
        .merge(video_routes);

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
