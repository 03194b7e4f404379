//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{download_video, generate, get_status, health, ready, root, upload_audio};
use crate::metrics::metrics_middleware;
use crate::middleware::{
    cors_layer, mask_internal_errors, request_id, request_logging, security_headers,
};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let job_routes = Router::new()
        .route("/upload", post(upload_audio))
        .route("/generate", post(generate))
        .route("/status/:job_id", get(get_status))
        .route("/download/:filename", get(download_video));

    let health_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    let mut app = Router::new()
        .merge(job_routes)
        .merge(health_routes)
        .merge(metrics_routes);

    // Internal error messages stay out of production responses
    if state.config.is_production() {
        app = app.layer(middleware::from_fn(mask_internal_errors));
    }

    app
        // Uploads are bounded by the configured limit instead of axum's 2 MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
