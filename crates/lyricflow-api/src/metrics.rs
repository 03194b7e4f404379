//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Install the global Prometheus recorder and return its render handle.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "lyricflow_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "lyricflow_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "lyricflow_http_requests_in_flight";

    // Job metrics (completion and failure are recorded by the assembler)
    pub const JOBS_SUBMITTED_TOTAL: &str = "lyricflow_jobs_submitted_total";
    pub const JOBS_TRACKED: &str = "lyricflow_jobs_tracked";

    // Upload metrics
    pub const UPLOADS_TOTAL: &str = "lyricflow_uploads_total";
    pub const UPLOAD_BYTES_TOTAL: &str = "lyricflow_upload_bytes_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, route: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a submitted job and the size of the job table.
pub fn record_job_submitted(style: &str, platform: &str, tracked: usize) {
    let labels = [
        ("style", style.to_string()),
        ("platform", platform.to_string()),
    ];
    counter!(names::JOBS_SUBMITTED_TOTAL, &labels).increment(1);
    gauge!(names::JOBS_TRACKED).set(tracked as f64);
}

/// Record a stored upload.
pub fn record_upload(bytes: usize) {
    counter!(names::UPLOADS_TOTAL).increment(1);
    counter!(names::UPLOAD_BYTES_TOTAL).increment(bytes as u64);
}

/// Metrics middleware for HTTP requests.
///
/// Requests are labelled by their route template so job ids and file names
/// do not explode label cardinality.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &route, status, duration);

    response
}
