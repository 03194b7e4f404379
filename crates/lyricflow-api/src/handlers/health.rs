//! Service info and health check handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use lyricflow_media::{check_ffmpeg, check_ffprobe};

use crate::state::AppState;

/// Service banner.
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
}

/// `GET /`
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "LyricFlow API",
        status: "running",
    })
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    pub ffmpeg: CheckStatus,
    pub ffprobe: CheckStatus,
    pub upload_dir: CheckStatus,
    pub output_dir: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckStatus {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(msg.into()),
        }
    }

    fn from_result<T, E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(e) => Self::error(e.to_string()),
        }
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

async fn check_dir(path: &std::path::Path) -> CheckStatus {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => CheckStatus::ok(),
        Ok(_) => CheckStatus::error(format!("{} is not a directory", path.display())),
        Err(e) => CheckStatus::error(format!("{}: {}", path.display(), e)),
    }
}

/// Readiness check endpoint (readiness probe).
/// Checks that the render toolchain and working directories are available.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let checks = ReadinessChecks {
        ffmpeg: CheckStatus::from_result(check_ffmpeg()),
        ffprobe: CheckStatus::from_result(check_ffprobe()),
        upload_dir: check_dir(state.upload_dir()).await,
        output_dir: check_dir(state.output_dir()).await,
    };

    let all_ok = checks.ffmpeg.is_ok()
        && checks.ffprobe.is_ok()
        && checks.upload_dir.is_ok()
        && checks.output_dir.is_ok();

    let response = ReadinessResponse {
        status: if all_ok { "ready" } else { "degraded" }.to_string(),
        checks,
    };

    if all_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
