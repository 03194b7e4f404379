//! Job submission and status handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use lyricflow_models::{GenerateRequest, JobId, JobRecord};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Response for a submitted job.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub job_id: JobId,
}

/// `POST /generate`
///
/// Records a queued job and starts its assembler task; returns without
/// waiting for any rendering work.
pub async fn generate(
    State(state): State<AppState>,
    request: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateResponse>> {
    let Json(request) = request?;

    let job_id = JobId::new();
    state.store.put(job_id.clone(), JobRecord::queued()).await?;

    let style = request.lyric_style();
    let platform = request.target_platform();
    metrics::record_job_submitted(style.as_str(), platform.as_str(), state.store.len().await);
    info!(
        job_id = %job_id,
        lines = request.lyrics.len(),
        style = %style,
        platform = %platform,
        "Job submitted"
    );

    state.executor.spawn(job_id.clone(), request);

    Ok(Json(GenerateResponse { job_id }))
}

/// `GET /status/:job_id`
pub async fn get_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobRecord>> {
    let job_id = JobId::from_string(job_id);

    state
        .store
        .get(&job_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Job not found"))
}
