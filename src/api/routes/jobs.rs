//! Job management handlers.

use super::{StartJobRequest, StartJobResponse};
use crate::api::AppState;
use crate::error::{Error, Result};
use crate::jobs::JobRequest;
use crate::types::JobId;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

/// POST /jobs - Start a download job
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    tag = "jobs",
    request_body = StartJobRequest,
    responses(
        (status = 202, description = "Job accepted", body = StartJobResponse),
        (status = 400, description = "Invalid URL"),
        (status = 409, description = "A job is already running"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn start_job(
    State(state): State<AppState>,
    Json(request): Json<StartJobRequest>,
) -> Result<impl IntoResponse> {
    let id = state
        .downloader
        .start(JobRequest {
            url: request.url,
            quality: request.quality,
        })
        .await?;

    Ok((StatusCode::ACCEPTED, Json(StartJobResponse { id })))
}

/// GET /jobs/current - Current status snapshot
///
/// Always succeeds: before any job has run it returns the idle snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/jobs/current",
    tag = "jobs",
    responses(
        (status = 200, description = "Current status snapshot", body = crate::types::StatusSnapshot)
    )
)]
pub async fn current_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.downloader.status())
}

/// GET /jobs/:id - Get a job record
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    tag = "jobs",
    params(
        ("id" = u64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job record", body = crate::types::JobInfo),
        (status = 404, description = "Job not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse> {
    let job = state
        .downloader
        .job(JobId::new(id))
        .await
        .ok_or(Error::JobNotFound { id })?;

    Ok(Json(job))
}
