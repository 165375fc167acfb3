//! File retrieval handlers.

use crate::api::AppState;
use crate::error::{Error, Result};
use crate::types::JobId;
use crate::utils::{content_type_for, download_file_name, latest_created_file};
use axum::{
    body::Body,
    extract::{Path as AxumPath, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::path::Path;
use tokio_util::io::ReaderStream;

/// GET /jobs/:id/file - Download a finished job's file
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}/file",
    tag = "files",
    params(
        ("id" = u64, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "File contents as an attachment", content_type = "application/octet-stream"),
        (status = 404, description = "Job unknown or no file available"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn download_job_file(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<u64>,
) -> Result<Response> {
    let path = state.downloader.artifact_path(JobId::new(id)).await?;
    stream_file(&path, Error::ArtifactNotFound { id }).await
}

/// GET /files/latest - Download the most recent file in the download directory
///
/// Serves whatever file the directory scan turns up regardless of which job
/// produced it; use `GET /jobs/:id/file` for an exact mapping.
#[utoipa::path(
    get,
    path = "/api/v1/files/latest",
    tag = "files",
    responses(
        (status = 200, description = "File contents as an attachment", content_type = "application/octet-stream"),
        (status = 404, description = "Download directory is empty or missing"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn download_latest_file(State(state): State<AppState>) -> Result<Response> {
    // The scan walks the whole directory with blocking fs calls, so it runs
    // off the async runtime.
    let dir = state.config.download.download_dir.clone();
    let path = tokio::task::spawn_blocking(move || latest_created_file(&dir))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))??
        .ok_or(Error::NoFiles)?;
    stream_file(&path, Error::NoFiles).await
}

/// Stream a file from disk as an attachment response
///
/// `missing` is returned when the file vanished between lookup and open.
async fn stream_file(path: &Path, missing: Error) -> Result<Response> {
    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(missing),
        Err(e) => return Err(Error::Io(e)),
    };
    let length = file.metadata().await.map_err(Error::Io)?.len();

    let body = Body::from_stream(ReaderStream::new(file));
    let headers = [
        (header::CONTENT_TYPE, content_type_for(path).to_string()),
        (header::CONTENT_LENGTH, length.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download_file_name(path)),
        ),
    ];

    Ok((headers, body).into_response())
}
