//! Metadata preview handler.

use super::MetadataRequest;
use crate::api::AppState;
use crate::error::Result;
use axum::{Json, extract::State};

/// POST /metadata - Fetch video metadata without downloading
#[utoipa::path(
    post,
    path = "/api/v1/metadata",
    tag = "metadata",
    request_body = MetadataRequest,
    responses(
        (status = 200, description = "Video metadata", body = crate::types::VideoMetadata),
        (status = 400, description = "Invalid URL"),
        (status = 502, description = "Extraction tool could not fetch metadata"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn fetch_metadata(
    State(state): State<AppState>,
    Json(request): Json<MetadataRequest>,
) -> Result<Json<crate::types::VideoMetadata>> {
    let metadata = state.downloader.fetch_metadata(&request.url).await?;
    Ok(Json(metadata))
}
