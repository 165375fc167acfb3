//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`jobs`] — Starting jobs and reading their status
//! - [`files`] — Retrieving downloaded files
//! - [`metadata`] — Video metadata preview
//! - [`system`] — Health, events, OpenAPI, shutdown
//! - [`ui`] — The single-page web UI

use serde::{Deserialize, Serialize};

mod files;
mod jobs;
mod metadata;
mod system;
mod ui;

// Re-export all handlers so `routes::function_name` continues to work
pub use files::*;
pub use jobs::*;
pub use metadata::*;
pub use system::*;
pub use ui::*;

// ============================================================================
// Request/Response Types (shared across handlers)
// ============================================================================

/// Request body for POST /jobs
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct StartJobRequest {
    /// Video URL to download
    pub url: String,
    /// Quality preset (defaults to "best")
    #[serde(default)]
    pub quality: crate::types::QualityPreset,
}

/// Response body for POST /jobs
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct StartJobResponse {
    /// Identifier of the accepted job
    pub id: crate::types::JobId,
}

/// Request body for POST /metadata
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MetadataRequest {
    /// Video URL to inspect
    pub url: String,
}
