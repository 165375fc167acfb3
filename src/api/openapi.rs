//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the ytdl-web REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the ytdl-web REST API
///
/// This struct is used to generate the OpenAPI 3.1 specification that describes
/// all available endpoints, request/response types, and API behavior.
///
/// The spec can be accessed via:
/// - `/api/v1/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ytdl-web REST API",
        version = "0.1.0",
        description = "OpenAPI 3.1 compliant REST API for starting video downloads, polling job status, previewing metadata, and retrieving downloaded files",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8650", description = "Local development server")
    ),
    paths(
        // Jobs
        crate::api::routes::start_job,
        crate::api::routes::current_status,
        crate::api::routes::get_job,

        // Files
        crate::api::routes::download_job_file,
        crate::api::routes::download_latest_file,

        // Metadata
        crate::api::routes::fetch_metadata,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
        crate::api::routes::event_stream,
        crate::api::routes::shutdown,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::JobId,
        crate::types::Phase,
        crate::types::QualityPreset,
        crate::types::StatusSnapshot,
        crate::types::JobInfo,
        crate::types::VideoMetadata,

        // Request/response types
        crate::api::routes::StartJobRequest,
        crate::api::routes::StartJobResponse,
        crate::api::routes::MetadataRequest,

        // Config types from config.rs
        crate::config::Config,
        crate::config::DownloadConfig,
        crate::config::ToolsConfig,
        crate::config::ApiConfig,

        // Error types
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "jobs", description = "Download job management"),
        (name = "files", description = "Downloaded file retrieval"),
        (name = "metadata", description = "Video metadata preview"),
        (name = "system", description = "Health, events, and documentation"),
    )
)]
pub struct ApiDoc;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["info"]["title"], "ytdl-web REST API");
        assert!(json["paths"]["/api/v1/jobs"].get("post").is_some());
        assert!(json["paths"]["/api/v1/jobs/current"].get("get").is_some());
        assert!(json["paths"]["/api/v1/metadata"].get("post").is_some());
        assert!(
            json["components"]["schemas"]
                .get("StatusSnapshot")
                .is_some()
        );
    }
}
