//! Error types for ytdl-web
//!
//! This module provides error handling for the crate, including:
//! - Domain-specific error variants (validation, job lifecycle, extractor)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for ytdl-web operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ytdl-web
///
/// All failure modes of the extraction tool (network failure, unavailable
/// video, disk write failure, unsupported format) are collapsed into the
/// single `Extractor` variant carrying the tool's output verbatim — errors
/// are surfaced, not classified, and nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user input (e.g. an empty URL)
    #[error("validation error: {0}")]
    Validation(String),

    /// A download job is already running; at most one job may be active
    #[error("a download job is already active")]
    JobActive,

    /// Job with the given id does not exist
    #[error("job {id} not found")]
    JobNotFound {
        /// The job id that was not found
        id: u64,
    },

    /// Job exists but has no downloaded artifact (not finished, or failed)
    #[error("job {id} has no downloaded file")]
    ArtifactNotFound {
        /// The job id without an artifact
        id: u64,
    },

    /// The output directory holds no files to serve
    #[error("no downloaded files found")]
    NoFiles,

    /// The extraction tool failed; message is its stderr, unclassified
    #[error("extractor error: {0}")]
    Extractor(String),

    /// The extraction tool binary could not be found
    #[error("extractor binary not found: {0}")]
    ExtractorMissing(String),

    /// Metadata-only query failed (does not block a subsequent download)
    #[error("metadata fetch failed: {0}")]
    Metadata(String),

    /// Configuration error
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g. "download_dir")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// API error response format
///
/// Returned by API endpoints when an error occurs: a machine-readable code,
/// a human-readable message, and optional contextual details.
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "job_not_found",
///     "message": "job 3 not found",
///     "details": {
///       "job_id": 3
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "validation_error", "job_active")
    pub code: String,

    /// Human-readable error message, suitable for display to end users
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Create a "not found" error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new("not_found", format!("{} not found", resource.into()))
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    /// Create a "conflict" error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("conflict", message)
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Validation(_) => 400,
            Error::Config { .. } => 400,

            // 404 Not Found
            Error::JobNotFound { .. } => 404,
            Error::ArtifactNotFound { .. } => 404,
            Error::NoFiles => 404,

            // 409 Conflict - single-active-job invariant
            Error::JobActive => 409,

            // 500 Internal Server Error - Server-side issues
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,

            // 502 Bad Gateway - External tool failures
            Error::Extractor(_) => 502,
            Error::Metadata(_) => 502,

            // 503 Service Unavailable - tool binary missing
            Error::ExtractorMissing(_) => 503,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::Config { .. } => "config_error",
            Error::JobActive => "job_active",
            Error::JobNotFound { .. } => "job_not_found",
            Error::ArtifactNotFound { .. } => "artifact_not_found",
            Error::NoFiles => "no_files",
            Error::Extractor(_) => "extractor_error",
            Error::ExtractorMissing(_) => "extractor_missing",
            Error::Metadata(_) => "metadata_error",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        // Add contextual details for specific error types
        let details = match &error {
            Error::JobNotFound { id } => Some(serde_json::json!({
                "job_id": id,
            })),
            Error::ArtifactNotFound { id } => Some(serde_json::json!({
                "job_id": id,
            })),
            Error::Config { key: Some(key), .. } => Some(serde_json::json!({
                "key": key,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
