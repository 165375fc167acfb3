//! HTTP error response handling for the API
//!
//! This module provides conversions from domain errors to HTTP responses
//! with appropriate status codes and JSON error bodies.

use crate::error::{ApiError, Error, ToHttpStatus};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Implement IntoResponse for Error to automatically convert errors to HTTP responses
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let api_error: ApiError = self.into();

        (status_code, Json(api_error)).into_response()
    }
}

/// Implement IntoResponse for ApiError for explicit error responses
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Default to 500 if we're directly converting an ApiError
        // (usually errors go through Error::into_response which has the status code)
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let error = Error::Validation("url must not be empty".to_string());
        assert_eq!(error.status_code(), 400);
        assert_eq!(error.error_code(), "validation_error");
    }

    #[test]
    fn test_job_active_maps_to_conflict() {
        let error = Error::JobActive;
        assert_eq!(error.status_code(), 409);
        assert_eq!(error.error_code(), "job_active");
    }

    #[test]
    fn test_job_not_found_maps_to_not_found() {
        let error = Error::JobNotFound { id: 7 };
        assert_eq!(error.status_code(), 404);
        assert_eq!(error.error_code(), "job_not_found");
    }

    #[test]
    fn test_extractor_missing_maps_to_service_unavailable() {
        let error = Error::ExtractorMissing("yt-dlp".to_string());
        assert_eq!(error.status_code(), 503);
        assert_eq!(error.error_code(), "extractor_missing");
    }

    #[tokio::test]
    async fn test_into_response_carries_status_and_json_body() {
        let response = Error::JobActive.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "job_active");
        assert!(json["error"]["message"].is_string());
    }
}
