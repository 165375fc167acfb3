//! REST API server module
//!
//! Provides an OpenAPI 3.1 compliant REST API for starting download jobs,
//! polling their status, fetching metadata, and retrieving finished files,
//! plus the single-page web UI at `/`.

use crate::{Config, Result, VideoDownloader};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Web UI
/// - `GET /` - Single-page download form
///
/// ## Jobs
/// - `POST /jobs` - Start a download job
/// - `GET /jobs/current` - Current status snapshot
/// - `GET /jobs/:id` - Get a job record
/// - `GET /jobs/:id/file` - Download a finished job's file
///
/// ## Files
/// - `GET /files/latest` - Download the most recent file in the download directory
///
/// ## Metadata
/// - `POST /metadata` - Fetch video metadata without downloading
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled)
/// - `GET /events` - Server-sent events stream of status snapshots
/// - `POST /shutdown` - Graceful shutdown
pub fn create_router(downloader: Arc<VideoDownloader>, config: Arc<Config>) -> Router {
    let state = AppState::new(downloader, config.clone());

    let api = Router::new()
        // Jobs
        .route("/jobs", post(routes::start_job))
        .route("/jobs/current", get(routes::current_status))
        .route("/jobs/:id", get(routes::get_job))
        .route("/jobs/:id/file", get(routes::download_job_file))
        // Files
        .route("/files/latest", get(routes::download_latest_file))
        // Metadata
        .route("/metadata", post(routes::fetch_metadata))
        // System
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec))
        .route("/events", get(routes::event_stream))
        .route("/shutdown", post(routes::shutdown));

    let router = Router::new()
        .route("/", get(routes::index_page))
        .nest("/api/v1", api);

    // Merge Swagger UI routes if enabled in config (before applying state)
    // Note: SwaggerUi will use the existing /openapi.json endpoint we already defined
    let router = if config.api.swagger_ui {
        router.merge(
            SwaggerUi::new("/swagger-ui")
                .config(utoipa_swagger_ui::Config::new(["/api/v1/openapi.json"])),
        )
    } else {
        router
    };

    // Add state to all routes
    let router = router.with_state(state).layer(TraceLayer::new_for_http());

    // Apply CORS middleware if enabled in config
    if config.api.cors_enabled {
        let cors = build_cors_layer(&config.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// # Arguments
///
/// * `origins` - List of allowed origins (supports "*" for any origin)
///
/// # Returns
///
/// A configured CorsLayer that allows the specified origins, all methods,
/// and all headers for cross-origin requests.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    // Check if "*" (all origins) is in the list
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        // Allow all origins (default for local development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Allow specific origins
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// This function creates a TCP listener, binds it to the configured address,
/// and starts serving the API router. It runs until the server is shut down.
///
/// # Example
///
/// ```no_run
/// use ytdl_web::{Config, VideoDownloader};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let downloader = Arc::new(VideoDownloader::new(config.clone())?);
///
/// // Start API server (blocks until shutdown)
/// ytdl_web::api::start_api_server(downloader, Arc::new(config)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(
    downloader: Arc<VideoDownloader>,
    config: Arc<Config>,
) -> Result<()> {
    let bind_address = config.api.bind_address;

    tracing::info!(
        address = %bind_address,
        "Starting API server"
    );

    // Create the router with all routes
    let app = create_router(downloader, config);

    // Bind TCP listener to the configured address
    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %bind_address,
        "API server listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
