//! # ytdl-web
//!
//! Minimal web front-end for downloading single videos through yt-dlp.
//!
//! ## Design Philosophy
//!
//! ytdl-web is designed to be:
//! - **Single purpose** - Paste a URL, pick a quality, get a file
//! - **One job at a time** - No queue; a second request while a download
//!   runs is rejected with a conflict
//! - **Snapshot-driven** - Status is an immutable snapshot published over a
//!   watch channel; poll it or subscribe to the SSE stream
//! - **Thin over yt-dlp** - Site support, format selection, and muxing all
//!   belong to the extraction tool
//!
//! ## Quick Start
//!
//! ```no_run
//! use ytdl_web::{Config, VideoDownloader};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let downloader = Arc::new(VideoDownloader::new(config)?);
//!
//!     // Serve the web UI and REST API
//!     let api_handle = downloader.spawn_api_server();
//!
//!     // Watch status snapshots
//!     let mut status = downloader.subscribe();
//!     tokio::spawn(async move {
//!         while status.changed().await.is_ok() {
//!             println!("Status: {:?}", *status.borrow());
//!         }
//!     });
//!
//!     api_handle.await??;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API and web UI module
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Extraction tool boundary (yt-dlp)
pub mod extract;
/// Background download job runner
pub mod jobs;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{ApiConfig, Config, DownloadConfig, ToolsConfig};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use extract::{Extractor, YtDlpExtractor};
pub use jobs::{JobRequest, VideoDownloader};
pub use types::{JobId, JobInfo, Phase, QualityPreset, StatusSnapshot, VideoMetadata};

/// Helper function to run the downloader with graceful signal handling.
///
/// Waits for a termination signal and then calls the downloader's `shutdown()`
/// method, letting an in-flight job finish first.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
pub async fn run_with_shutdown(downloader: VideoDownloader) -> Result<()> {
    wait_for_signal().await;
    downloader.shutdown().await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
