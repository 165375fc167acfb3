//! Background download job runner
//!
//! One job at a time: a request spawns a single background task that delegates
//! the whole fetch to the [`Extractor`](crate::extract::Extractor) and
//! publishes exactly two status updates — the synchronous `starting` reset and
//! one terminal `finished`/`error` snapshot. Status is shared as an immutable
//! snapshot through a watch channel, so the job task is the only writer and
//! pollers can never observe a torn update.

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::{Extractor, YtDlpExtractor};
use crate::types::{JobId, JobInfo, Phase, QualityPreset, StatusSnapshot};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, watch};
use tracing::{error, info};

/// Request to start a download job
#[derive(Clone, Debug)]
pub struct JobRequest {
    /// Video URL (must be non-empty after trimming)
    pub url: String,
    /// Quality preset to pass through to the extraction tool
    pub quality: QualityPreset,
}

/// Main downloader instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct VideoDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// The extraction tool boundary (trait object for pluggable implementations)
    pub(crate) extractor: Arc<dyn Extractor>,
    /// Status snapshot publisher; the running job task is the single writer
    status_tx: Arc<watch::Sender<StatusSnapshot>>,
    /// All jobs this process has accepted, by id
    jobs: Arc<Mutex<HashMap<JobId, JobInfo>>>,
    /// Handle of the currently running job task, if any
    active: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
    /// Job id counter
    next_id: Arc<AtomicU64>,
}

impl VideoDownloader {
    /// Create a new VideoDownloader, discovering the yt-dlp binary from config
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExtractorMissing`] when no yt-dlp binary can be found.
    pub fn new(config: Config) -> Result<Self> {
        let extractor = YtDlpExtractor::from_config(&config.tools)?;
        info!(extractor = extractor.name(), "extractor initialized");
        Ok(Self::with_extractor(config, Arc::new(extractor)))
    }

    /// Create a VideoDownloader with an explicit extractor implementation
    pub fn with_extractor(config: Config, extractor: Arc<dyn Extractor>) -> Self {
        let (status_tx, _rx) = watch::channel(StatusSnapshot::default());
        Self {
            config: Arc::new(config),
            extractor,
            status_tx: Arc::new(status_tx),
            jobs: Arc::new(Mutex::new(HashMap::new())),
            active: Arc::new(Mutex::new(None)),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start a download job in the background
    ///
    /// Validates the URL, creates the output directory if absent, resets the
    /// status snapshot to `starting` synchronously, and spawns the job task.
    /// All further outcomes are communicated through the status snapshot; the
    /// returned id only identifies the job.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for an empty or whitespace URL (no job spawns)
    /// - [`Error::JobActive`] while a previous job is still running
    pub async fn start(&self, request: JobRequest) -> Result<JobId> {
        let url = request.url.trim().to_string();
        if url.is_empty() {
            return Err(Error::Validation("url must not be empty".to_string()));
        }

        let output_dir = self.config.download.download_dir.clone();
        tokio::fs::create_dir_all(&output_dir).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "failed to create download directory '{}': {}",
                    output_dir.display(),
                    e
                ),
            ))
        })?;

        let mut active = self.active.lock().await;
        if let Some(handle) = active.as_ref() {
            if !handle.is_finished() {
                return Err(Error::JobActive);
            }
        }

        let id = JobId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);

        let job = JobInfo {
            id,
            url: url.clone(),
            quality: request.quality,
            phase: Phase::Starting,
            message: String::new(),
            artifact: None,
            created_at: chrono::Utc::now(),
            finished_at: None,
        };
        self.jobs.lock().await.insert(id, job);

        // Reset the snapshot before the task exists, so a poll racing the
        // spawn still sees this job and nothing of the previous one.
        self.status_tx.send_replace(StatusSnapshot::starting(id));

        info!(job_id = id.get(), %url, quality = %request.quality, "download job accepted");

        let runner = self.clone();
        let handle = tokio::spawn(async move {
            runner.run_job(id, url, request.quality, output_dir).await;
        });
        *active = Some(handle);

        Ok(id)
    }

    /// Execute one job to its terminal snapshot
    async fn run_job(&self, id: JobId, url: String, quality: QualityPreset, output_dir: PathBuf) {
        match self.extractor.download(&url, quality, &output_dir).await {
            Ok(path) => {
                info!(job_id = id.get(), path = %path.display(), "download finished");
                self.finish_job(id, Phase::Finished, "Download complete.", Some(path))
                    .await;
                self.status_tx
                    .send_replace(StatusSnapshot::finished(id, "Download complete."));
            }
            Err(e) => {
                // Opaque by design upstream: the extractor's text is all we have
                let message = e.to_string();
                error!(job_id = id.get(), error = %message, "download failed");
                self.finish_job(id, Phase::Error, &message, None).await;
                self.status_tx
                    .send_replace(StatusSnapshot::failed(id, message));
            }
        }
    }

    /// Record a job's terminal state in the jobs map
    async fn finish_job(&self, id: JobId, phase: Phase, message: &str, artifact: Option<PathBuf>) {
        let mut jobs = self.jobs.lock().await;
        if let Some(job) = jobs.get_mut(&id) {
            job.phase = phase;
            job.message = message.to_string();
            job.artifact = artifact;
            job.finished_at = Some(chrono::Utc::now());
        }
    }

    /// The current status snapshot
    pub fn status(&self) -> StatusSnapshot {
        self.status_tx.borrow().clone()
    }

    /// Subscribe to status snapshot changes
    ///
    /// The receiver yields the current snapshot immediately and then one
    /// value per state change — a completion notification rather than a
    /// busy-wait.
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.status_tx.subscribe()
    }

    /// Look up a job by id
    pub async fn job(&self, id: JobId) -> Option<JobInfo> {
        self.jobs.lock().await.get(&id).cloned()
    }

    /// Path of a finished job's downloaded file
    ///
    /// # Errors
    ///
    /// [`Error::JobNotFound`] for an unknown id, [`Error::ArtifactNotFound`]
    /// when the job has not (or not successfully) produced a file.
    pub async fn artifact_path(&self, id: JobId) -> Result<PathBuf> {
        let jobs = self.jobs.lock().await;
        let job = jobs.get(&id).ok_or(Error::JobNotFound { id: id.get() })?;
        job.artifact
            .clone()
            .ok_or(Error::ArtifactNotFound { id: id.get() })
    }

    /// Whether a job task is currently running
    pub async fn is_busy(&self) -> bool {
        self.active
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Fetch metadata for a URL through the extraction tool
    ///
    /// Runs independently of the job runner; a running download neither
    /// blocks nor is blocked by a metadata query.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty URL, [`Error::Metadata`] when the
    /// tool fails.
    pub async fn fetch_metadata(&self, url: &str) -> Result<crate::types::VideoMetadata> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::Validation("url must not be empty".to_string()));
        }
        self.extractor.fetch_metadata(url).await
    }

    /// Get the current configuration
    ///
    /// The configuration is wrapped in an Arc, so this is a cheap clone.
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Wait for the running job (if any) to reach its terminal snapshot
    ///
    /// Jobs cannot be cancelled; graceful shutdown lets the in-flight
    /// download run to completion or failure.
    pub async fn shutdown(&self) -> Result<()> {
        let handle = self.active.lock().await.take();
        if let Some(handle) = handle {
            info!("waiting for the active download job to finish");
            if let Err(e) = handle.await {
                error!(error = %e, "download job task panicked during shutdown");
            }
        }
        info!("downloader shut down");
        Ok(())
    }

    /// Spawn the REST API server in a background task
    ///
    /// The server runs concurrently with download processing and listens on
    /// the configured bind address.
    pub fn spawn_api_server(self: &Arc<Self>) -> tokio::task::JoinHandle<Result<()>> {
        let downloader = self.clone();
        let config = self.config.clone();

        tokio::spawn(async move { crate::api::start_api_server(downloader, config).await })
    }
}
