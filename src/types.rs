//! Core types for ytdl-web

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use utoipa::ToSchema;

/// Unique identifier for a download job
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl JobId {
    /// Create a new JobId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<JobId> for u64 {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Job phase
///
/// `Downloading` is part of the wire format for forward compatibility, but the
/// runner currently transitions straight from `Starting` to a terminal phase:
/// the extraction tool reports no intermediate progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No job has run yet (or the runner was reset)
    #[default]
    Idle,
    /// Job accepted, extraction tool launching
    Starting,
    /// Extraction tool running
    Downloading,
    /// Completed successfully
    Finished,
    /// Failed with an error message
    Error,
}

impl Phase {
    /// Whether the phase is transient (a poller should keep polling)
    pub fn is_transient(&self) -> bool {
        matches!(self, Phase::Starting | Phase::Downloading)
    }

    /// Whether the phase is terminal (`Finished` or `Error`)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Finished | Phase::Error)
    }
}

/// Quality preset passed through to the extraction tool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum QualityPreset {
    /// Highest available quality
    #[default]
    #[serde(rename = "best")]
    Best,
    /// Up to 1080p
    #[serde(rename = "1080p")]
    P1080,
    /// Up to 720p
    #[serde(rename = "720p")]
    P720,
    /// Up to 480p
    #[serde(rename = "480p")]
    P480,
    /// Audio only
    #[serde(rename = "audio")]
    Audio,
}

impl QualityPreset {
    /// All presets, in the order the UI offers them
    pub const ALL: [QualityPreset; 5] = [
        QualityPreset::Best,
        QualityPreset::P1080,
        QualityPreset::P720,
        QualityPreset::P480,
        QualityPreset::Audio,
    ];

    /// The yt-dlp `--format` selector for this preset
    pub fn format_selector(&self) -> &'static str {
        match self {
            QualityPreset::Best => "bestvideo+bestaudio/best",
            QualityPreset::P1080 => "bestvideo[height<=1080]+bestaudio/best[height<=1080]",
            QualityPreset::P720 => "bestvideo[height<=720]+bestaudio/best[height<=720]",
            QualityPreset::P480 => "bestvideo[height<=480]+bestaudio/best[height<=480]",
            QualityPreset::Audio => "bestaudio/best",
        }
    }

    /// The wire name of this preset (matches the serde rename)
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Best => "best",
            QualityPreset::P1080 => "1080p",
            QualityPreset::P720 => "720p",
            QualityPreset::P480 => "480p",
            QualityPreset::Audio => "audio",
        }
    }
}

impl std::fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QualityPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best" => Ok(QualityPreset::Best),
            "1080p" => Ok(QualityPreset::P1080),
            "720p" => Ok(QualityPreset::P720),
            "480p" => Ok(QualityPreset::P480),
            "audio" => Ok(QualityPreset::Audio),
            other => Err(format!("unknown quality preset: {other}")),
        }
    }
}

/// Immutable snapshot of the runner's status, published through a watch channel
///
/// The job task is the single writer; pollers and SSE subscribers read clones.
/// `percent` only ever takes the values 0.0 and 1.0 — the extraction tool does
/// not report incremental progress through this interface.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusSnapshot {
    /// The job this snapshot describes (None before the first job)
    pub job: Option<JobId>,

    /// Progress fraction (0.0 or 1.0)
    pub percent: f32,

    /// Current phase
    pub phase: Phase,

    /// Human-readable completion or error message
    pub message: String,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            job: None,
            percent: 0.0,
            phase: Phase::Idle,
            message: String::new(),
        }
    }
}

impl StatusSnapshot {
    /// Snapshot published synchronously when a job is accepted
    pub fn starting(job: JobId) -> Self {
        Self {
            job: Some(job),
            percent: 0.0,
            phase: Phase::Starting,
            message: String::new(),
        }
    }

    /// Terminal success snapshot
    pub fn finished(job: JobId, message: impl Into<String>) -> Self {
        Self {
            job: Some(job),
            percent: 1.0,
            phase: Phase::Finished,
            message: message.into(),
        }
    }

    /// Terminal failure snapshot, carrying the extractor's message verbatim
    pub fn failed(job: JobId, message: impl Into<String>) -> Self {
        Self {
            job: Some(job),
            percent: 0.0,
            phase: Phase::Error,
            message: message.into(),
        }
    }
}

/// Information about a download job
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct JobInfo {
    /// Unique job identifier
    pub id: JobId,

    /// The URL being downloaded
    pub url: String,

    /// Selected quality preset
    pub quality: QualityPreset,

    /// Current phase
    pub phase: Phase,

    /// Completion or error message (empty while running)
    pub message: String,

    /// Path of the downloaded artifact, once the extractor reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,

    /// When the job was accepted
    pub created_at: DateTime<Utc>,

    /// When the job reached a terminal phase (None while running)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Video metadata returned by the extraction tool's metadata-only query
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct VideoMetadata {
    /// Video title
    pub title: String,

    /// Channel or uploader name
    #[serde(default)]
    pub uploader: Option<String>,

    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,

    /// View count
    #[serde(default)]
    pub view_count: Option<u64>,

    /// Like count
    #[serde(default)]
    pub like_count: Option<u64>,

    /// Upload date (YYYYMMDD as reported by the tool)
    #[serde(default)]
    pub upload_date: Option<String>,

    /// Video description
    #[serde(default)]
    pub description: Option<String>,

    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: Option<String>,
}
