//! Shared helpers for downloader and API tests

use crate::config::Config;
use crate::error::Error;
use crate::extract::Extractor;
use crate::types::{QualityPreset, VideoMetadata};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Notify;

/// How a [`MockExtractor`] handles download calls
#[derive(Clone)]
pub(crate) enum MockBehavior {
    /// Write `file_name` into the output directory and return its path
    Succeed { file_name: String },
    /// Fail with the given extractor error text
    Fail { message: String },
    /// Wait until the notify is signalled, then succeed with `file_name`
    Block {
        release: Arc<Notify>,
        file_name: String,
    },
}

/// In-process stand-in for the yt-dlp boundary
pub(crate) struct MockExtractor {
    behavior: MockBehavior,
    metadata: std::result::Result<VideoMetadata, String>,
}

impl MockExtractor {
    pub(crate) fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            metadata: Ok(sample_metadata()),
        }
    }

    pub(crate) fn with_metadata_error(message: &str) -> Self {
        Self {
            behavior: MockBehavior::Succeed {
                file_name: "video.mp4".to_string(),
            },
            metadata: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn download(
        &self,
        _url: &str,
        _quality: QualityPreset,
        output_dir: &Path,
    ) -> crate::Result<PathBuf> {
        let write_file = |name: &str| -> crate::Result<PathBuf> {
            let path = output_dir.join(name);
            std::fs::write(&path, b"test video contents")?;
            Ok(path)
        };
        match &self.behavior {
            MockBehavior::Succeed { file_name } => write_file(file_name),
            MockBehavior::Fail { message } => Err(Error::Extractor(message.clone())),
            MockBehavior::Block { release, file_name } => {
                release.notified().await;
                write_file(file_name)
            }
        }
    }

    async fn fetch_metadata(&self, _url: &str) -> crate::Result<VideoMetadata> {
        self.metadata
            .clone()
            .map_err(Error::Metadata)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Metadata payload used by default in mock extractors
pub(crate) fn sample_metadata() -> VideoMetadata {
    VideoMetadata {
        title: "Test Video".to_string(),
        uploader: Some("Test Channel".to_string()),
        duration: Some(212.0),
        view_count: Some(1_000),
        like_count: Some(42),
        upload_date: Some("20260115".to_string()),
        description: Some("A short test clip.".to_string()),
        thumbnail: Some("https://example.com/thumb.jpg".to_string()),
    }
}

/// Config pointing at a fresh temporary download directory
pub(crate) fn create_test_config() -> (Config, TempDir) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut config = Config::default();
    config.download.download_dir = temp_dir.path().to_path_buf();
    (config, temp_dir)
}

/// Downloader wired to a mock extractor with the given behavior
pub(crate) fn create_test_downloader(
    behavior: MockBehavior,
) -> (crate::jobs::VideoDownloader, TempDir) {
    let (config, temp_dir) = create_test_config();
    let extractor = Arc::new(MockExtractor::new(behavior));
    (
        crate::jobs::VideoDownloader::with_extractor(config, extractor),
        temp_dir,
    )
}

/// Downloader whose jobs succeed with a fixed file name
pub(crate) fn succeeding_downloader() -> (crate::jobs::VideoDownloader, TempDir) {
    create_test_downloader(MockBehavior::Succeed {
        file_name: "video.mp4".to_string(),
    })
}
