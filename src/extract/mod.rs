//! Extraction tool boundary
//!
//! All substantive download work (format selection, network fetch, muxing,
//! metadata extraction) is delegated to an external extraction tool behind the
//! [`Extractor`] trait. The production implementation shells out to yt-dlp;
//! tests substitute their own.

mod ytdlp;

pub use ytdlp::YtDlpExtractor;

use crate::types::{QualityPreset, VideoMetadata};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Trait for the external video extraction tool
///
/// One call either completes with the path of the file written to disk or
/// fails with an opaque description; an optional metadata-only query returns
/// title/uploader/counters without downloading anything.
///
/// # Examples
///
/// ```no_run
/// use ytdl_web::extract::{Extractor, YtDlpExtractor};
/// use ytdl_web::types::QualityPreset;
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = YtDlpExtractor::from_path()
///     .ok_or("yt-dlp not found in PATH")?;
///
/// let meta = extractor.fetch_metadata("https://example.com/watch?v=abc").await?;
/// println!("about to download: {}", meta.title);
///
/// let path = extractor
///     .download(
///         "https://example.com/watch?v=abc",
///         QualityPreset::P720,
///         Path::new("./downloads"),
///     )
///     .await?;
/// println!("wrote {}", path.display());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Download a video to `output_dir` and return the written file's path
    ///
    /// The quality preset and output directory are passed through to the tool
    /// unchanged; no validation happens beyond what the tool itself enforces.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Extractor`] carrying the tool's failure text
    /// verbatim for any failure mode (network, unavailable video, disk,
    /// unsupported format). Nothing is retried.
    async fn download(
        &self,
        url: &str,
        quality: QualityPreset,
        output_dir: &Path,
    ) -> crate::Result<PathBuf>;

    /// Fetch metadata for a URL without downloading
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Metadata`] with the tool's failure text. A
    /// metadata failure never blocks a subsequent download of the same URL.
    async fn fetch_metadata(&self, url: &str) -> crate::Result<VideoMetadata>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
