//! CLI-based extractor using the external yt-dlp binary

use super::Extractor;
use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use crate::types::{QualityPreset, VideoMetadata};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Output filename template handed to yt-dlp
const OUTPUT_TEMPLATE: &str = "%(title)s [%(id)s].%(ext)s";

/// CLI-based extractor using the external yt-dlp binary
///
/// Invokes yt-dlp once per operation. Downloads print the final file path via
/// `--print after_move:filepath`, which is how the job records an explicit
/// job-to-artifact mapping instead of guessing from directory contents.
#[derive(Debug)]
pub struct YtDlpExtractor {
    binary_path: PathBuf,
}

impl YtDlpExtractor {
    /// Create a new extractor with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find yt-dlp in PATH
    ///
    /// Uses the `which` crate to search the system PATH.
    pub fn from_path() -> Option<Self> {
        which::which("yt-dlp").ok().map(Self::new)
    }

    /// Build an extractor from tool configuration
    ///
    /// An explicitly configured path wins; otherwise PATH is searched when
    /// `search_path` is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExtractorMissing`] when no binary can be located.
    pub fn from_config(tools: &ToolsConfig) -> Result<Self> {
        if let Some(path) = &tools.ytdlp_path {
            return Ok(Self::new(path.clone()));
        }
        if tools.search_path {
            if let Some(extractor) = Self::from_path() {
                return Ok(extractor);
            }
        }
        Err(Error::ExtractorMissing(
            "yt-dlp (set tools.ytdlp_path or install it on PATH)".to_string(),
        ))
    }

    /// The binary path this extractor invokes
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }
}

/// Arguments for a download invocation, excluding the binary itself
///
/// Split out of the trait impl so argument construction stays testable
/// without a yt-dlp binary present.
pub(crate) fn build_download_args(
    url: &str,
    quality: QualityPreset,
    output_dir: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "--no-playlist".into(),
        "--no-progress".into(),
        "--no-simulate".into(),
        "--print".into(),
        "after_move:filepath".into(),
        "--format".into(),
        quality.format_selector().into(),
    ];

    if quality == QualityPreset::Audio {
        args.push("--extract-audio".into());
    } else {
        args.push("--merge-output-format".into());
        args.push("mp4".into());
    }

    args.push("--output".into());
    args.push(output_dir.join(OUTPUT_TEMPLATE).into_os_string());
    args.push("--".into());
    args.push(url.into());
    args
}

/// Arguments for a metadata-only invocation
pub(crate) fn build_metadata_args(url: &str) -> Vec<OsString> {
    vec![
        "--dump-json".into(),
        "--no-playlist".into(),
        "--".into(),
        url.into(),
    ]
}

/// Trim stderr down to something worth surfacing to the user
fn failure_text(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "yt-dlp exited with an error and no output".to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    async fn download(
        &self,
        url: &str,
        quality: QualityPreset,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let args = build_download_args(url, quality, output_dir);
        debug!(binary = %self.binary_path.display(), %url, %quality, "invoking yt-dlp");

        let output = Command::new(&self.binary_path)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::Extractor(format!("failed to execute yt-dlp: {}", e)))?;

        if !output.status.success() {
            return Err(Error::Extractor(failure_text(&output.stderr)));
        }

        // The last non-empty stdout line is the final path printed by
        // after_move:filepath.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let reported = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from);

        let reported_is_file = match &reported {
            Some(path) => tokio::fs::metadata(path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            None => false,
        };

        match reported {
            Some(path) if reported_is_file => Ok(path),
            other => {
                // Older yt-dlp releases mangle the printed path in some
                // post-processing configurations; fall back to the newest
                // file in the output directory. The scan is blocking fs
                // work, so it runs off the async runtime.
                warn!(
                    reported = ?other,
                    "yt-dlp did not report a usable file path, scanning output directory"
                );
                let dir = output_dir.to_path_buf();
                tokio::task::spawn_blocking(move || crate::utils::latest_created_file(&dir))
                    .await
                    .map_err(|e| Error::Extractor(format!("output directory scan failed: {}", e)))??
                    .ok_or_else(|| {
                        Error::Extractor("yt-dlp succeeded but produced no output file".to_string())
                    })
            }
        }
    }

    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata> {
        let output = Command::new(&self.binary_path)
            .args(build_metadata_args(url))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::Metadata(format!("failed to execute yt-dlp: {}", e)))?;

        if !output.status.success() {
            return Err(Error::Metadata(failure_text(&output.stderr)));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::Metadata(format!("unparseable yt-dlp JSON: {}", e)))
    }

    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn args_as_strings(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn download_args_carry_the_format_selector() {
        let args = args_as_strings(&build_download_args(
            "https://example.com/v",
            QualityPreset::P720,
            Path::new("/tmp/out"),
        ));

        let format_pos = args.iter().position(|a| a == "--format").unwrap();
        assert_eq!(args[format_pos + 1], QualityPreset::P720.format_selector());
    }

    #[test]
    fn download_args_print_the_final_filepath() {
        let args = args_as_strings(&build_download_args(
            "https://example.com/v",
            QualityPreset::Best,
            Path::new("/tmp/out"),
        ));

        let print_pos = args.iter().position(|a| a == "--print").unwrap();
        assert_eq!(args[print_pos + 1], "after_move:filepath");
        assert!(args.contains(&"--no-simulate".to_string()));
    }

    #[test]
    fn download_args_place_output_template_in_output_dir() {
        let args = args_as_strings(&build_download_args(
            "https://example.com/v",
            QualityPreset::Best,
            Path::new("/data/videos"),
        ));

        let output_pos = args.iter().position(|a| a == "--output").unwrap();
        assert!(args[output_pos + 1].starts_with("/data/videos/"));
        assert!(args[output_pos + 1].contains("%(ext)s"));
    }

    #[test]
    fn video_presets_merge_to_mp4_but_audio_extracts() {
        let video = args_as_strings(&build_download_args(
            "u",
            QualityPreset::P480,
            Path::new("/tmp"),
        ));
        assert!(video.contains(&"--merge-output-format".to_string()));
        assert!(!video.contains(&"--extract-audio".to_string()));

        let audio = args_as_strings(&build_download_args(
            "u",
            QualityPreset::Audio,
            Path::new("/tmp"),
        ));
        assert!(audio.contains(&"--extract-audio".to_string()));
        assert!(!audio.contains(&"--merge-output-format".to_string()));
    }

    #[test]
    fn url_is_separated_from_options() {
        // a URL starting with a dash must not be parsed as a flag
        let args = args_as_strings(&build_download_args(
            "-weird-url",
            QualityPreset::Best,
            Path::new("/tmp"),
        ));
        let sep = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(args[sep + 1], "-weird-url");
        assert_eq!(sep + 2, args.len(), "URL must be the final argument");
    }

    #[test]
    fn metadata_args_dump_json_without_playlist() {
        let args = args_as_strings(&build_metadata_args("https://example.com/v"));
        assert!(args.contains(&"--dump-json".to_string()));
        assert!(args.contains(&"--no-playlist".to_string()));
        assert_eq!(args.last().unwrap(), "https://example.com/v");
    }

    #[test]
    fn failure_text_trims_stderr() {
        assert_eq!(failure_text(b"  ERROR: gone  \n"), "ERROR: gone");
    }

    #[test]
    fn failure_text_substitutes_for_empty_stderr() {
        assert!(failure_text(b"").contains("no output"));
    }

    #[test]
    fn from_config_prefers_explicit_path() {
        let tools = ToolsConfig {
            ytdlp_path: Some(PathBuf::from("/opt/yt-dlp")),
            search_path: false,
        };
        let extractor = YtDlpExtractor::from_config(&tools).unwrap();
        assert_eq!(extractor.binary_path(), Path::new("/opt/yt-dlp"));
    }

    #[test]
    fn from_config_without_path_or_search_is_missing() {
        let tools = ToolsConfig {
            ytdlp_path: None,
            search_path: false,
        };
        let err = YtDlpExtractor::from_config(&tools).unwrap_err();
        assert!(matches!(err, Error::ExtractorMissing(_)));
    }
}
