//! Utility functions for file discovery and response metadata

use crate::error::Result;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Find the most recently created regular file in a directory
///
/// Subdirectories and entries whose metadata cannot be read are skipped.
/// Falls back to the modification time on filesystems that do not record
/// creation time. Returns `Ok(None)` for an empty or missing directory.
///
/// This backs the UI's "download latest" button. Retrieval by job id uses the
/// path the extractor reported instead, so a leftover file from a prior run
/// cannot be served in place of a specific job's artifact.
pub fn latest_created_file(dir: &Path) -> Result<Option<PathBuf>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let Ok(stamp) = metadata.created().or_else(|_| metadata.modified()) else {
            continue;
        };

        match &newest {
            Some((best, _)) if *best >= stamp => {}
            _ => newest = Some((stamp, path)),
        }
    }

    Ok(newest.map(|(_, path)| path))
}

/// Best-guess content type for a downloaded file, keyed on its extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("opus") => "audio/opus",
        Some("ogg") => "audio/ogg",
        Some("wav") => "audio/wav",
        _ => "application/octet-stream",
    }
}

/// File name component of a path, for the Content-Disposition header
///
/// yt-dlp derives file names from video titles, so the name can contain
/// anything. The result is safe to place inside a quoted-string header
/// value: `"` and `\` are backslash-escaped and control characters dropped
/// (HeaderValue rejects them outright).
///
/// Falls back to a fixed name when the path has no usable UTF-8 file name.
pub fn download_file_name(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("download");

    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }

    if escaped.is_empty() {
        "download".to_string()
    } else {
        escaped
    }
}
