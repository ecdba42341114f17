//! Path utilities for classifying files by extension.
//!
//! Classification is by a fixed allow-list per category and is
//! case-insensitive. Files outside every list are ignored by the scanner.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// List of supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi"];

/// List of supported audio file extensions.
const AUDIO_EXTENSIONS: &[&str] = &["aac", "m4a", "mp3", "ac3", "mka"];

/// List of supported subtitle file extensions.
const SUBTITLE_EXTENSIONS: &[&str] = &["srt"];

/// Category of a source file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Video,
    Audio,
    Subtitle,
}

impl MediaCategory {
    /// Classify a bare extension (without the leading dot).
    ///
    /// # Examples
    ///
    /// ```
    /// use trackmux_common::MediaCategory;
    ///
    /// assert_eq!(MediaCategory::from_extension("MKV"), Some(MediaCategory::Video));
    /// assert_eq!(MediaCategory::from_extension("txt"), None);
    /// ```
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Audio)
        } else if SUBTITLE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Subtitle)
        } else {
            None
        }
    }

    /// Classify a path by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Extensions belonging to this category.
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Video => VIDEO_EXTENSIONS,
            Self::Audio => AUDIO_EXTENSIONS,
            Self::Subtitle => SUBTITLE_EXTENSIONS,
        }
    }
}

impl std::fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Subtitle => write!(f, "subtitle"),
        }
    }
}

/// Check if a path has a video file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use trackmux_common::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("movie.mkv")));
/// assert!(is_video_file(Path::new("/path/to/video.MP4")));
/// assert!(!is_video_file(Path::new("subtitle.srt")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    MediaCategory::from_path(path) == Some(MediaCategory::Video)
}
