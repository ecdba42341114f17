//! Source directory scanner.
//!
//! Lists a source directory (flat, no recursion) and sorts its files into
//! videos, audio companions and subtitle companions by extension.

pub mod matcher;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use trackmux_common::MediaCategory;
use walkdir::WalkDir;

pub use matcher::match_companions;

/// A file found in the source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    /// File name without its extension.
    pub base_name: String,
    /// Extension without the leading dot, as written on disk.
    pub extension: String,
    pub category: MediaCategory,
}

impl SourceFile {
    /// Describe `path` if its extension is on one of the allow-lists.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let category = MediaCategory::from_path(&path)?;
        let base_name = path.file_stem()?.to_string_lossy().to_string();
        let extension = path.extension()?.to_string_lossy().to_string();

        Some(Self {
            path,
            base_name,
            extension,
            category,
        })
    }

    /// Full file name including the extension.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| format!("{}.{}", self.base_name, self.extension))
    }
}

/// Files of a source directory partitioned by category, each in listing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceListing {
    pub videos: Vec<SourceFile>,
    pub audio: Vec<SourceFile>,
    pub subtitles: Vec<SourceFile>,
}

impl SourceListing {
    /// Partition already-described files, keeping their order.
    pub fn from_files(files: impl IntoIterator<Item = SourceFile>) -> Self {
        let mut listing = Self::default();
        for file in files {
            match file.category {
                MediaCategory::Video => listing.videos.push(file),
                MediaCategory::Audio => listing.audio.push(file),
                MediaCategory::Subtitle => listing.subtitles.push(file),
            }
        }
        listing
    }
}

/// Scan `dir` for media files.
///
/// Only direct children are considered and directories are skipped. Entries
/// are returned sorted by file name so a batch runs in a stable order.
/// Files with other extensions are ignored.
pub fn scan_directory(dir: &Path) -> Result<SourceListing> {
    info!("Scanning directory: {:?}", dir);

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e).with_context(|| format!("Failed to read directory: {:?}", dir));
            }
            Err(e) => {
                warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match SourceFile::from_path(entry.path()) {
            Some(file) => files.push(file),
            None => debug!("Ignoring {:?}", entry.path()),
        }
    }

    let listing = SourceListing::from_files(files);
    info!(
        "Found {} videos, {} audio files, {} subtitle files",
        listing.videos.len(),
        listing.audio.len(),
        listing.subtitles.len()
    );

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_source_file_from_path() {
        let file = SourceFile::from_path("/src/Show S01E01.MKV").unwrap();
        assert_eq!(file.base_name, "Show S01E01");
        assert_eq!(file.extension, "MKV");
        assert_eq!(file.category, MediaCategory::Video);
        assert_eq!(file.file_name(), "Show S01E01.MKV");

        assert!(SourceFile::from_path("/src/notes.txt").is_none());
        assert!(SourceFile::from_path("/src/README").is_none());
    }

    #[test]
    fn test_scan_partitions_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.mkv");
        touch(dir.path(), "a.MP4");
        touch(dir.path(), "a.aac");
        touch(dir.path(), "a [ta].mka");
        touch(dir.path(), "a.srt");
        touch(dir.path(), "notes.txt");

        let listing = scan_directory(dir.path()).unwrap();

        let videos: Vec<_> = listing.videos.iter().map(|f| f.file_name()).collect();
        assert_eq!(videos, vec!["a.MP4", "b.mkv"]);
        let audio: Vec<_> = listing.audio.iter().map(|f| f.file_name()).collect();
        assert_eq!(audio, vec!["a [ta].mka", "a.aac"]);
        assert_eq!(listing.subtitles.len(), 1);
    }

    #[test]
    fn test_scan_is_flat_and_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("extras.mkv")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "deep.mkv");
        touch(dir.path(), "top.mkv");

        let listing = scan_directory(dir.path()).unwrap();

        assert_eq!(listing.videos.len(), 1);
        assert_eq!(listing.videos[0].base_name, "top");
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let listing = scan_directory(dir.path()).unwrap();
        assert!(listing.videos.is_empty());
        assert!(listing.audio.is_empty());
        assert!(listing.subtitles.is_empty());
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = scan_directory(&dir.path().join("missing"));
        assert!(result.is_err());
    }
}
