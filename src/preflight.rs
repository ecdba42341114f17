//! Checks run before a batch starts.
//!
//! Any failure here stops the run before a single file is touched.

use crate::scanner::{scan_directory, SourceListing};
use std::path::{Path, PathBuf};
use thiserror::Error;
use trackmux_common::MediaCategory;
use trackmux_av::Mkvmerge;

#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("mkvmerge is not available: {0}")]
    ToolMissing(#[source] trackmux_av::Error),

    #[error("Source directory does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error(
        "No video files found in {} (looking for {})",
        .0.display(),
        MediaCategory::Video.extensions().join(", ")
    )]
    NoVideos(PathBuf),

    #[error("Failed to create destination directory {}: {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan {}: {message}", path.display())]
    Scan { path: PathBuf, message: String },
}

/// Resolve the mkvmerge executable, preferring the configured path.
pub fn locate_muxer(configured: Option<&Path>) -> Result<Mkvmerge, PreconditionError> {
    Mkvmerge::discover(configured).map_err(PreconditionError::ToolMissing)
}

/// Scan the source directory, requiring it to hold at least one video.
pub fn check_source(source_dir: &Path) -> Result<SourceListing, PreconditionError> {
    if !source_dir.is_dir() {
        return Err(PreconditionError::SourceMissing(source_dir.to_path_buf()));
    }

    let listing = scan_directory(source_dir).map_err(|e| PreconditionError::Scan {
        path: source_dir.to_path_buf(),
        message: format!("{e:#}"),
    })?;

    if listing.videos.is_empty() {
        return Err(PreconditionError::NoVideos(source_dir.to_path_buf()));
    }

    Ok(listing)
}

/// Create the destination directory if it does not exist yet.
pub fn ensure_destination(dest_dir: &Path) -> Result<(), PreconditionError> {
    std::fs::create_dir_all(dest_dir).map_err(|source| PreconditionError::Destination {
        path: dest_dir.to_path_buf(),
        source,
    })
}
