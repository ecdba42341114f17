//! Trackmux-Common: shared types and path utilities.
//!
//! This crate provides the file classification used by both the batch
//! scanner and the command-line front end:
//!
//! - **Media categories**: [`MediaCategory`] for video, audio and subtitle files
//! - **Path utilities**: extension allow-lists and classification helpers
//!
//! # Examples
//!
//! ```
//! use trackmux_common::MediaCategory;
//! use trackmux_common::paths::is_video_file;
//! use std::path::Path;
//!
//! assert!(is_video_file(Path::new("movie.mkv")));
//! assert_eq!(
//!     MediaCategory::from_path(Path::new("Movie [en].aac")),
//!     Some(MediaCategory::Audio)
//! );
//! ```

pub mod paths;

pub use paths::MediaCategory;
