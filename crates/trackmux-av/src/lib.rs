//! # trackmux-av
//!
//! mkvmerge integration for batch track processing.
//!
//! This crate provides functionality for:
//! - Locating the mkvmerge executable
//! - Listing the tracks of a container from `mkvmerge --identify`
//! - Building merge command lines that filter, relabel or append tracks
//! - Running those commands behind the [`Muxer`] trait
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use trackmux_av::{Mkvmerge, Muxer};
//! use std::path::Path;
//!
//! let mkvmerge = Mkvmerge::discover(None)?;
//! for track in mkvmerge.identify(Path::new("/path/to/video.mkv"))? {
//!     println!("{}: {}", track.id, track.kind);
//! }
//! # Ok::<(), trackmux_av::Error>(())
//! ```

mod error;
pub mod actions;
pub mod command;
pub mod identify;
pub mod muxer;
pub mod tools;

// Re-exports
pub use actions::{MergeCommandBuilder, MergeRequest};
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use identify::{parse_track_list, Track, TrackKind};
pub use muxer::{MergeOutcome, Mkvmerge, Muxer};
pub use tools::{check_tool, get_tool_path, require_tool, ToolInfo, MKVMERGE};
