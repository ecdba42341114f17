//! Track listing from `mkvmerge --identify` output.
//!
//! The identify report is human-readable text, not a structured format, so
//! this is best-effort scraping. A typical report looks like:
//!
//! ```text
//! File 'movie.mkv': container: Matroska
//! Track ID 0: video (AVC/H.264/MPEG-4p10)
//! Track ID 1: audio (AAC)
//! Track ID 2: subtitles (SubRip/SRT)
//! ```
//!
//! Lines that do not look like track descriptions are skipped without error.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Marker every track description line carries.
const TRACK_MARKER: &str = "Track ID";

static TRACK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Track ID (\d+): ([\w/]+)(?: \(([^)]*)\))?").expect("track line pattern is valid")
});

/// Kind of a track as reported by the muxer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Subtitle,
    Unknown,
}

impl TrackKind {
    /// Classify a type token from the identify report.
    ///
    /// Matching is case-sensitive substring containment against mkvmerge's
    /// fixed vocabulary ("video", "audio", "subtitles").
    pub fn classify(token: &str) -> Self {
        if token.contains("video") {
            Self::Video
        } else if token.contains("audio") {
            Self::Audio
        } else if token.contains("subtitles") {
            Self::Subtitle
        } else {
            Self::Unknown
        }
    }
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Subtitle => write!(f, "subtitle"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A single track inside a container file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// mkvmerge track ID.
    pub id: u32,
    /// Classified track kind.
    pub kind: TrackKind,
    /// Codec description in parentheses after the type, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
}

impl Track {
    pub fn new(id: u32, kind: TrackKind) -> Self {
        Self {
            id,
            kind,
            codec: None,
        }
    }
}

/// Parse an identify report into the tracks it describes.
///
/// Never fails: unrecognized lines are dropped and an empty report yields an
/// empty list.
///
/// # Example
///
/// ```
/// use trackmux_av::{parse_track_list, Track, TrackKind};
///
/// let tracks = parse_track_list("Track ID 2: audio (AAC)\n");
/// assert_eq!(tracks[0].id, 2);
/// assert_eq!(tracks[0].kind, TrackKind::Audio);
/// ```
pub fn parse_track_list(raw: &str) -> Vec<Track> {
    raw.lines()
        .filter(|line| line.contains(TRACK_MARKER))
        .filter_map(parse_track_line)
        .collect()
}

fn parse_track_line(line: &str) -> Option<Track> {
    let caps = TRACK_LINE.captures(line)?;
    let id = caps.get(1)?.as_str().parse().ok()?;
    let kind = TrackKind::classify(caps.get(2)?.as_str());
    let codec = caps.get(3).map(|m| m.as_str().to_string());

    Some(Track { id, kind, codec })
}
