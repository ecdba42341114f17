//! Tracks modification: language filters and track relabeling.

use crate::identify::{Track, TrackKind};
use serde::{Deserialize, Serialize};

/// Filter value mkvmerge reads as "keep no tracks of this type".
const KEEP_NONE: &str = "-1";

/// Allow-list of track languages to keep.
///
/// An absent or empty list keeps nothing: there is no "keep all" value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackFilter(Option<Vec<String>>);

impl TrackFilter {
    /// Keep no tracks of this type.
    pub fn keep_none() -> Self {
        Self(None)
    }

    /// Keep tracks in the given languages, passed to mkvmerge verbatim.
    pub fn languages(languages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(Some(languages.into_iter().map(Into::into).collect()))
    }

    /// Parse a comma-separated list such as `"en, ta"`.
    ///
    /// Entries are trimmed and blanks dropped; a list with no entries left
    /// keeps nothing.
    pub fn from_csv(csv: &str) -> Self {
        let languages: Vec<String> = csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if languages.is_empty() {
            Self::keep_none()
        } else {
            Self(Some(languages))
        }
    }

    /// Languages kept, if any.
    pub fn as_slice(&self) -> &[String] {
        self.0.as_deref().unwrap_or(&[])
    }

    /// Whether this filter keeps nothing.
    pub fn is_keep_none(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Render as an mkvmerge `--*-tracks` value.
    pub fn to_arg(&self) -> String {
        if self.is_keep_none() {
            KEEP_NONE.to_string()
        } else {
            self.as_slice().join(",")
        }
    }
}

impl From<Option<Vec<String>>> for TrackFilter {
    fn from(languages: Option<Vec<String>>) -> Self {
        Self(languages)
    }
}

impl std::fmt::Display for TrackFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_keep_none() {
            write!(f, "none")
        } else {
            write!(f, "{}", self.as_slice().join(", "))
        }
    }
}

/// Labels applied to tracks when renaming, one per track kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackNames {
    #[serde(default = "default_video_name")]
    pub video: String,

    #[serde(default = "default_audio_name")]
    pub audio: String,

    #[serde(default = "default_subtitle_name")]
    pub subtitle: String,
}

fn default_video_name() -> String {
    "Video Track".to_string()
}

fn default_audio_name() -> String {
    "Audio Track".to_string()
}

fn default_subtitle_name() -> String {
    "Subtitle Track".to_string()
}

impl Default for TrackNames {
    fn default() -> Self {
        Self {
            video: default_video_name(),
            audio: default_audio_name(),
            subtitle: default_subtitle_name(),
        }
    }
}

impl TrackNames {
    /// Label for a track kind; unknown tracks have none.
    pub fn label(&self, kind: TrackKind) -> Option<&str> {
        match kind {
            TrackKind::Video => Some(self.video.as_str()),
            TrackKind::Audio => Some(self.audio.as_str()),
            TrackKind::Subtitle => Some(self.subtitle.as_str()),
            TrackKind::Unknown => None,
        }
    }
}

/// Parameters of a tracks modification, shared by every video in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracksModification {
    /// Audio languages to keep.
    pub audio_tracks: TrackFilter,
    /// Subtitle languages to keep.
    pub subtitle_tracks: TrackFilter,
    /// Base name for outputs; `None` keeps each source's file name.
    pub rename_pattern: Option<String>,
    /// Relabel every recognized track with its kind's name.
    pub change_track_names: bool,
}

pub(super) fn push_args(
    args: &mut Vec<String>,
    request: &TracksModification,
    names: &TrackNames,
    tracks: &[Track],
) {
    args.push("--audio-tracks".to_string());
    args.push(request.audio_tracks.to_arg());
    args.push("--subtitle-tracks".to_string());
    args.push(request.subtitle_tracks.to_arg());

    if !request.change_track_names {
        return;
    }

    for track in tracks {
        if let Some(label) = names.label(track.kind) {
            args.push("--track-name".to_string());
            args.push(format!("{}:{}", track.id, label));
        }
    }
}
