//! mkvmerge command construction.
//!
//! This module turns a [`MergeRequest`] into the argument list for one
//! mkvmerge invocation. Two operations are supported:
//! - Tracks modification: keep selected audio/subtitle languages and relabel tracks
//! - Track appending: attach external audio/subtitle files to a video
//!
//! Building arguments is pure formatting. Language codes and file existence
//! are not validated here; mkvmerge reports them when it runs.

mod append;
mod modify;

pub use append::{language_tag, AppendTracks, UNDETERMINED};
pub use modify::{TrackFilter, TrackNames, TracksModification};

use crate::identify::Track;
use std::path::Path;

/// One operation to perform on a single video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeRequest {
    /// Keep wanted tracks, drop the rest, optionally relabel tracks.
    TracksModification(TracksModification),
    /// Merge external audio/subtitle files into the video as new tracks.
    AppendTracks(AppendTracks),
}

impl MergeRequest {
    /// Whether building this request needs the source's track listing.
    pub fn needs_track_list(&self) -> bool {
        matches!(self, Self::TracksModification(m) if m.change_track_names)
    }
}

/// Builds mkvmerge argument lists from requests.
///
/// # Example
///
/// ```
/// use trackmux_av::actions::{MergeCommandBuilder, MergeRequest, TrackFilter, TrackNames, TracksModification};
/// use std::path::Path;
///
/// let builder = MergeCommandBuilder::new(TrackNames::default());
/// let request = MergeRequest::TracksModification(TracksModification {
///     audio_tracks: TrackFilter::languages(["en"]),
///     subtitle_tracks: TrackFilter::keep_none(),
///     rename_pattern: None,
///     change_track_names: false,
/// });
/// let args = builder.build(&request, Path::new("in.mkv"), Path::new("out/in.mkv"), &[]);
/// assert!(args.windows(2).any(|w| w == ["--subtitle-tracks", "-1"]));
/// ```
#[derive(Debug, Clone)]
pub struct MergeCommandBuilder {
    track_names: TrackNames,
    quiet: bool,
}

impl MergeCommandBuilder {
    /// Create a builder using the given per-kind track labels.
    pub fn new(track_names: TrackNames) -> Self {
        Self {
            track_names,
            quiet: true,
        }
    }

    /// Toggle mkvmerge's `-q` flag.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Build the full argument list (excluding the program itself).
    ///
    /// `tracks` is the source's track listing and is only consulted for
    /// tracks modification with renaming enabled.
    pub fn build(
        &self,
        request: &MergeRequest,
        source: &Path,
        output: &Path,
        tracks: &[Track],
    ) -> Vec<String> {
        let mut args = Vec::new();

        if self.quiet {
            args.push("-q".to_string());
        }
        args.push("-o".to_string());
        args.push(output.to_string_lossy().to_string());

        // Video track language is always reset to undetermined.
        args.push("--language".to_string());
        args.push(format!("0:{UNDETERMINED}"));

        match request {
            MergeRequest::TracksModification(modification) => {
                modify::push_args(&mut args, modification, &self.track_names, tracks)
            }
            MergeRequest::AppendTracks(append) => append::push_args(&mut args, append),
        }

        args.push(source.to_string_lossy().to_string());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identify::TrackKind;
    use std::path::PathBuf;

    fn modification(audio: TrackFilter, subs: TrackFilter, rename: bool) -> MergeRequest {
        MergeRequest::TracksModification(TracksModification {
            audio_tracks: audio,
            subtitle_tracks: subs,
            rename_pattern: None,
            change_track_names: rename,
        })
    }

    fn contains_seq(args: &[String], seq: &[&str]) -> bool {
        args.windows(seq.len()).any(|w| w == seq)
    }

    #[test]
    fn test_output_first_source_last() {
        let builder = MergeCommandBuilder::new(TrackNames::default());
        let args = builder.build(
            &modification(TrackFilter::keep_none(), TrackFilter::keep_none(), false),
            Path::new("/src/Movie.mkv"),
            Path::new("/dst/Movie.mkv"),
            &[],
        );

        assert_eq!(&args[..5], ["-q", "-o", "/dst/Movie.mkv", "--language", "0:und"]);
        assert_eq!(args.last().map(String::as_str), Some("/src/Movie.mkv"));
    }

    #[test]
    fn test_quiet_can_be_disabled() {
        let builder = MergeCommandBuilder::new(TrackNames::default()).quiet(false);
        let args = builder.build(
            &modification(TrackFilter::keep_none(), TrackFilter::keep_none(), false),
            Path::new("a.mkv"),
            Path::new("b.mkv"),
            &[],
        );
        assert_eq!(args[0], "-o");
        assert!(!args.contains(&"-q".to_string()));
    }

    #[test]
    fn test_default_deny_filters() {
        let builder = MergeCommandBuilder::new(TrackNames::default());
        let args = builder.build(
            &modification(TrackFilter::keep_none(), TrackFilter::keep_none(), false),
            Path::new("a.mkv"),
            Path::new("b.mkv"),
            &[],
        );
        assert!(contains_seq(&args, &["--audio-tracks", "-1"]));
        assert!(contains_seq(&args, &["--subtitle-tracks", "-1"]));
    }

    #[test]
    fn test_modification_scenario() {
        let builder = MergeCommandBuilder::new(TrackNames::default());
        let tracks = [
            Track::new(0, TrackKind::Video),
            Track::new(1, TrackKind::Audio),
            Track::new(2, TrackKind::Subtitle),
            Track::new(3, TrackKind::Unknown),
        ];
        let args = builder.build(
            &modification(TrackFilter::languages(["en"]), TrackFilter::keep_none(), true),
            Path::new("in.mkv"),
            Path::new("out.mkv"),
            &tracks,
        );

        assert!(contains_seq(&args, &["--audio-tracks", "en"]));
        assert!(contains_seq(&args, &["--subtitle-tracks", "-1"]));
        assert!(contains_seq(&args, &["--track-name", "0:Video Track"]));
        assert!(contains_seq(&args, &["--track-name", "1:Audio Track"]));
        assert!(contains_seq(&args, &["--track-name", "2:Subtitle Track"]));
        assert!(!args.iter().any(|a| a.starts_with("3:")));
    }

    #[test]
    fn test_append_scenario() {
        let builder = MergeCommandBuilder::new(TrackNames::default());
        let request = MergeRequest::AppendTracks(AppendTracks {
            audio_files: vec![PathBuf::from("/src/Movie.aac")],
            subtitle_files: vec![PathBuf::from("/src/Movie [en].srt")],
        });
        let args = builder.build(
            &request,
            Path::new("/src/Movie.mkv"),
            Path::new("/dst/Movie.mkv"),
            &[],
        );

        assert!(contains_seq(&args, &["--language", "0:und", "/src/Movie.aac"]));
        assert!(contains_seq(&args, &["--language", "0:en", "/src/Movie [en].srt"]));
        assert!(!args.contains(&"--audio-tracks".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("/src/Movie.mkv"));
    }

    #[test]
    fn test_needs_track_list() {
        assert!(modification(TrackFilter::keep_none(), TrackFilter::keep_none(), true)
            .needs_track_list());
        assert!(!modification(TrackFilter::keep_none(), TrackFilter::keep_none(), false)
            .needs_track_list());
        assert!(!MergeRequest::AppendTracks(AppendTracks::default()).needs_track_list());
    }
}
