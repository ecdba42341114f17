//! Appending external audio and subtitle files as new tracks.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// ISO 639-2 code for "undetermined".
pub const UNDETERMINED: &str = "und";

static LANGUAGE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([A-Za-z]{2,}(?:-[A-Za-z0-9]+)*)\]").expect("language tag pattern is valid")
});

/// Companion files to merge into one video, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendTracks {
    pub audio_files: Vec<PathBuf>,
    pub subtitle_files: Vec<PathBuf>,
}

impl AppendTracks {
    pub fn is_empty(&self) -> bool {
        self.audio_files.is_empty() && self.subtitle_files.is_empty()
    }
}

/// Language of a companion file from a bracketed tag in its file name.
///
/// A tag is a language code of two or more letters, optionally followed by
/// subtags as in `[pt-BR]` or `[zh-Hant]`.
///
/// Only the file name is inspected, so brackets in parent directories are
/// ignored. Files without a tag are `und`.
///
/// # Example
///
/// ```
/// use trackmux_av::actions::language_tag;
/// use std::path::Path;
///
/// assert_eq!(language_tag(Path::new("/media/Track[en].aac")), "en");
/// assert_eq!(language_tag(Path::new("/media/Track.aac")), "und");
/// ```
pub fn language_tag(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| {
            LANGUAGE_TAG
                .captures(&name)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .unwrap_or_else(|| UNDETERMINED.to_string())
}

pub(super) fn push_args(args: &mut Vec<String>, request: &AppendTracks) {
    for file in request.audio_files.iter().chain(&request.subtitle_files) {
        args.push("--language".to_string());
        args.push(format!("0:{}", language_tag(file)));
        args.push(file.to_string_lossy().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tag() {
        assert_eq!(language_tag(Path::new("Show S01E01 [en].srt")), "en");
        assert_eq!(language_tag(Path::new("Show S01E01[tam].aac")), "tam");
        assert_eq!(language_tag(Path::new("Show S01E01.aac")), "und");
    }

    #[test]
    fn test_language_tag_rejects_non_language_brackets() {
        assert_eq!(language_tag(Path::new("Show [1080p].aac")), "und");
        assert_eq!(language_tag(Path::new("Show [x].srt")), "und");
        assert_eq!(language_tag(Path::new("Show [].srt")), "und");
    }

    #[test]
    fn test_language_tag_ignores_directories() {
        assert_eq!(language_tag(Path::new("/media/[fr]/Show.srt")), "und");
    }

    #[test]
    fn test_first_tag_wins() {
        assert_eq!(language_tag(Path::new("Show [en] [de].srt")), "en");
    }

    #[test]
    fn test_audio_before_subtitles() {
        let request = AppendTracks {
            audio_files: vec![PathBuf::from("a [ta].mka"), PathBuf::from("a.aac")],
            subtitle_files: vec![PathBuf::from("a [en].srt")],
        };
        let mut args = Vec::new();
        push_args(&mut args, &request);

        assert_eq!(
            args,
            [
                "--language", "0:ta", "a [ta].mka",
                "--language", "0:und", "a.aac",
                "--language", "0:en", "a [en].srt",
            ]
        );
    }

    #[test]
    fn test_empty_request_adds_nothing() {
        let mut args = Vec::new();
        push_args(&mut args, &AppendTracks::default());
        assert!(args.is_empty());
        assert!(AppendTracks::default().is_empty());
    }

    #[test]
    fn test_language_tag_with_subtags() {
        assert_eq!(language_tag(Path::new("Movie [pt-BR].aac")), "pt-BR");
        assert_eq!(language_tag(Path::new("Movie [zh-Hant-TW].srt")), "zh-Hant-TW");
        assert_eq!(language_tag(Path::new("Movie [es-419].srt")), "es-419");
        assert_eq!(language_tag(Path::new("Movie [en-].srt")), "und");
    }
}
