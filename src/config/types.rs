use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use trackmux_av::actions::TrackNames;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub modification: ModificationConfig,

    #[serde(default)]
    pub merge: MergeConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Executable path or name; looked up on PATH when unset
    #[serde(default)]
    pub mkvmerge_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    #[serde(default = "default_destination_dir")]
    pub destination_dir: PathBuf,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("./_source")
}

fn default_destination_dir() -> PathBuf {
    PathBuf::from("./_destination")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            destination_dir: default_destination_dir(),
        }
    }
}

/// Defaults for the tracks modification operation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModificationConfig {
    /// Audio languages to keep (ISO 639-1/2); empty keeps none
    #[serde(default = "default_audio_tracks")]
    pub audio_tracks: Vec<String>,

    /// Subtitle languages to keep (ISO 639-1/2); empty keeps none
    #[serde(default = "default_subtitle_tracks")]
    pub subtitle_tracks: Vec<String>,

    #[serde(default = "default_true")]
    pub change_track_names: bool,

    #[serde(default)]
    pub track_names: TrackNames,

    /// Interactive prompt defaults
    #[serde(default)]
    pub customize: bool,

    #[serde(default = "default_true")]
    pub change_audio_tracks: bool,

    #[serde(default = "default_true")]
    pub change_subtitle_tracks: bool,

    #[serde(default)]
    pub custom_file_name: bool,
}

fn default_audio_tracks() -> Vec<String> {
    vec!["en".to_string(), "ta".to_string()]
}

fn default_subtitle_tracks() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for ModificationConfig {
    fn default() -> Self {
        Self {
            audio_tracks: default_audio_tracks(),
            subtitle_tracks: default_subtitle_tracks(),
            change_track_names: true,
            track_names: TrackNames::default(),
            customize: false,
            change_audio_tracks: true,
            change_subtitle_tracks: true,
            custom_file_name: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MergeConfig {
    /// Pass `-q` to mkvmerge
    #[serde(default = "default_true")]
    pub quiet: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self { quiet: true }
    }
}
