pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./trackmux.toml",
        "~/.config/trackmux/config.toml",
        "/etc/trackmux/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    let names = &config.modification.track_names;
    for (kind, label) in [
        ("video", &names.video),
        ("audio", &names.audio),
        ("subtitle", &names.subtitle),
    ] {
        if label.trim().is_empty() {
            anyhow::bail!("Track name for {} tracks cannot be empty", kind);
        }
    }

    for (kind, languages) in [
        ("audio_tracks", &config.modification.audio_tracks),
        ("subtitle_tracks", &config.modification.subtitle_tracks),
    ] {
        if languages.iter().any(|lang| lang.trim().is_empty()) {
            anyhow::bail!("{} contains an empty language code", kind);
        }
    }

    if let Some(path) = &config.tools.mkvmerge_path {
        if path.as_os_str().is_empty() {
            anyhow::bail!("tools.mkvmerge_path cannot be empty");
        }
    }

    Ok(())
}
