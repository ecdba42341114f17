//! External tool detection.

use crate::command::ToolCommand;
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default name of the multiplexer executable looked up on `PATH`.
pub const MKVMERGE: &str = "mkvmerge";

/// Information about an external tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available and get its information.
///
/// `program` may be a bare name resolved through `PATH` or a path to the
/// executable.
///
/// # Example
///
/// ```no_run
/// use trackmux_av::check_tool;
///
/// let info = check_tool("mkvmerge");
/// if info.available {
///     println!("mkvmerge version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(program: &str) -> ToolInfo {
    let mut cmd = ToolCommand::new(PathBuf::from(program));
    cmd.arg("--version");

    match cmd.execute() {
        // mkvmerge answers "mkvmerge v80.0 ('Roundabout') 64-bit".
        Ok(output) => ToolInfo {
            name: program.to_string(),
            available: true,
            version: output.stdout.lines().next().map(str::to_string),
            path: which::which(program).ok(),
        },
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("{} is unavailable: {}", program, _e);

            ToolInfo {
                name: program.to_string(),
                available: false,
                version: None,
                path: None,
            }
        }
    }
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
///
/// A configured path that does not exist is looked up on `PATH` as well, so
/// a bare program name in the configuration still resolves.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        if let Ok(found) = which::which(path) {
            return Ok(found);
        }
        return Err(Error::tool_not_found(path.display().to_string()));
    }

    require_tool(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tool_not_found() {
        let info = check_tool("nonexistent_tool_12345");
        assert!(!info.available);
        assert!(info.version.is_none());
        assert!(info.path.is_none());
    }

    #[test]
    fn test_require_missing_tool() {
        let err = require_tool("nonexistent_tool_12345").unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }

    #[test]
    fn test_configured_path_wins() {
        let dir = std::env::temp_dir();
        let fake = dir.join(format!("trackmux-fake-tool-{}", std::process::id()));
        std::fs::write(&fake, b"").unwrap();

        let resolved = get_tool_path(MKVMERGE, Some(&fake)).unwrap();
        assert_eq!(resolved, fake);

        std::fs::remove_file(&fake).unwrap();
    }

    #[test]
    fn test_configured_path_missing() {
        let result = get_tool_path(MKVMERGE, Some(Path::new("/nonexistent/bin/mkvmerge")));
        assert!(matches!(result, Err(Error::ToolNotFound { .. })));
    }
}
