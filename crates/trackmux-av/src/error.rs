//! Error types for trackmux-av.
//!
//! A merge that runs but exits non-zero is not an error here; it is reported
//! through [`crate::MergeOutcome`]. These variants cover failing to run the
//! tool at all.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The muxer executable could not be located or spawned.
    #[error("{tool} not found (install MKVToolNix or configure its path)")]
    ToolNotFound { tool: String },

    /// The muxer ran but rejected the request.
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    #[error("no such file: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Arguments that cannot describe a muxer input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::tool_not_found("mkvmerge").to_string(),
            "mkvmerge not found (install MKVToolNix or configure its path)"
        );
        assert_eq!(
            Error::tool_failed("mkvmerge", "exit 2").to_string(),
            "mkvmerge failed: exit 2"
        );
        assert_eq!(
            Error::file_not_found("/videos/missing.mkv").to_string(),
            "no such file: /videos/missing.mkv"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
