//! The external multiplexer seam.
//!
//! [`Muxer`] abstracts the two calls the batch makes against mkvmerge so the
//! orchestration can be exercised without the real tool installed.

use crate::command::ToolCommand;
use crate::identify::{parse_track_list, Track};
use crate::tools::{get_tool_path, MKVMERGE};
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Outcome of one merge invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Process exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Diagnostic text printed by the tool, trimmed.
    pub message: Option<String>,
}

impl MergeOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// An external tool able to list and merge tracks.
pub trait Muxer {
    /// Human-readable name identifying this muxer.
    fn name(&self) -> &str;

    /// List the tracks of a container file.
    ///
    /// An unrecognized report yields an empty list, not an error; errors are
    /// reserved for a missing input file or failing to run the tool at all.
    fn identify(&self, path: &Path) -> Result<Vec<Track>>;

    /// Run a merge with a fully built argument list.
    ///
    /// A non-zero exit is reported through [`MergeOutcome`], not as an error.
    fn merge(&self, args: &[String]) -> Result<MergeOutcome>;
}

/// [`Muxer`] backed by the mkvmerge executable.
#[derive(Debug, Clone)]
pub struct Mkvmerge {
    path: PathBuf,
}

impl Mkvmerge {
    /// Use the executable at `path` without checking it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate mkvmerge, preferring a configured path over `PATH`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if neither location has the tool.
    pub fn discover(config_path: Option<&Path>) -> Result<Self> {
        get_tool_path(MKVMERGE, config_path).map(Self::new)
    }

    /// Path to the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Muxer for Mkvmerge {
    fn name(&self) -> &str {
        MKVMERGE
    }

    fn identify(&self, path: &Path) -> Result<Vec<Track>> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        if path.is_dir() {
            return Err(Error::InvalidInput(format!(
                "{} is a directory",
                path.display()
            )));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Identifying tracks in {:?}", path);

        let mut cmd = ToolCommand::new(self.path.clone());
        cmd.arg("--identify");
        cmd.arg(path.to_string_lossy().as_ref());

        // The report is scraped even on a non-zero exit; a bad file just
        // yields fewer recognized lines.
        let output = cmd.output()?;
        let tracks = parse_track_list(&output.stdout);

        #[cfg(feature = "tracing")]
        tracing::debug!("Found {} tracks in {:?}", tracks.len(), path);

        Ok(tracks)
    }

    fn merge(&self, args: &[String]) -> Result<MergeOutcome> {
        #[cfg(feature = "tracing")]
        tracing::debug!("Running {} {}", self.path.display(), args.join(" "));

        let mut cmd = ToolCommand::new(self.path.clone());
        cmd.args(args.iter().cloned());
        let output = cmd.output()?;

        // mkvmerge prints warnings and errors on stdout.
        let message = [output.stderr.trim(), output.stdout.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(str::to_string);

        Ok(MergeOutcome {
            exit_code: output.code(),
            message,
        })
    }
}
