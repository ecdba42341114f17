use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "trackmux")]
#[command(author, version, about = "Batch track modification and merging with mkvmerge")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process every video in a source directory
    Run(RunArgs),

    /// List the tracks mkvmerge reports for a file
    Identify {
        /// File to identify
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that mkvmerge is available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Write a config file with the default settings
    InitConfig {
        /// Where to write the file
        #[arg(default_value = "trackmux.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Directory holding the videos and companion files
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Directory the merged files are written to (created if missing)
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// Operation to perform on every video
    #[arg(short, long, value_enum, default_value_t = Mode::Modify)]
    pub mode: Mode,

    /// Audio languages to keep, comma-separated (empty keeps none)
    #[arg(long, value_name = "CSV")]
    pub audio_tracks: Option<String>,

    /// Subtitle languages to keep, comma-separated (empty keeps none)
    #[arg(long, value_name = "CSV")]
    pub subtitle_tracks: Option<String>,

    /// Base name for output files; numbered when taken
    #[arg(long, value_name = "PATTERN")]
    pub rename: Option<String>,

    /// Leave track names unchanged
    #[arg(long)]
    pub no_track_names: bool,

    /// Show the mkvmerge commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,

    /// Ask for the run parameters on the terminal
    #[arg(
        short,
        long,
        conflicts_with_all = ["source", "dest", "mode", "audio_tracks", "subtitle_tracks", "rename", "no_track_names"]
    )]
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Keep wanted audio/subtitle languages and relabel tracks
    Modify,
    /// Merge matching audio/subtitle files into each video
    Append,
}
