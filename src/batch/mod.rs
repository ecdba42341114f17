//! Batch orchestration.
//!
//! Runs one mkvmerge invocation per video found in a source directory. Files
//! are handled strictly one after another and a failing file never stops the
//! batch: every video gets an [`InvocationResult`] in the final
//! [`BatchReport`].

pub mod naming;

use crate::config::{Config, ModificationConfig};
use crate::scanner::{match_companions, scan_directory, SourceFile, SourceListing};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use trackmux_av::actions::{AppendTracks, TrackFilter, TrackNames, TracksModification};
use trackmux_av::{MergeCommandBuilder, MergeOutcome, MergeRequest, Muxer, Track};

/// mkvmerge exit status for "finished with warnings".
const EXIT_WARNINGS: i32 = 1;

/// What to do with every video of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Apply the same filters and labels to every video.
    TracksModification(TracksModification),
    /// Merge each video's companion files, matched by name.
    AppendTracks,
}

impl Operation {
    /// Tracks modification using the configured defaults and no rename pattern.
    pub fn modification_from_config(config: &ModificationConfig) -> Self {
        Self::TracksModification(TracksModification {
            audio_tracks: TrackFilter::languages(config.audio_tracks.iter().cloned()),
            subtitle_tracks: TrackFilter::languages(config.subtitle_tracks.iter().cloned()),
            rename_pattern: None,
            change_track_names: config.change_track_names,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TracksModification(_) => "Tracks Modification",
            Self::AppendTracks => "Append Tracks",
        }
    }
}

/// Fixed settings for one orchestrator.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub track_names: TrackNames,
    pub quiet: bool,
    /// Build commands without running mkvmerge.
    pub dry_run: bool,
}

impl BatchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            track_names: config.modification.track_names.clone(),
            quiet: config.merge.quiet,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Outcome of processing one video.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationResult {
    pub video: PathBuf,
    pub output: PathBuf,
    /// Arguments passed to mkvmerge (excluding the program).
    pub args: Vec<String>,
    /// Exit code, `None` when mkvmerge could not be run or was killed.
    pub exit_code: Option<i32>,
    pub succeeded: bool,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InvocationResult {
    fn planned(video: &SourceFile, output: PathBuf, args: Vec<String>) -> Self {
        Self {
            video: video.path.clone(),
            output,
            args,
            exit_code: None,
            succeeded: true,
            dry_run: true,
            message: None,
        }
    }

    fn completed(
        video: &SourceFile,
        output: PathBuf,
        args: Vec<String>,
        outcome: MergeOutcome,
    ) -> Self {
        Self {
            video: video.path.clone(),
            output,
            args,
            exit_code: outcome.exit_code,
            succeeded: outcome.success(),
            dry_run: false,
            message: outcome.message,
        }
    }

    fn not_run(video: &SourceFile, output: PathBuf, args: Vec<String>, error: String) -> Self {
        Self {
            video: video.path.clone(),
            output,
            args,
            exit_code: None,
            succeeded: false,
            dry_run: false,
            message: Some(error),
        }
    }

    /// mkvmerge finished but reported warnings; the output usually exists.
    pub fn has_warnings(&self) -> bool {
        self.exit_code == Some(EXIT_WARNINGS)
    }
}

/// Results of a batch, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub results: Vec<InvocationResult>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.succeeded).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Progress notification emitted around each video.
#[derive(Debug, Clone, Copy)]
pub enum BatchEvent<'a> {
    Started {
        /// 1-based position in the batch.
        position: usize,
        total: usize,
        video: &'a SourceFile,
    },
    Finished {
        position: usize,
        total: usize,
        result: &'a InvocationResult,
    },
}

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(BatchEvent<'_>)>;

/// Drives a [`Muxer`] over every video of a source directory.
pub struct BatchOrchestrator<M: Muxer> {
    muxer: M,
    builder: MergeCommandBuilder,
    dry_run: bool,
    progress_callback: Option<ProgressCallback>,
}

impl<M: Muxer> BatchOrchestrator<M> {
    pub fn new(muxer: M, settings: BatchSettings) -> Self {
        Self {
            muxer,
            builder: MergeCommandBuilder::new(settings.track_names).quiet(settings.quiet),
            dry_run: settings.dry_run,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn muxer(&self) -> &M {
        &self.muxer
    }

    fn report_progress(&self, event: BatchEvent<'_>) {
        if let Some(ref cb) = self.progress_callback {
            cb(event);
        }
    }

    /// Scan `source_dir` and process every video found.
    pub fn run(&self, source_dir: &Path, dest_dir: &Path, operation: &Operation) -> Result<BatchReport> {
        let listing = scan_directory(source_dir)?;
        Ok(self.run_listing(&listing, dest_dir, operation))
    }

    /// Process every video of an existing listing.
    ///
    /// `dest_dir` must already exist. Companions for append mode are taken
    /// from the listing's audio and subtitle pools.
    pub fn run_listing(
        &self,
        listing: &SourceListing,
        dest_dir: &Path,
        operation: &Operation,
    ) -> BatchReport {
        let total = listing.videos.len();
        info!(
            "Starting {} for {} videos into {:?}",
            operation.name(),
            total,
            dest_dir
        );

        // Modification uses one request for the whole batch.
        let fixed_request = match operation {
            Operation::TracksModification(modification) => {
                Some(MergeRequest::TracksModification(modification.clone()))
            }
            Operation::AppendTracks => None,
        };

        let mut report = BatchReport {
            results: Vec::with_capacity(total),
        };
        // Output names handed out so far; a dry run creates no files to probe.
        let mut allocated = HashSet::new();

        for (index, video) in listing.videos.iter().enumerate() {
            let position = index + 1;
            self.report_progress(BatchEvent::Started {
                position,
                total,
                video,
            });
            info!("[{}/{}] {}", position, total, video.file_name());

            let appended;
            let request = match &fixed_request {
                Some(request) => request,
                None => {
                    let companions = companions_for(video, listing);
                    if companions.is_empty() {
                        warn!("No companion files match {:?}", video.file_name());
                    }
                    appended = MergeRequest::AppendTracks(companions);
                    &appended
                }
            };

            let result = self.process_video(video, request, dest_dir, &mut allocated);
            if !result.succeeded {
                warn!(
                    "mkvmerge failed for {:?} (exit code {:?}): {}",
                    video.path,
                    result.exit_code,
                    result.message.as_deref().unwrap_or("no output")
                );
            } else if result.has_warnings() {
                warn!("mkvmerge reported warnings for {:?}", video.path);
            }

            self.report_progress(BatchEvent::Finished {
                position,
                total,
                result: &result,
            });
            report.results.push(result);
        }

        info!(
            "Batch complete: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        report
    }

    fn process_video(
        &self,
        video: &SourceFile,
        request: &MergeRequest,
        dest_dir: &Path,
        allocated: &mut HashSet<String>,
    ) -> InvocationResult {
        let rename_pattern = match request {
            MergeRequest::TracksModification(modification) => modification.rename_pattern.as_deref(),
            MergeRequest::AppendTracks(_) => None,
        };
        let file_name = naming::output_file_name(rename_pattern, video, dest_dir, allocated);
        let output = dest_dir.join(&file_name);
        allocated.insert(file_name);

        let tracks = if request.needs_track_list() {
            self.identify(video)
        } else {
            Vec::new()
        };

        let args = self.builder.build(request, &video.path, &output, &tracks);
        debug!("{} {}", self.muxer.name(), args.join(" "));

        if self.dry_run {
            info!("[DRY RUN] Would write {:?}", output);
            return InvocationResult::planned(video, output, args);
        }

        match self.muxer.merge(&args) {
            Ok(outcome) => InvocationResult::completed(video, output, args, outcome),
            Err(e) => InvocationResult::not_run(video, output, args, e.to_string()),
        }
    }

    /// Track listing of a video; failures leave the tracks unlabelled.
    fn identify(&self, video: &SourceFile) -> Vec<Track> {
        match self.muxer.identify(&video.path) {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(
                    "Failed to identify tracks in {:?}, track names unchanged: {}",
                    video.path, e
                );
                Vec::new()
            }
        }
    }
}

/// Companion files matched to `video` from the listing's pools.
fn companions_for(video: &SourceFile, listing: &SourceListing) -> AppendTracks {
    let paths = |pool: &[SourceFile]| -> Vec<PathBuf> {
        match_companions(&video.base_name, pool)
            .into_iter()
            .map(|file| file.path.clone())
            .collect()
    };

    AppendTracks {
        audio_files: paths(&listing.audio),
        subtitle_files: paths(&listing.subtitles),
    }
}
