//! Interactive collection of batch parameters.
//!
//! Each question shows its default, and an empty answer accepts it. End of
//! input also accepts the default, so piping a short answer file works.

use crate::batch::Operation;
use crate::config::Config;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use trackmux_av::actions::{TrackFilter, TracksModification};

/// Everything a batch run needs from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInputs {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub operation: Operation,
}

const OPERATIONS: &[&str] = &[
    "Tracks Modification (keep wanted tracks and remove the rest, rename tracks)",
    "Append Tracks by Files (merge audio/subtitle files into video as separate tracks)",
];

/// Line-based question asker over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one answer line; `None` at end of input.
    fn read_answer(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .with_context(|| "Failed to read answer")?;
        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask for free text.
    pub fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        if default.is_empty() {
            write!(self.output, "? {question} ")?;
        } else {
            write!(self.output, "? {question} ({default}) ")?;
        }

        Ok(match self.read_answer()? {
            Some(answer) if !answer.is_empty() => answer,
            _ => default.to_string(),
        })
    }

    /// Ask a yes/no question, repeating until the answer is understood.
    pub fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "? {question} ({hint}) ")?;
            let Some(answer) = self.read_answer()? else {
                return Ok(default);
            };

            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "  Please answer y or n")?,
            }
        }
    }

    /// Pick one of `choices` by its 1-based number; returns the 0-based index.
    pub fn choose(&mut self, question: &str, choices: &[&str], default: usize) -> Result<usize> {
        writeln!(self.output, "? {question}")?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, choice)?;
        }

        loop {
            write!(self.output, "  Answer ({}) ", default + 1)?;
            let Some(answer) = self.read_answer()? else {
                return Ok(default);
            };
            if answer.is_empty() {
                return Ok(default);
            }

            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.output, "  Enter a number from 1 to {}", choices.len())?,
            }
        }
    }

    /// Walk through the full question flow, starting from configured defaults.
    pub fn collect_inputs(&mut self, config: &Config) -> Result<RunInputs> {
        let source_dir = self.ask(
            "Enter the source directory path:",
            &config.paths.source_dir.to_string_lossy(),
        )?;
        let dest_dir = self.ask(
            "Enter the destination directory path:",
            &config.paths.destination_dir.to_string_lossy(),
        )?;

        let operation = match self.choose("Select the operation you want to perform:", OPERATIONS, 0)? {
            0 => self.modification_inputs(config)?,
            _ => Operation::AppendTracks,
        };

        Ok(RunInputs {
            source_dir: PathBuf::from(source_dir),
            dest_dir: PathBuf::from(dest_dir),
            operation,
        })
    }

    fn modification_inputs(&mut self, config: &Config) -> Result<Operation> {
        let defaults = &config.modification;
        let customize = self.confirm(
            "Do you want to customize further settings? (No keeps the defaults)",
            defaults.customize,
        )?;
        if !customize {
            return Ok(Operation::modification_from_config(defaults));
        }

        let change_track_names = self.confirm(
            "Do you want to change audio and subtitle track names?",
            defaults.change_track_names,
        )?;

        let audio_tracks = if self.confirm("Do you want to change audio tracks?", defaults.change_audio_tracks)? {
            let csv = self.ask(
                "Enter the audio tracks to keep (comma-separated, ISO 639-1/2):",
                &defaults.audio_tracks.join(", "),
            )?;
            TrackFilter::from_csv(&csv)
        } else {
            TrackFilter::keep_none()
        };

        let subtitle_tracks = if self.confirm(
            "Do you want to change subtitle tracks?",
            defaults.change_subtitle_tracks,
        )? {
            let csv = self.ask(
                "Enter the subtitle tracks to keep (comma-separated, ISO 639-1/2):",
                &defaults.subtitle_tracks.join(", "),
            )?;
            TrackFilter::from_csv(&csv)
        } else {
            TrackFilter::keep_none()
        };

        let rename_pattern = if self.confirm(
            "Do you want to use a custom file name pattern?",
            defaults.custom_file_name,
        )? {
            Some(self.ask("Enter custom file name pattern (e.g. MovieName):", "")?)
                .filter(|pattern| !pattern.is_empty())
        } else {
            None
        };

        Ok(Operation::TracksModification(TracksModification {
            audio_tracks,
            subtitle_tracks,
            rename_pattern,
            change_track_names,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(answers: &str) -> (RunInputs, String) {
        let mut output = Vec::new();
        let inputs = Prompter::new(Cursor::new(answers.as_bytes()), &mut output)
            .collect_inputs(&Config::default())
            .unwrap();
        (inputs, String::from_utf8(output).unwrap())
    }

    fn modification(inputs: &RunInputs) -> &TracksModification {
        match &inputs.operation {
            Operation::TracksModification(m) => m,
            other => panic!("unexpected operation: {other:?}"),
        }
    }

    #[test]
    fn test_all_defaults() {
        let (inputs, output) = collect("\n\n\n\n");

        assert_eq!(inputs.source_dir, PathBuf::from("./_source"));
        assert_eq!(inputs.dest_dir, PathBuf::from("./_destination"));
        let m = modification(&inputs);
        assert_eq!(m.audio_tracks.to_arg(), "en,ta");
        assert_eq!(m.subtitle_tracks.to_arg(), "en");
        assert!(m.rename_pattern.is_none());
        assert!(m.change_track_names);
        assert!(output.contains("(./_source)"));
    }

    #[test]
    fn test_end_of_input_takes_defaults() {
        let (inputs, _) = collect("");
        assert_eq!(
            inputs.operation,
            Operation::modification_from_config(&Config::default().modification)
        );
    }

    #[test]
    fn test_append_operation() {
        let (inputs, _) = collect("/in\n/out\n2\n");

        assert_eq!(inputs.source_dir, PathBuf::from("/in"));
        assert_eq!(inputs.dest_dir, PathBuf::from("/out"));
        assert_eq!(inputs.operation, Operation::AppendTracks);
    }

    #[test]
    fn test_customized_modification() {
        // customize, no renames, audio "ja, en", keep no subtitles, pattern "Show"
        let (inputs, _) = collect("\n\n1\ny\nn\ny\nja, en\nn\ny\nShow\n");

        let m = modification(&inputs);
        assert!(!m.change_track_names);
        assert_eq!(m.audio_tracks.to_arg(), "ja,en");
        assert!(m.subtitle_tracks.is_keep_none());
        assert_eq!(m.rename_pattern.as_deref(), Some("Show"));
    }

    #[test]
    fn test_blank_pattern_keeps_names() {
        let (inputs, _) = collect("\n\n\ny\n\n\n\n\n\ny\n\n");
        let m = modification(&inputs);
        assert!(m.rename_pattern.is_none());
        assert_eq!(m.audio_tracks.to_arg(), "en,ta");
    }

    #[test]
    fn test_invalid_answers_are_repeated() {
        let mut output = Vec::new();
        let mut prompter = Prompter::new(Cursor::new("maybe\nyes\n7\n2\n"), &mut output);

        assert!(prompter.confirm("Continue?", false).unwrap());
        assert_eq!(prompter.choose("Pick", &["a", "b"], 0).unwrap(), 1);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Please answer y or n"));
        assert!(output.contains("Enter a number from 1 to 2"));
    }
}
