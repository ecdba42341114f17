mod cli;

use trackmux::{
    batch::{BatchEvent, BatchOrchestrator, BatchReport, BatchSettings, Operation},
    config, preflight,
    prompt::{Prompter, RunInputs},
};
use trackmux_av::actions::{TrackFilter, TracksModification};
use trackmux_av::{check_tool, Mkvmerge, Muxer, MKVMERGE};
use trackmux_common::paths::is_video_file;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, Mode, RunArgs};
use std::path::Path;
use std::process::ExitCode;

/// Exit status when at least one file of a batch failed.
const EXIT_PARTIAL_FAILURE: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "trackmux=trace,trackmux_av=debug".to_string()
        } else {
            "trackmux=info,trackmux_av=info".to_string()
        }
    });

    // Logs go to stderr so stdout stays clean for reports and --json.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => run_batch(args, cli.config.as_deref()),
        Commands::Identify { file, json } => {
            identify_file(&file, json, cli.config.as_deref()).map(|_| ExitCode::SUCCESS)
        }
        Commands::CheckTools => check_tools(cli.config.as_deref()).map(|_| ExitCode::SUCCESS),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref()).map(|_| ExitCode::SUCCESS)
        }
        Commands::InitConfig { path, force } => {
            config::persist::save_config(&path, &config::Config::default(), force)?;
            println!("Wrote default config to {:?}", path);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => {
            println!("trackmux {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_batch(args: RunArgs, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = config::load_config_or_default(config_path)?;

    let mkvmerge = match preflight::locate_muxer(config.tools.mkvmerge_path.as_deref()) {
        Ok(mkvmerge) => mkvmerge,
        Err(e) => return Ok(precondition_failed(e)),
    };
    tracing::debug!("Using mkvmerge at {:?}", mkvmerge.path());

    if !args.json {
        print_banner();
    }

    let inputs = if args.interactive {
        // With --json, stdout carries only the report.
        let prompts: Box<dyn std::io::Write> = if args.json {
            Box::new(std::io::stderr())
        } else {
            Box::new(std::io::stdout())
        };
        let stdin = std::io::stdin();
        Prompter::new(stdin.lock(), prompts).collect_inputs(&config)?
    } else {
        inputs_from_args(&args, &config)
    };

    let listing = match preflight::check_source(&inputs.source_dir) {
        Ok(listing) => listing,
        Err(e) => return Ok(precondition_failed(e)),
    };
    if let Err(e) = preflight::ensure_destination(&inputs.dest_dir) {
        return Ok(precondition_failed(e));
    }

    let settings = BatchSettings::from_config(&config).dry_run(args.dry_run);
    let mut orchestrator = BatchOrchestrator::new(mkvmerge, settings);
    if !args.json {
        orchestrator = orchestrator.with_progress_callback(Box::new(print_progress));
    }

    let report = orchestrator.run_listing(&listing, &inputs.dest_dir, &inputs.operation);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report, args.dry_run);
    }

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_PARTIAL_FAILURE))
    }
}

/// Command-line values layered over the configuration.
fn inputs_from_args(args: &RunArgs, config: &config::Config) -> RunInputs {
    let operation = match args.mode {
        Mode::Append => Operation::AppendTracks,
        Mode::Modify => {
            let defaults = &config.modification;
            let filter = |csv: &Option<String>, configured: &[String]| match csv {
                Some(csv) => TrackFilter::from_csv(csv),
                None => TrackFilter::languages(configured.iter().cloned()),
            };

            Operation::TracksModification(TracksModification {
                audio_tracks: filter(&args.audio_tracks, &defaults.audio_tracks),
                subtitle_tracks: filter(&args.subtitle_tracks, &defaults.subtitle_tracks),
                rename_pattern: args.rename.clone().filter(|p| !p.trim().is_empty()),
                change_track_names: defaults.change_track_names && !args.no_track_names,
            })
        }
    };

    RunInputs {
        source_dir: args
            .source
            .clone()
            .unwrap_or_else(|| config.paths.source_dir.clone()),
        dest_dir: args
            .dest
            .clone()
            .unwrap_or_else(|| config.paths.destination_dir.clone()),
        operation,
    }
}

fn precondition_failed(error: preflight::PreconditionError) -> ExitCode {
    tracing::debug!("Precondition failed: {:?}", error);
    eprintln!("Error: {}", error);
    ExitCode::FAILURE
}

fn print_banner() {
    println!();
    println!(" || TRACKMUX {} || ", env!("CARGO_PKG_VERSION"));
    println!();
}

fn print_progress(event: BatchEvent<'_>) {
    match event {
        BatchEvent::Started {
            position,
            total,
            video,
        } => {
            println!("# {:<20}: {} / {}", "Processing Files", position, total);
            println!("# {:<20}: {}", "Current File", video.file_name());
        }
        BatchEvent::Finished { result, .. } => {
            let output = result
                .output
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            if result.dry_run {
                println!("  [DRY RUN] mkvmerge {}", result.args.join(" "));
            } else if result.succeeded {
                println!("  ✓ {}", output);
            } else if result.has_warnings() {
                println!("  ⚠ {} (finished with warnings)", output);
            } else {
                match result.exit_code {
                    Some(code) => println!("  ✗ {} (exit code {})", output, code),
                    None => println!("  ✗ {} (not run)", output),
                }
            }

            if !result.succeeded {
                if let Some(ref message) = result.message {
                    for line in message.lines().take(5) {
                        println!("      {}", line);
                    }
                }
            }
        }
    }
}

fn print_summary(report: &BatchReport, dry_run: bool) {
    println!();
    if dry_run {
        println!("[DRY RUN] {} commands planned", report.total());
    } else if report.is_success() {
        println!("Processing complete: {} files processed", report.total());
    } else {
        println!(
            "Processing complete: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
    }
}

fn identify_file(file: &Path, json: bool, config_path: Option<&Path>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    if !is_video_file(file) {
        tracing::warn!("{:?} does not have a video extension", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let mkvmerge = Mkvmerge::discover(config.tools.mkvmerge_path.as_deref())?;
    let tracks = mkvmerge.identify(file)?;

    if json {
        let json_str = serde_json::to_string_pretty(&tracks)?;
        println!("{}", json_str);
    } else {
        println!("File: {}", file.display());
        println!("\nTracks: {}", tracks.len());
        for track in &tracks {
            print!("  [{}] {}", track.id, track.kind);
            if let Some(ref codec) = track.codec {
                print!(" ({})", codec);
            }
            if let Some(label) = config.modification.track_names.label(track.kind) {
                print!(" -> \"{}\"", label);
            }
            println!();
        }
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let program = config
        .tools
        .mkvmerge_path
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| MKVMERGE.to_string());

    let tool = check_tool(&program);
    let status = if tool.available { "✓" } else { "✗" };

    print!("{} {}", status, tool.name);
    if let Some(ref version) = tool.version {
        print!(" ({})", version.lines().next().unwrap_or(""));
    }
    if let Some(ref path) = tool.path {
        print!(" - {}", path.display());
    }
    println!();

    println!();
    if tool.available {
        println!("All required tools are available!");
    } else {
        println!("mkvmerge is missing. Install MKVToolNix or set tools.mkvmerge_path.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    let modification = &config.modification;
    println!("  Source: {}", config.paths.source_dir.display());
    println!("  Destination: {}", config.paths.destination_dir.display());
    println!(
        "  mkvmerge: {}",
        config
            .tools
            .mkvmerge_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| format!("{} (from PATH)", MKVMERGE))
    );
    println!(
        "  Audio tracks: {}",
        TrackFilter::languages(modification.audio_tracks.iter().cloned())
    );
    println!(
        "  Subtitle tracks: {}",
        TrackFilter::languages(modification.subtitle_tracks.iter().cloned())
    );
    println!("  Change track names: {}", modification.change_track_names);
    println!(
        "  Track names: {} / {} / {}",
        modification.track_names.video,
        modification.track_names.audio,
        modification.track_names.subtitle
    );

    Ok(())
}
