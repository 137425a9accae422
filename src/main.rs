// SPDX-License-Identifier: GPL-3.0-only

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use studio_camera::{AspectRatio, CaptureMode, LensFacing};

mod cli;

#[derive(Parser)]
#[command(name = "studio-camera")]
#[command(about = "Countdown, burst and filtered photo capture")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Configuration file (default: ~/.config/studio-camera/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one capture sequence and save the results
    Photo(CaptureArgs),

    /// List filter presets
    Filters,

    /// Capture whenever a stdin line contains a trigger word
    Voice(CaptureArgs),
}

/// Frame source, settings overrides and output shared by capturing commands
#[derive(Args, Default)]
pub struct CaptureArgs {
    /// Image file used as the live frame (default: built-in test pattern)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory (default: ~/Pictures/studio-camera)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Capture mode: single or burst
    #[arg(short, long)]
    pub mode: Option<CaptureMode>,

    /// Countdown in seconds (0 disables it)
    #[arg(short, long)]
    pub timer: Option<u32>,

    /// Crop ratio: 1:1, 4:3 or 16:9
    #[arg(short, long)]
    pub ratio: Option<AspectRatio>,

    /// Filter preset name or a raw filter descriptor
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Lens facing: front or rear
    #[arg(short, long)]
    pub lens: Option<LensFacing>,

    /// Do not mirror front-lens captures
    #[arg(long)]
    pub no_mirror: bool,

    /// Disable the flash
    #[arg(long)]
    pub no_flash: bool,

    /// Save lossless PNG instead of JPEG
    #[arg(long)]
    pub hd: bool,

    /// Stamp the capture time in the bottom-right corner
    #[arg(short, long)]
    pub watermark: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=studio_camera=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Some(Commands::Photo(args)) => cli::take_photo(config, args),
        Some(Commands::Filters) => cli::list_filters(),
        Some(Commands::Voice(args)) => cli::voice_capture(config, args),
        None => cli::take_photo(config, CaptureArgs::default()),
    }
}
