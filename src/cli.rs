// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for capture operations
//!
//! This module provides command-line functionality for:
//! - Running a single capture sequence
//! - Listing filter presets
//! - Voice-triggered capture from stdin transcripts

use crate::CaptureArgs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use studio_camera::app::{CaptureObserver, CountdownObserver, SettingsProvider, SharedSettings};
use studio_camera::backends::camera::StillFrameSource;
use studio_camera::backends::virtual_camera::{load_image_as_frame, test_pattern};
use studio_camera::constants::APP_DIR_NAME;
use studio_camera::{
    CaptureController, CaptureOutcome, CaptureSettings, Config, FilterPreset, Gallery, PhotoError,
    VoiceTrigger,
};
use tokio::io::BufReader;

/// Frame size of the built-in test pattern
const TEST_PATTERN_SIZE: (u32, u32) = (1280, 720);

/// Prints capture progress to the terminal
struct TerminalObserver;

impl CountdownObserver for TerminalObserver {
    fn on_tick(&self, seconds_remaining: u32) {
        if seconds_remaining > 0 {
            println!("  {}...", seconds_remaining);
        }
    }
}

impl CaptureObserver for TerminalObserver {
    fn on_flash(&self) {
        println!("  * flash *");
    }

    fn on_shot_saved(&self, id: i64, shot_index: u32) {
        println!("  Shot {} captured ({})", shot_index + 1, id);
    }

    fn on_shot_failed(&self, shot_index: u32, error: &PhotoError) {
        println!("  Shot {} skipped: {}", shot_index + 1, error);
    }
}

/// Take one photo (or burst) and save it
pub fn take_photo(
    config: Option<&Path>,
    args: CaptureArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = resolve_settings(config, &args)?;
    print_settings(&settings);

    let gallery = Arc::new(Gallery::new());
    let controller = build_controller(&args, Arc::new(settings), gallery.clone())?;
    let output_dir = args.output.unwrap_or_else(get_default_photo_dir);

    // Create async runtime for the capture sequence
    let rt = tokio::runtime::Runtime::new()?;
    let written = rt.block_on(async {
        println!("Capturing...");
        if let CaptureOutcome::Completed(report) = controller.request_capture().await
            && report.saved.is_empty()
        {
            println!("No frame was available; nothing captured.");
        }
        gallery.export(&output_dir).await
    })?;

    for path in written {
        println!("Photo saved: {}", path.display());
    }
    Ok(())
}

/// List filter presets with their descriptors
pub fn list_filters() -> Result<(), Box<dyn std::error::Error>> {
    println!("Filter presets:");
    println!();
    for preset in FilterPreset::ALL {
        println!(
            "  {:<8} {:<8} {}",
            preset.id(),
            preset.display_name(),
            preset.descriptor()
        );
    }
    Ok(())
}

/// Capture whenever a stdin transcript contains a trigger word
///
/// Triggers arriving while a sequence runs are dropped and counted. On end
/// of input the running sequence is awaited and the gallery exported.
pub fn voice_capture(
    config: Option<&Path>,
    args: CaptureArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Arc::new(SharedSettings::new(resolve_settings(config, &args)?));
    print_settings(&settings.current());

    let gallery = Arc::new(Gallery::new());
    let controller = Arc::new(build_controller(&args, settings, gallery.clone())?);
    let output_dir = args.output.unwrap_or_else(get_default_photo_dir);
    let trigger = VoiceTrigger::default();

    let rt = tokio::runtime::Runtime::new()?;
    let (session, written) = rt.block_on(async {
        println!("Listening... say \"snap\", \"cheese\" or \"photo\" (Ctrl+D to finish)");

        let stdin = BufReader::new(tokio::io::stdin());
        let session = trigger.listen(stdin, controller).await?;
        let written = gallery.export(&output_dir).await?;
        Ok::<_, studio_camera::AppError>((session, written))
    })?;

    println!();
    println!(
        "Heard {} trigger(s): {} capture(s) ran, {} ignored while busy",
        session.heard,
        session.captures.len(),
        session.ignored
    );
    for path in &written {
        println!("Photo saved: {}", path.display());
    }
    println!("{} photo(s) captured", written.len());
    Ok(())
}

/// Config file settings with command-line overrides applied
fn resolve_settings(
    config: Option<&Path>,
    args: &CaptureArgs,
) -> Result<CaptureSettings, Box<dyn std::error::Error>> {
    let mut settings = Config::load_or_default(config)?.capture_settings();

    if let Some(mode) = args.mode {
        settings.mode = mode;
    }
    if let Some(seconds) = args.timer {
        settings.countdown_seconds = seconds;
    }
    if let Some(ratio) = args.ratio {
        settings.target_ratio = ratio;
    }
    if let Some(lens) = args.lens {
        settings.lens_facing = lens;
    }
    if let Some(filter) = &args.filter {
        settings.filter = match filter.parse::<FilterPreset>() {
            Ok(preset) => preset.descriptor().to_string(),
            Err(_) => filter.clone(),
        };
    }
    if args.no_mirror {
        settings.mirror_enabled = false;
    }
    if args.no_flash {
        settings.flash_enabled = false;
    }
    if args.hd {
        settings.hd_enabled = true;
    }
    if args.watermark {
        settings.watermark_enabled = true;
    }

    Ok(settings)
}

fn build_controller(
    args: &CaptureArgs,
    settings: Arc<dyn SettingsProvider>,
    gallery: Arc<Gallery>,
) -> Result<CaptureController, Box<dyn std::error::Error>> {
    let frame = match &args.input {
        Some(path) => {
            println!("Using input: {}", path.display());
            load_image_as_frame(path)?
        }
        None => {
            println!("Using built-in test pattern");
            test_pattern(TEST_PATTERN_SIZE.0, TEST_PATTERN_SIZE.1)?
        }
    };
    println!("Frame size: {}x{}", frame.width(), frame.height());

    Ok(
        CaptureController::new(Arc::new(StillFrameSource::new(frame)), settings, gallery)
            .with_observer(Arc::new(TerminalObserver)),
    )
}

fn print_settings(settings: &CaptureSettings) {
    println!(
        "Mode: {}  Lens: {}  Ratio: {}  Timer: {}s",
        settings.mode.display_name(),
        settings.lens_facing,
        settings.target_ratio,
        settings.countdown_seconds
    );
    println!(
        "Filter: {}  Format: {}",
        settings.filter,
        if settings.hd_enabled { "PNG" } else { "JPEG" }
    );
}

/// Get default photo directory
fn get_default_photo_dir() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(APP_DIR_NAME)
}
