// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Read once at startup from a JSON file. Missing keys fall back to their
//! defaults; the file is never written.

use crate::app::state::{CaptureMode, CaptureSettings, FilterPreset};
use crate::backends::camera::types::LensFacing;
use crate::constants::capture::DEFAULT_COUNTDOWN_SECONDS;
use crate::constants::{APP_DIR_NAME, AspectRatio};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file name inside the application config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Countdown before the first shot, in seconds (0 disables it)
    pub timer_seconds: u32,
    pub capture_mode: CaptureMode,
    pub lens: LensFacing,
    pub aspect_ratio: AspectRatio,
    pub filter: FilterPreset,
    /// Mirror front-lens captures (selfie mode)
    pub mirror: bool,
    pub flash: bool,
    /// Save lossless PNG instead of JPEG
    pub hd: bool,
    /// Stamp the capture time in the bottom-right corner
    pub watermark: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer_seconds: DEFAULT_COUNTDOWN_SECONDS,
            capture_mode: CaptureMode::Single,
            lens: LensFacing::Front,
            aspect_ratio: AspectRatio::SixteenNine,
            filter: FilterPreset::Normal,
            mirror: true,
            flash: true,
            hd: false,
            watermark: false,
        }
    }
}

impl Config {
    /// `<config dir>/studio-camera/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a config file
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&contents)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `explicit` if given, else the default file if it exists, else defaults
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load_or_default(explicit: Option<&Path>) -> AppResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Initial capture settings derived from this config
    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            mode: self.capture_mode,
            lens_facing: self.lens,
            mirror_enabled: self.mirror,
            flash_enabled: self.flash,
            filter: self.filter.descriptor().to_string(),
            target_ratio: self.aspect_ratio,
            hd_enabled: self.hd,
            watermark_enabled: self.watermark,
            countdown_seconds: self.timer_seconds,
        }
    }
}
