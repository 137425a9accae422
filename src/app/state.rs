// SPDX-License-Identifier: GPL-3.0-only

//! Capture settings and the live settings store

use crate::backends::camera::types::LensFacing;
use crate::constants::AspectRatio;
use crate::constants::capture::{BURST_SHOT_COUNT, DEFAULT_COUNTDOWN_SECONDS, SINGLE_SHOT_COUNT};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Shots per capture request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// One shot per request
    #[default]
    Single,
    /// Three shots per request, 800 ms apart
    Burst,
}

impl CaptureMode {
    pub fn shot_count(&self) -> u32 {
        match self {
            CaptureMode::Single => SINGLE_SHOT_COUNT,
            CaptureMode::Burst => BURST_SHOT_COUNT,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CaptureMode::Single => "SINGLE",
            CaptureMode::Burst => "BURST",
        }
    }
}

impl FromStr for CaptureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(CaptureMode::Single),
            "burst" => Ok(CaptureMode::Burst),
            other => Err(format!("Unknown mode '{}' (expected single or burst)", other)),
        }
    }
}

/// Built-in filter presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterPreset {
    /// No filter applied
    #[default]
    #[serde(rename = "none")]
    Normal,
    /// High-contrast black & white
    #[serde(rename = "bw")]
    Mono,
    /// Light sepia with boosted saturation
    #[serde(rename = "warm")]
    Warm,
    /// Complementary hue shift, muted
    #[serde(rename = "cool")]
    Arctic,
    /// Saturation and contrast boost
    #[serde(rename = "vivid")]
    Vivid,
    /// Faded sepia ("1985")
    #[serde(rename = "vintage")]
    Vintage,
    /// Magenta shift, strong saturation
    #[serde(rename = "cyber")]
    Cyber,
    /// Hard black & white, darkened
    #[serde(rename = "noir")]
    Noir,
}

impl FilterPreset {
    /// All presets in ribbon order
    pub const ALL: [FilterPreset; 8] = [
        FilterPreset::Normal,
        FilterPreset::Mono,
        FilterPreset::Warm,
        FilterPreset::Arctic,
        FilterPreset::Vivid,
        FilterPreset::Vintage,
        FilterPreset::Cyber,
        FilterPreset::Noir,
    ];

    /// Stable identifier used in config files and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            FilterPreset::Normal => "none",
            FilterPreset::Mono => "bw",
            FilterPreset::Warm => "warm",
            FilterPreset::Arctic => "cool",
            FilterPreset::Vivid => "vivid",
            FilterPreset::Vintage => "vintage",
            FilterPreset::Cyber => "cyber",
            FilterPreset::Noir => "noir",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FilterPreset::Normal => "Normal",
            FilterPreset::Mono => "Mono",
            FilterPreset::Warm => "Warm",
            FilterPreset::Arctic => "Arctic",
            FilterPreset::Vivid => "Vivid",
            FilterPreset::Vintage => "1985",
            FilterPreset::Cyber => "Cyber",
            FilterPreset::Noir => "Noir",
        }
    }

    /// Filter descriptor passed to the compositor
    pub fn descriptor(&self) -> &'static str {
        match self {
            FilterPreset::Normal => "none",
            FilterPreset::Mono => "grayscale(100%) contrast(1.2)",
            FilterPreset::Warm => "sepia(0.3) saturate(1.4)",
            FilterPreset::Arctic => "hue-rotate(180deg) saturate(0.6)",
            FilterPreset::Vivid => "saturate(2.0) contrast(1.1)",
            FilterPreset::Vintage => "sepia(0.5) contrast(0.9) brightness(1.1)",
            FilterPreset::Cyber => "hue-rotate(-20deg) saturate(2) contrast(1.2)",
            FilterPreset::Noir => "grayscale(100%) contrast(2.0) brightness(0.8)",
        }
    }
}

impl FromStr for FilterPreset {
    type Err = String;

    /// Accepts the id (`bw`) or the display name (`Mono`), case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FilterPreset::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s) || p.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown filter preset '{}'", s))
    }
}

/// Immutable snapshot of everything a capture sequence reads
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSettings {
    pub mode: CaptureMode,
    pub lens_facing: LensFacing,
    pub mirror_enabled: bool,
    /// Visual flash before each shot; never changes pixel data
    pub flash_enabled: bool,
    /// Opaque filter descriptor, passed to the compositor unmodified
    pub filter: String,
    pub target_ratio: AspectRatio,
    /// Lossless PNG instead of JPEG
    pub hd_enabled: bool,
    pub watermark_enabled: bool,
    pub countdown_seconds: u32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            mode: CaptureMode::Single,
            lens_facing: LensFacing::Front,
            mirror_enabled: true,
            flash_enabled: true,
            filter: FilterPreset::Normal.descriptor().to_string(),
            target_ratio: AspectRatio::SixteenNine,
            hd_enabled: false,
            watermark_enabled: false,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
        }
    }
}

impl CaptureSettings {
    /// Mirroring applies only to the front lens
    pub fn should_mirror(&self) -> bool {
        self.mirror_enabled && self.lens_facing == LensFacing::Front
    }
}

/// Source of the current capture settings
pub trait SettingsProvider: Send + Sync {
    /// Take a snapshot of the current settings
    fn current(&self) -> CaptureSettings;
}

impl SettingsProvider for CaptureSettings {
    fn current(&self) -> CaptureSettings {
        self.clone()
    }
}

/// Mutable settings shared between the UI layer and the capture controller
///
/// Clones share the same underlying settings.
#[derive(Debug, Clone, Default)]
pub struct SharedSettings {
    inner: Arc<RwLock<CaptureSettings>>,
}

impl SharedSettings {
    pub fn new(settings: CaptureSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut CaptureSettings) -> R) -> R {
        let mut settings = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut settings)
    }

    pub fn set_mode(&self, mode: CaptureMode) {
        info!(mode = mode.display_name(), "Capture mode changed");
        self.update(|s| s.mode = mode);
    }

    /// Switch lens; returns false if `lens` was already active
    pub fn switch_lens(&self, lens: LensFacing) -> bool {
        let changed = self.update(|s| {
            let changed = s.lens_facing != lens;
            s.lens_facing = lens;
            changed
        });
        if changed {
            info!(lens = %lens, "Switched camera lens");
        }
        changed
    }

    /// Set a raw filter descriptor
    pub fn set_filter(&self, descriptor: impl Into<String>) {
        let descriptor = descriptor.into();
        info!(filter = %descriptor, "Filter changed");
        self.update(|s| s.filter = descriptor);
    }

    pub fn apply_preset(&self, preset: FilterPreset) {
        self.set_filter(preset.descriptor());
    }

    /// Toggle flash; returns the new state
    pub fn toggle_flash(&self) -> bool {
        let enabled = self.update(|s| {
            s.flash_enabled = !s.flash_enabled;
            s.flash_enabled
        });
        info!(flash_enabled = enabled, "Flash toggled");
        enabled
    }

    pub fn set_ratio(&self, ratio: AspectRatio) {
        info!(ratio = %ratio, "Aspect ratio changed");
        self.update(|s| s.target_ratio = ratio);
    }

    pub fn set_hd(&self, enabled: bool) {
        self.update(|s| s.hd_enabled = enabled);
    }

    pub fn set_watermark(&self, enabled: bool) {
        self.update(|s| s.watermark_enabled = enabled);
    }

    pub fn set_mirror(&self, enabled: bool) {
        self.update(|s| s.mirror_enabled = enabled);
    }

    pub fn set_timer(&self, seconds: u32) {
        self.update(|s| s.countdown_seconds = seconds);
    }
}

impl SettingsProvider for SharedSettings {
    fn current(&self) -> CaptureSettings {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
