// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Directory name used under the user's config and pictures directories
pub const APP_DIR_NAME: &str = "studio-camera";

/// Target crop aspect ratio (width / height)
///
/// The values are the literal ratios the viewfinder offers, not exact
/// fractions: 4:3 is 1.33 and 16:9 is 1.77.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Square 1:1
    #[serde(rename = "1:1")]
    Square,
    /// Classic 4:3
    #[serde(rename = "4:3")]
    FourThree,
    /// Widescreen 16:9 (default)
    #[default]
    #[serde(rename = "16:9")]
    SixteenNine,
}

impl AspectRatio {
    /// All ratios in viewfinder order
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Square,
        AspectRatio::FourThree,
        AspectRatio::SixteenNine,
    ];

    /// Width divided by height
    pub fn value(&self) -> f64 {
        match self {
            AspectRatio::Square => 1.0,
            AspectRatio::FourThree => 1.33,
            AspectRatio::SixteenNine => 1.77,
        }
    }

    /// Get display name for the ratio
    pub fn display_name(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::FourThree => "4:3",
            AspectRatio::SixteenNine => "16:9",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept both "16:9" and the "16-9" spelling used by the viewfinder buttons
        let normalized = s.trim().replace('-', ":");
        AspectRatio::ALL
            .into_iter()
            .find(|ratio| ratio.display_name() == normalized)
            .ok_or_else(|| format!("Unknown aspect ratio '{}' (expected 1:1, 4:3 or 16:9)", s))
    }
}

/// Capture sequencing
pub mod capture {
    use std::time::Duration;

    /// Shots taken per request in burst mode
    pub const BURST_SHOT_COUNT: u32 = 3;

    /// Shots taken per request in single mode
    pub const SINGLE_SHOT_COUNT: u32 = 1;

    /// Cooldown between consecutive burst shots
    pub const INTER_SHOT_DELAY: Duration = Duration::from_millis(800);

    /// Interval between countdown ticks
    pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

    /// Countdown used when nothing else is configured
    pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 3;
}

/// Output encoding
pub mod encoding {
    /// JPEG quality factor used when HD output is off
    pub const JPEG_QUALITY: f32 = 0.85;

    /// Quality reported for lossless PNG output
    pub const PNG_QUALITY: f32 = 1.0;
}

/// Timestamp watermark
pub mod watermark {
    /// Accent color (#ff0050)
    pub const COLOR: [u8; 3] = [0xff, 0x00, 0x50];

    /// Fixed distance from the right and bottom edges, independent of resolution
    pub const MARGIN_PX: u32 = 20;

    /// Text height as a fraction of the output height
    pub const FONT_SCALE: f32 = 0.04;
}

/// In-memory gallery
pub mod gallery {
    /// Number of thumbnails in the viewfinder strip
    pub const THUMBNAIL_STRIP_LEN: usize = 3;

    /// File name prefix for exported images
    pub const EXPORT_PREFIX: &str = "studio_pro";
}

/// Voice trigger words
pub mod voice {
    pub const TRIGGER_WORDS: [&str; 3] = ["snap", "cheese", "photo"];
}
