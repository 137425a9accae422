// SPDX-License-Identifier: GPL-3.0-only

//! Frame composition pipeline
//!
//! Turns one live frame into one encoded still:
//!
//! ```text
//! CameraFrame (RGBA) → center-crop → mirror? → filter chain → watermark? → PNG/JPEG
//! ```
//!
//! [`compose`] is pure: its output depends only on the frame, the settings
//! snapshot and the capture stamp. The capture controller runs it on the
//! blocking pool so the async side never stalls on pixel work.
//!
//! [`FrameCompositor`] is the seam the controller composes through;
//! [`ImageCompositor`] is the implementation backed by [`compose`].

pub mod crop;
pub mod encoding;
pub mod filters;
pub mod processing;
pub mod watermark;

pub use crop::{CropGeometry, PixelRect};
pub use encoding::{EncodingFormat, OutputEncoding, PhotoEncoder};
pub use filters::{FilterChain, FilterOp};
pub use processing::ProcessedImage;

use crate::app::state::CaptureSettings;
use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use chrono::{DateTime, Local};
use tracing::{debug, info};

/// Identity and wall-clock time of one shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureStamp {
    /// Capture timestamp in milliseconds, unique within a session
    pub id: i64,
    /// Local time used for the watermark
    pub time: DateTime<Local>,
}

impl CaptureStamp {
    /// Stamp for `time`, using its millisecond timestamp as the id
    pub fn at(time: DateTime<Local>) -> Self {
        Self {
            id: time.timestamp_millis(),
            time,
        }
    }

    pub fn now() -> Self {
        Self::at(Local::now())
    }
}

/// A finished, encoded still
#[derive(Clone)]
pub struct CapturedImage {
    pub id: i64,
    pub captured_at: DateTime<Local>,
    pub buffer: Vec<u8>,
    pub format: EncodingFormat,
    /// Quality factor in [0, 1]; only meaningful for JPEG
    pub quality: f32,
    pub width: u32,
    pub height: u32,
}

impl CapturedImage {
    /// File name used when exporting, e.g. `studio_pro_1767225600000.jpg`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}.{}",
            crate::constants::gallery::EXPORT_PREFIX,
            self.id,
            self.format.extension()
        )
    }
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("id", &self.id)
            .field("format", &self.format)
            .field("quality", &self.quality)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.buffer.len())
            .finish()
    }
}

/// Compose one frame into an encoded image
///
/// Crop, mirror and filter come from `settings`; the watermark (if enabled)
/// shows `stamp.time`. The only failure is a codec error.
pub fn compose(
    frame: &CameraFrame,
    settings: &CaptureSettings,
    stamp: &CaptureStamp,
) -> Result<CapturedImage, PhotoError> {
    debug!(
        id = stamp.id,
        width = frame.width(),
        height = frame.height(),
        ratio = %settings.target_ratio,
        filter = %settings.filter,
        "Composing frame"
    );

    let mut processed = processing::process(frame, settings);

    if settings.watermark_enabled {
        watermark::draw_timestamp(&mut processed.image, &stamp.time);
    }

    let encoder = PhotoEncoder::new(OutputEncoding::for_hd(settings.hd_enabled));
    let buffer = encoder.encode(&processed.image)?;
    let encoding = encoder.encoding();

    info!(
        id = stamp.id,
        width = processed.width,
        height = processed.height,
        format = ?encoding.format,
        size = buffer.len(),
        "Frame composed"
    );

    Ok(CapturedImage {
        id: stamp.id,
        captured_at: stamp.time,
        buffer,
        format: encoding.format,
        quality: encoding.quality,
        width: processed.width,
        height: processed.height,
    })
}

/// Turns a frame into an encoded still
pub trait FrameCompositor: Send + Sync {
    fn compose(
        &self,
        frame: &CameraFrame,
        settings: &CaptureSettings,
        stamp: &CaptureStamp,
    ) -> Result<CapturedImage, PhotoError>;
}

/// CPU compositor using `image` for pixel work and encoding
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCompositor;

impl FrameCompositor for ImageCompositor {
    fn compose(
        &self,
        frame: &CameraFrame,
        settings: &CaptureSettings,
        stamp: &CaptureStamp,
    ) -> Result<CapturedImage, PhotoError> {
        compose(frame, settings, stamp)
    }
}
