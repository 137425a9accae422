// SPDX-License-Identifier: GPL-3.0-only

//! Studio Camera - capture sequencing and frame composition
//!
//! # Architecture
//!
//! - [`app`]: capture controller, countdown, settings and gallery
//! - [`backends`]: live frame sources
//! - [`pipelines`]: crop, mirror, filter, watermark and encode
//! - [`config`]: user configuration handling
//! - [`voice`]: voice command trigger
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use studio_camera::{CaptureController, CaptureSettings, Gallery};
//! use studio_camera::backends::camera::StillFrameSource;
//! use studio_camera::backends::virtual_camera::test_pattern;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gallery = Arc::new(Gallery::new());
//! let controller = CaptureController::new(
//!     Arc::new(StillFrameSource::new(test_pattern(1280, 720)?)),
//!     Arc::new(CaptureSettings::default()),
//!     gallery.clone(),
//! );
//! controller.request_capture().await;
//! assert_eq!(gallery.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipelines;
pub mod voice;

// Re-export commonly used types
pub use app::{
    CaptureController, CaptureMode, CaptureObserver, CaptureOutcome, CaptureReport,
    CaptureSettings, FilterPreset, Gallery, SharedSettings,
};
pub use backends::camera::types::{CameraFrame, LensFacing};
pub use config::Config;
pub use constants::AspectRatio;
pub use errors::{AppError, AppResult, PhotoError};
pub use pipelines::photo::{CapturedImage, EncodingFormat, FrameCompositor};
pub use voice::{VoiceSessionReport, VoiceTrigger};
