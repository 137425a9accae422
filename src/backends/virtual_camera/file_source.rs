// SPDX-License-Identifier: GPL-3.0-only

//! Still frames from image files

use crate::backends::camera::types::CameraFrame;
use crate::errors::{AppError, AppResult};
use std::path::Path;
use tracing::{debug, info};

/// Extensions accepted by [`load_image_as_frame`]
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "webp", "gif"];

/// Check whether a lowercase extension names a supported image format
pub fn is_image_extension(extension: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&extension)
}

/// Decode an image file into an RGBA camera frame
pub fn load_image_as_frame(path: &Path) -> AppResult<CameraFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !is_image_extension(&extension) {
        return Err(AppError::Other(format!(
            "Unsupported file format: {}",
            extension
        )));
    }

    debug!(path = %path.display(), "Loading image as frame");

    let image = image::open(path)
        .map_err(|e| AppError::Other(format!("Failed to load {}: {}", path.display(), e)))?
        .to_rgba8();
    let (width, height) = image.dimensions();

    let frame = CameraFrame::from_rgba(width, height, image.into_raw())?;

    info!(width, height, path = %path.display(), "Image frame loaded");
    Ok(frame)
}
