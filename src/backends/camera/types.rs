// SPDX-License-Identifier: GPL-3.0-only
// Shared types for live frame sources

//! Shared types for camera frame sources

use crate::errors::PhotoError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

/// Bytes per RGBA pixel
pub const RGBA_BYTES_PER_PIXEL: usize = 4;

/// Which way the active lens faces
///
/// Only the front (user-facing) lens is eligible for mirroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LensFacing {
    /// Selfie camera
    #[default]
    Front,
    /// World-facing camera
    Rear,
}

impl LensFacing {
    /// Get display name for the lens
    pub fn display_name(&self) -> &'static str {
        match self {
            LensFacing::Front => "Front",
            LensFacing::Rear => "Rear",
        }
    }
}

impl std::fmt::Display for LensFacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for LensFacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" | "user" => Ok(LensFacing::Front),
            "rear" | "back" | "environment" => Ok(LensFacing::Rear),
            other => Err(format!("Unknown lens '{}' (expected front or rear)", other)),
        }
    }
}

/// A single RGBA8 frame from a live source
///
/// Rows are tightly packed (stride = width * 4). Dimensions are validated on
/// construction, so every `CameraFrame` can be composed without bounds errors.
#[derive(Clone)]
pub struct CameraFrame {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
    captured_at: Instant,
}

impl CameraFrame {
    /// Wrap a tightly packed RGBA8 buffer
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PhotoError> {
        if width == 0 || height == 0 {
            return Err(PhotoError::InvalidFrame(format!(
                "frame has zero dimension ({}x{})",
                width, height
            )));
        }

        let expected = width as usize * height as usize * RGBA_BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(PhotoError::InvalidFrame(format!(
                "RGBA buffer size mismatch: expected {}, got {}",
                expected,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            data: Arc::from(data),
            captured_at: Instant::now(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width as usize * RGBA_BYTES_PER_PIXEL
    }

    /// When the frame was produced
    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_size_validation() {
        assert!(CameraFrame::from_rgba(2, 2, vec![0u8; 16]).is_ok());
        assert!(matches!(
            CameraFrame::from_rgba(2, 2, vec![0u8; 15]),
            Err(PhotoError::InvalidFrame(_))
        ));
        assert!(matches!(
            CameraFrame::from_rgba(0, 2, Vec::new()),
            Err(PhotoError::InvalidFrame(_))
        ));
    }

    #[test]
    fn test_lens_aliases() {
        assert_eq!("user".parse::<LensFacing>().unwrap(), LensFacing::Front);
        assert_eq!("environment".parse::<LensFacing>().unwrap(), LensFacing::Rear);
        assert!("sideways".parse::<LensFacing>().is_err());
    }
}
