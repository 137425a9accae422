// SPDX-License-Identifier: GPL-3.0-only

//! Virtual frame sources
//!
//! Frames that do not come from a physical device: decoded image files and a
//! synthetic color-bar pattern. Both are used by the command-line front end
//! and by tests in place of a live camera.

pub mod file_source;

pub use file_source::load_image_as_frame;

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;

/// SMPTE-style bar colors, left to right
const BAR_COLORS: [[u8; 3]; 8] = [
    [235, 235, 235],
    [235, 235, 16],
    [16, 235, 235],
    [16, 235, 16],
    [235, 16, 235],
    [235, 16, 16],
    [16, 16, 235],
    [16, 16, 16],
];

/// Generate a deterministic color-bar frame
///
/// The bottom eighth of the frame is a horizontal luminance ramp so crops and
/// mirroring are visible in the output.
pub fn test_pattern(width: u32, height: u32) -> Result<CameraFrame, PhotoError> {
    let w = width as usize;
    let h = height as usize;
    let ramp_start = h - h / 8;
    let mut data = Vec::with_capacity(w * h * 4);

    for y in 0..h {
        for x in 0..w {
            let rgb = if y >= ramp_start {
                let level = (x * 255 / w.max(1)) as u8;
                [level, level, level]
            } else {
                BAR_COLORS[(x * BAR_COLORS.len() / w.max(1)).min(BAR_COLORS.len() - 1)]
            };
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
    }

    CameraFrame::from_rgba(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_layout() {
        let frame = test_pattern(80, 40).unwrap();
        let data = frame.data();
        // Top-left is the first bar, top-right the last
        assert_eq!(&data[..3], &BAR_COLORS[0]);
        let last = (80 - 1) * 4;
        assert_eq!(&data[last..last + 3], &BAR_COLORS[7]);
        // Bottom-left starts the ramp at black
        let bottom = (39 * 80) * 4;
        assert_eq!(&data[bottom..bottom + 3], &[0, 0, 0]);
    }

    #[test]
    fn test_pattern_rejects_empty() {
        assert!(test_pattern(0, 10).is_err());
    }
}
