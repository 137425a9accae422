// SPDX-License-Identifier: GPL-3.0-only

//! Center-crop geometry
//!
//! The output always fills the target rectangle: the frame is trimmed
//! symmetrically along one axis until it has the target aspect ratio. Nothing
//! is padded, stretched or upscaled.

/// Exact crop rectangle in source pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Integer crop rectangle used to copy pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropGeometry {
    /// Compute the centered crop of a `frame_width` x `frame_height` frame to
    /// `target_ratio` (width / height, must be positive)
    pub fn center_crop(frame_width: u32, frame_height: u32, target_ratio: f64) -> Self {
        let v_w = frame_width as f64;
        let v_h = frame_height as f64;
        let frame_ratio = v_w / v_h;

        if frame_ratio > target_ratio {
            let width = v_h * target_ratio;
            Self {
                x: (v_w - width) / 2.0,
                y: 0.0,
                width,
                height: v_h,
            }
        } else {
            let height = v_w / target_ratio;
            Self {
                x: 0.0,
                y: (v_h - height) / 2.0,
                width: v_w,
                height,
            }
        }
    }

    /// Width divided by height
    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Snap to whole pixels inside the frame
    ///
    /// Output dimensions are truncated the way a canvas truncates its size
    /// attributes; the offset is rounded and then clamped so the rectangle
    /// never leaves the frame.
    pub fn to_pixel_rect(&self, frame_width: u32, frame_height: u32) -> PixelRect {
        let width = (self.width.floor() as u32).clamp(1, frame_width);
        let height = (self.height.floor() as u32).clamp(1, frame_height);
        let x = (self.x.round() as u32).min(frame_width - width);
        let y = (self.y.round() as u32).min(frame_height - height);

        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_crop_of_full_hd() {
        let crop = CropGeometry::center_crop(1920, 1080, 1.0);
        assert_eq!(crop.width, 1080.0);
        assert_eq!(crop.height, 1080.0);
        assert_eq!(crop.x, 420.0);
        assert_eq!(crop.y, 0.0);

        let rect = crop.to_pixel_rect(1920, 1080);
        assert_eq!(
            rect,
            PixelRect {
                x: 420,
                y: 0,
                width: 1080,
                height: 1080
            }
        );
    }

    #[test]
    fn test_widescreen_keeps_full_height() {
        let crop = CropGeometry::center_crop(1920, 1080, 1.77);
        assert_eq!(crop.height, 1080.0);
        assert!((crop.width - 1911.6).abs() < 1e-6);
        assert!((crop.x - 4.2).abs() < 1e-6);

        let rect = crop.to_pixel_rect(1920, 1080);
        assert_eq!((rect.width, rect.height), (1911, 1080));
        assert_eq!(rect.x, 4);
    }

    #[test]
    fn test_portrait_frame_crops_vertically() {
        let crop = CropGeometry::center_crop(1080, 1920, 1.33);
        assert_eq!(crop.width, 1080.0);
        assert_eq!(crop.x, 0.0);
        assert!((crop.height - 1080.0 / 1.33).abs() < 1e-9);
        assert!((crop.y - (1920.0 - crop.height) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_crop_matches_ratio_and_fits_frame() {
        let sizes = [
            (640, 480),
            (1280, 720),
            (1920, 1080),
            (1080, 1920),
            (3840, 2160),
            (1000, 1000),
            (7, 3),
        ];
        for (w, h) in sizes {
            for ratio in [1.0, 1.33, 1.77] {
                let crop = CropGeometry::center_crop(w, h, ratio);
                assert!(
                    (crop.ratio() - ratio).abs() < 1e-9,
                    "{}x{} at {} gave ratio {}",
                    w,
                    h,
                    ratio,
                    crop.ratio()
                );
                assert!(crop.width <= w as f64 && crop.height <= h as f64);
                assert!(crop.x >= 0.0 && crop.y >= 0.0);

                let rect = crop.to_pixel_rect(w, h);
                assert!(rect.x + rect.width <= w);
                assert!(rect.y + rect.height <= h);
            }
        }
    }
}
