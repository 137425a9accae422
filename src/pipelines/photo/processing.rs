// SPDX-License-Identifier: GPL-3.0-only

//! Post-processing of a captured frame
//!
//! Turns a raw RGBA frame into the RGB image that gets encoded:
//! - center-crop to the target aspect ratio (RGBA → RGB on the way)
//! - horizontal mirror for front-lens captures
//! - filter chain over the drawn region

use super::crop::{CropGeometry, PixelRect};
use super::filters::FilterChain;
use crate::app::state::CaptureSettings;
use crate::backends::camera::types::{CameraFrame, RGBA_BYTES_PER_PIXEL};
use image::RgbImage;
use tracing::{debug, warn};

/// Processed image data
pub struct ProcessedImage {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
    pub mirrored: bool,
}

/// Crop, mirror and filter a frame according to `settings`
pub fn process(frame: &CameraFrame, settings: &CaptureSettings) -> ProcessedImage {
    let geometry = CropGeometry::center_crop(
        frame.width(),
        frame.height(),
        settings.target_ratio.value(),
    );
    let rect = geometry.to_pixel_rect(frame.width(), frame.height());

    debug!(
        frame_width = frame.width(),
        frame_height = frame.height(),
        crop_x = rect.x,
        crop_y = rect.y,
        crop_width = rect.width,
        crop_height = rect.height,
        "Cropping frame"
    );

    let mut image = crop_rgba_to_rgb(frame, rect);

    let mirrored = settings.should_mirror();
    if mirrored {
        image::imageops::flip_horizontal_in_place(&mut image);
    }

    filter_chain(&settings.filter).apply(&mut image);

    ProcessedImage {
        width: rect.width,
        height: rect.height,
        image,
        mirrored,
    }
}

/// Parse a filter descriptor, falling back to no filter if it is invalid
///
/// An unparseable descriptor is ignored as a whole rather than partially
/// applied.
pub fn filter_chain(descriptor: &str) -> FilterChain {
    match descriptor.parse::<FilterChain>() {
        Ok(chain) => chain,
        Err(e) => {
            warn!(descriptor, error = %e, "Ignoring invalid filter descriptor");
            FilterChain::identity()
        }
    }
}

/// Copy the crop rectangle out of an RGBA frame, dropping alpha
fn crop_rgba_to_rgb(frame: &CameraFrame, rect: PixelRect) -> RgbImage {
    let stride = frame.stride();
    let data = frame.data();

    // PixelRect is clamped to the frame, so every index is in bounds
    RgbImage::from_fn(rect.width, rect.height, |x, y| {
        let i = (rect.y + y) as usize * stride + (rect.x + x) as usize * RGBA_BYTES_PER_PIXEL;
        image::Rgb([data[i], data[i + 1], data[i + 2]])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::CaptureSettings;
    use crate::backends::camera::types::LensFacing;
    use crate::constants::AspectRatio;

    /// 4x4 frame: left half red, right half blue
    fn split_frame() -> CameraFrame {
        let mut data = Vec::new();
        for _y in 0..4 {
            for x in 0..4 {
                let rgba = if x < 2 {
                    [255, 0, 0, 255]
                } else {
                    [0, 0, 255, 255]
                };
                data.extend_from_slice(&rgba);
            }
        }
        CameraFrame::from_rgba(4, 4, data).unwrap()
    }

    fn square_settings() -> CaptureSettings {
        CaptureSettings {
            target_ratio: AspectRatio::Square,
            filter: "none".to_string(),
            ..CaptureSettings::default()
        }
    }

    #[test]
    fn test_front_lens_mirror_flips_pixels() {
        let settings = CaptureSettings {
            lens_facing: LensFacing::Front,
            mirror_enabled: true,
            ..square_settings()
        };
        let processed = process(&split_frame(), &settings);
        assert!(processed.mirrored);
        assert_eq!(processed.image.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(processed.image.get_pixel(3, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_rear_lens_is_never_mirrored() {
        let settings = CaptureSettings {
            lens_facing: LensFacing::Rear,
            mirror_enabled: true,
            ..square_settings()
        };
        let processed = process(&split_frame(), &settings);
        assert!(!processed.mirrored);
        assert_eq!(processed.image.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_crop_takes_center_columns() {
        // 8x4 frame, columns 0..8 encode their index in the red channel
        let mut data = Vec::new();
        for _y in 0..4 {
            for x in 0..8u8 {
                data.extend_from_slice(&[x, 0, 0, 255]);
            }
        }
        let frame = CameraFrame::from_rgba(8, 4, data).unwrap();
        let settings = CaptureSettings {
            mirror_enabled: false,
            ..square_settings()
        };

        let processed = process(&frame, &settings);
        assert_eq!((processed.width, processed.height), (4, 4));
        assert_eq!(processed.image.get_pixel(0, 0).0[0], 2);
        assert_eq!(processed.image.get_pixel(3, 3).0[0], 5);
    }

    #[test]
    fn test_invalid_filter_leaves_pixels_untouched() {
        let settings = CaptureSettings {
            mirror_enabled: false,
            filter: "blur(3px)".to_string(),
            ..square_settings()
        };
        let processed = process(&split_frame(), &settings);
        assert_eq!(processed.image.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_filter_is_applied() {
        let settings = CaptureSettings {
            mirror_enabled: false,
            filter: "invert(100%)".to_string(),
            ..square_settings()
        };
        let processed = process(&split_frame(), &settings);
        assert_eq!(processed.image.get_pixel(0, 0).0, [0, 255, 255]);
    }
}
