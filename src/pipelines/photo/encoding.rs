// SPDX-License-Identifier: GPL-3.0-only

//! Photo encoding
//!
//! - PNG (lossless, used for HD output)
//! - JPEG (lossy, quality 0.85)

use crate::constants::encoding::{JPEG_QUALITY, PNG_QUALITY};
use crate::errors::PhotoError;
use image::RgbImage;
use tracing::debug;

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFormat {
    /// JPEG format (lossy compression)
    Jpeg,
    /// PNG format (lossless compression)
    Png,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }
}

/// Output format plus quality factor in [0, 1]
///
/// Quality only affects JPEG; PNG reports 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputEncoding {
    pub format: EncodingFormat,
    pub quality: f32,
}

impl OutputEncoding {
    /// Lossless PNG for HD captures, JPEG at 0.85 otherwise
    pub fn for_hd(hd_enabled: bool) -> Self {
        if hd_enabled {
            Self {
                format: EncodingFormat::Png,
                quality: PNG_QUALITY,
            }
        } else {
            Self {
                format: EncodingFormat::Jpeg,
                quality: JPEG_QUALITY,
            }
        }
    }

    /// JPEG quality value (1-100)
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Photo encoder
pub struct PhotoEncoder {
    encoding: OutputEncoding,
}

impl PhotoEncoder {
    pub fn new(encoding: OutputEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> OutputEncoding {
        self.encoding
    }

    /// Encode an RGB image into the configured format
    pub fn encode(&self, image: &RgbImage) -> Result<Vec<u8>, PhotoError> {
        let data = match self.encoding.format {
            EncodingFormat::Jpeg => Self::encode_jpeg(image, self.encoding.jpeg_quality())?,
            EncodingFormat::Png => Self::encode_png(image)?,
        };

        debug!(
            size = data.len(),
            format = ?self.encoding.format,
            "Encoding complete"
        );
        Ok(data)
    }

    /// Encode image as JPEG
    fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, PhotoError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);

        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);

        encoder
            .encode(
                image.as_raw(),
                image.width(),
                image.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| PhotoError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

        Ok(buffer)
    }

    /// Encode image as PNG
    fn encode_png(image: &RgbImage) -> Result<Vec<u8>, PhotoError> {
        let mut buffer = Vec::new();

        image
            .write_to(
                &mut std::io::Cursor::new(&mut buffer),
                image::ImageFormat::Png,
            )
            .map_err(|e| PhotoError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

        Ok(buffer)
    }
}
