// SPDX-License-Identifier: GPL-3.0-only

//! Timestamp watermark
//!
//! Draws the capture time-of-day in the bottom-right corner using a built-in
//! 5x7 bitmap font scaled to the output height. Only the characters that a
//! time string can contain have glyphs; anything else advances as a space.

use crate::constants::watermark::{COLOR, FONT_SCALE, MARGIN_PX};
use chrono::{DateTime, Local};
use image::{Rgb, RgbImage};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// Blank columns between glyphs, in font pixels
const GLYPH_SPACING: u32 = 1;

/// Rows of a 5x7 glyph, most significant of the low 5 bits is the left column
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        _ => return None,
    };
    Some(rows)
}

/// Locale-style time of day, e.g. `3:07:09 PM`
pub fn time_label(time: &DateTime<Local>) -> String {
    time.format("%-I:%M:%S %p").to_string()
}

/// Integer font scale for an output height (font pixels per glyph cell)
pub fn font_scale(image_height: u32) -> u32 {
    let text_height = image_height as f32 * FONT_SCALE;
    ((text_height / GLYPH_HEIGHT as f32).round() as u32).max(1)
}

/// Rendered width of `text` at `scale`
pub fn text_width(text: &str, scale: u32) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return 0;
    }
    (count * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING) * scale
}

/// Draw the capture time right-aligned at (width - margin, height - margin)
pub fn draw_timestamp(image: &mut RgbImage, time: &DateTime<Local>) {
    draw_text_right_aligned(image, &time_label(time));
}

/// Draw `text` with its bottom-right corner at the fixed margin
///
/// Text that does not fit is clipped at the left edge.
pub fn draw_text_right_aligned(image: &mut RgbImage, text: &str) {
    let (width, height) = image.dimensions();
    let scale = font_scale(height);
    let right = width as i64 - MARGIN_PX as i64;
    let baseline = height as i64 - MARGIN_PX as i64;
    let top = baseline - (GLYPH_HEIGHT * scale) as i64;
    let mut pen_x = right - text_width(text, scale) as i64;

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            draw_glyph(image, &rows, pen_x, top, scale);
        }
        pen_x += ((GLYPH_WIDTH + GLYPH_SPACING) * scale) as i64;
    }
}

fn draw_glyph(image: &mut RgbImage, rows: &[u8; 7], left: i64, top: i64, scale: u32) {
    let (width, height) = image.dimensions();
    let scale = scale as i64;

    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            let x0 = left + col as i64 * scale;
            let y0 = top + row as i64 * scale;
            for y in y0.max(0)..(y0 + scale).min(height as i64) {
                for x in x0.max(0)..(x0 + scale).min(width as i64) {
                    image.put_pixel(x as u32, y as u32, Rgb(COLOR));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn accent_bounds(image: &RgbImage) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in image.enumerate_pixels() {
            if pixel.0 == COLOR {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bounds
    }

    #[test]
    fn test_time_label_format() {
        let time = Local.with_ymd_and_hms(2026, 2, 1, 15, 7, 9).unwrap();
        assert_eq!(time_label(&time), "3:07:09 PM");
        let morning = Local.with_ymd_and_hms(2026, 2, 1, 0, 30, 0).unwrap();
        assert_eq!(time_label(&morning), "12:30:00 AM");
    }

    #[test]
    fn test_font_scale_tracks_height() {
        assert_eq!(font_scale(1080), 6);
        assert_eq!(font_scale(100), 1);
        assert!(font_scale(2160) > font_scale(1080));
    }

    #[test]
    fn test_text_is_right_aligned_inside_margin() {
        let mut image = RgbImage::new(400, 300);
        draw_text_right_aligned(&mut image, "8:88:88 PM");

        let (_, _, max_x, max_y) = accent_bounds(&image).expect("text drawn");
        let scale = font_scale(300);
        // Rightmost lit column of 'M' is its last column, bottom row is lit
        assert_eq!(max_x, 400 - MARGIN_PX - 1);
        assert_eq!(max_y, 300 - MARGIN_PX - 1);
        assert_eq!(scale, 2);
    }

    #[test]
    fn test_oversized_text_is_clipped() {
        let mut image = RgbImage::new(40, 40);
        draw_text_right_aligned(&mut image, "12:00:00 AM");
        let (min_x, _, _, _) = accent_bounds(&image).expect("text drawn");
        assert_eq!(min_x, 0);
    }
}
