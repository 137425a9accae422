// SPDX-License-Identifier: GPL-3.0-only

//! Filter descriptor parsing and CPU application
//!
//! A descriptor is a chain of color operations in the familiar compositing
//! syntax, e.g. `"sepia(0.5) contrast(0.9) brightness(1.1)"`. Operations run
//! left to right and every intermediate result is clamped to `[0, 1]`.
//!
//! Supported operations:
//! - `grayscale`, `sepia`, `invert`: amount in `[0, 1]` (larger values clamp)
//! - `saturate`, `contrast`, `brightness`: any non-negative amount
//! - `hue-rotate`: angle in `deg`, `rad`, `grad` or `turn`
//!
//! Amounts may be plain numbers or percentages. An empty argument means 1
//! (0 for `hue-rotate`). `none` or an empty string is the identity chain.
//!
//! Only per-pixel color operations are supported. Spatial or compositing
//! functions such as `blur`, `opacity` and `drop-shadow` are rejected as
//! [`FilterError::UnknownFunction`], which makes the whole descriptor invalid
//! (callers then leave the frame unfiltered).

use crate::errors::FilterError;
use image::RgbImage;
use std::str::FromStr;

/// A single color operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    Grayscale(f32),
    Sepia(f32),
    Invert(f32),
    Saturate(f32),
    Contrast(f32),
    Brightness(f32),
    /// Rotation in degrees
    HueRotate(f32),
}

type Matrix = [[f32; 3]; 3];

impl FilterOp {
    fn parse(name: &str, argument: &str) -> Result<Self, FilterError> {
        let invalid = || FilterError::InvalidArgument {
            function: name.to_string(),
            argument: argument.to_string(),
        };

        let op = match name {
            "grayscale" => FilterOp::Grayscale(parse_amount(argument).ok_or_else(invalid)?.min(1.0)),
            "sepia" => FilterOp::Sepia(parse_amount(argument).ok_or_else(invalid)?.min(1.0)),
            "invert" => FilterOp::Invert(parse_amount(argument).ok_or_else(invalid)?.min(1.0)),
            "saturate" => FilterOp::Saturate(parse_amount(argument).ok_or_else(invalid)?),
            "contrast" => FilterOp::Contrast(parse_amount(argument).ok_or_else(invalid)?),
            "brightness" => FilterOp::Brightness(parse_amount(argument).ok_or_else(invalid)?),
            "hue-rotate" => FilterOp::HueRotate(parse_angle(argument).ok_or_else(invalid)?),
            other => return Err(FilterError::UnknownFunction(other.to_string())),
        };
        Ok(op)
    }

    /// Color matrix for the matrix-based operations
    fn matrix(&self) -> Option<Matrix> {
        match *self {
            FilterOp::Grayscale(amount) => {
                let s = 1.0 - amount;
                Some([
                    [0.2126 + 0.7874 * s, 0.7152 - 0.7152 * s, 0.0722 - 0.0722 * s],
                    [0.2126 - 0.2126 * s, 0.7152 + 0.2848 * s, 0.0722 - 0.0722 * s],
                    [0.2126 - 0.2126 * s, 0.7152 - 0.7152 * s, 0.0722 + 0.9278 * s],
                ])
            }
            FilterOp::Sepia(amount) => {
                let s = 1.0 - amount;
                Some([
                    [0.393 + 0.607 * s, 0.769 - 0.769 * s, 0.189 - 0.189 * s],
                    [0.349 - 0.349 * s, 0.686 + 0.314 * s, 0.168 - 0.168 * s],
                    [0.272 - 0.272 * s, 0.534 - 0.534 * s, 0.131 + 0.869 * s],
                ])
            }
            FilterOp::Saturate(s) => Some([
                [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
            ]),
            FilterOp::HueRotate(degrees) => {
                let (sin, cos) = degrees.to_radians().sin_cos();
                Some([
                    [
                        0.213 + cos * 0.787 - sin * 0.213,
                        0.715 - cos * 0.715 - sin * 0.715,
                        0.072 - cos * 0.072 + sin * 0.928,
                    ],
                    [
                        0.213 - cos * 0.213 + sin * 0.143,
                        0.715 + cos * 0.285 + sin * 0.140,
                        0.072 - cos * 0.072 - sin * 0.283,
                    ],
                    [
                        0.213 - cos * 0.213 - sin * 0.787,
                        0.715 - cos * 0.715 + sin * 0.715,
                        0.072 + cos * 0.928 + sin * 0.072,
                    ],
                ])
            }
            FilterOp::Invert(_) | FilterOp::Contrast(_) | FilterOp::Brightness(_) => None,
        }
    }

    /// Apply to one normalized RGB triple
    fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        if let Some(m) = self.matrix() {
            let [r, g, b] = rgb;
            return [
                (m[0][0] * r + m[0][1] * g + m[0][2] * b).clamp(0.0, 1.0),
                (m[1][0] * r + m[1][1] * g + m[1][2] * b).clamp(0.0, 1.0),
                (m[2][0] * r + m[2][1] * g + m[2][2] * b).clamp(0.0, 1.0),
            ];
        }

        let transfer = |v: f32| -> f32 {
            match *self {
                FilterOp::Invert(a) => v * (1.0 - a) + (1.0 - v) * a,
                FilterOp::Contrast(a) => (v - 0.5) * a + 0.5,
                FilterOp::Brightness(a) => v * a,
                _ => v,
            }
            .clamp(0.0, 1.0)
        };
        rgb.map(transfer)
    }
}

/// Parse an amount: number, percentage, or empty (= 1)
fn parse_amount(argument: &str) -> Option<f32> {
    let argument = argument.trim();
    if argument.is_empty() {
        return Some(1.0);
    }

    let value = match argument.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f32>().ok()? / 100.0,
        None => argument.parse::<f32>().ok()?,
    };

    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Parse an angle into degrees: `deg`, `grad`, `rad`, `turn`, empty or bare 0
fn parse_angle(argument: &str) -> Option<f32> {
    let argument = argument.trim();
    if argument.is_empty() {
        return Some(0.0);
    }

    // "grad" must be tested before "rad"
    let (number, to_degrees): (&str, fn(f32) -> f32) = if let Some(n) = argument.strip_suffix("deg") {
        (n, |v| v)
    } else if let Some(n) = argument.strip_suffix("grad") {
        (n, |v| v * 0.9)
    } else if let Some(n) = argument.strip_suffix("rad") {
        (n, f32::to_degrees)
    } else if let Some(n) = argument.strip_suffix("turn") {
        (n, |v| v * 360.0)
    } else {
        // Unitless angles are only valid for zero
        let value = argument.parse::<f32>().ok()?;
        return (value == 0.0).then_some(0.0);
    };

    let value = number.trim().parse::<f32>().ok()?;
    value.is_finite().then(|| to_degrees(value))
}

/// Ordered chain of filter operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    ops: Vec<FilterOp>,
}

impl FilterChain {
    /// Chain that leaves pixels untouched
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[FilterOp] {
        &self.ops
    }

    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply every operation, in order, to each pixel
    pub fn apply(&self, image: &mut RgbImage) {
        if self.is_identity() {
            return;
        }

        for pixel in image.pixels_mut() {
            let mut rgb = [
                pixel[0] as f32 / 255.0,
                pixel[1] as f32 / 255.0,
                pixel[2] as f32 / 255.0,
            ];
            for op in &self.ops {
                rgb = op.apply(rgb);
            }
            for (channel, value) in pixel.0.iter_mut().zip(rgb) {
                *channel = (value * 255.0).round() as u8;
            }
        }
    }
}

impl FromStr for FilterChain {
    type Err = FilterError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let descriptor = descriptor.trim();
        if descriptor.is_empty() || descriptor.eq_ignore_ascii_case("none") {
            return Ok(Self::identity());
        }

        let mut ops = Vec::new();
        let mut rest = descriptor;

        while !rest.is_empty() {
            let open = rest
                .find('(')
                .ok_or_else(|| FilterError::Malformed(format!("expected '(' in '{}'", rest)))?;
            let name = rest[..open].trim().to_ascii_lowercase();
            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
                return Err(FilterError::Malformed(format!(
                    "invalid function name '{}'",
                    &rest[..open]
                )));
            }

            let close = rest[open..]
                .find(')')
                .map(|i| open + i)
                .ok_or_else(|| FilterError::Malformed(format!("unclosed '(' after {}", name)))?;

            ops.push(FilterOp::parse(&name, &rest[open + 1..close])?);
            rest = rest[close + 1..].trim_start();
        }

        Ok(Self { ops })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn apply_to(descriptor: &str, rgb: [u8; 3]) -> [u8; 3] {
        let chain: FilterChain = descriptor.parse().unwrap();
        let mut image = RgbImage::from_pixel(1, 1, Rgb(rgb));
        chain.apply(&mut image);
        image.get_pixel(0, 0).0
    }

    #[test]
    fn test_none_is_identity() {
        assert!("none".parse::<FilterChain>().unwrap().is_identity());
        assert!("  ".parse::<FilterChain>().unwrap().is_identity());
        assert_eq!(apply_to("none", [12, 34, 56]), [12, 34, 56]);
    }

    #[test]
    fn test_parses_chain_in_order() {
        let chain: FilterChain = "sepia(0.5) contrast(90%) brightness(1.1)".parse().unwrap();
        assert_eq!(
            chain.ops(),
            &[
                FilterOp::Sepia(0.5),
                FilterOp::Contrast(0.9),
                FilterOp::Brightness(1.1)
            ]
        );
    }

    #[test]
    fn test_angle_units() {
        let chain: FilterChain = "hue-rotate(-20deg) hue-rotate(0.5turn) hue-rotate(100grad) hue-rotate(0)"
            .parse()
            .unwrap();
        assert_eq!(
            chain.ops(),
            &[
                FilterOp::HueRotate(-20.0),
                FilterOp::HueRotate(180.0),
                FilterOp::HueRotate(90.0),
                FilterOp::HueRotate(0.0)
            ]
        );
        let rad: FilterChain = "hue-rotate(3.14159265rad)".parse().unwrap();
        match rad.ops()[0] {
            FilterOp::HueRotate(deg) => assert!((deg - 180.0).abs() < 1e-3),
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_descriptors() {
        assert_eq!(
            "blur(4px)".parse::<FilterChain>(),
            Err(FilterError::UnknownFunction("blur".to_string()))
        );
        assert!(matches!(
            "saturate(-1)".parse::<FilterChain>(),
            Err(FilterError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "hue-rotate(20)".parse::<FilterChain>(),
            Err(FilterError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "sepia(0.3".parse::<FilterChain>(),
            Err(FilterError::Malformed(_))
        ));
        assert!(matches!(
            "sepia".parse::<FilterChain>(),
            Err(FilterError::Malformed(_))
        ));
    }

    #[test]
    fn test_spatial_functions_invalidate_whole_chain() {
        assert_eq!(
            "sepia(0.5) opacity(0.5)".parse::<FilterChain>(),
            Err(FilterError::UnknownFunction("opacity".to_string()))
        );
        assert_eq!(
            "drop-shadow(2px 2px 4px black) contrast(1.2)".parse::<FilterChain>(),
            Err(FilterError::UnknownFunction("drop-shadow".to_string()))
        );
    }

    #[test]
    fn test_grayscale_equalizes_channels() {
        let [r, g, b] = apply_to("grayscale(100%)", [200, 40, 90]);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn test_brightness_and_contrast() {
        assert_eq!(apply_to("brightness(0.5)", [200, 100, 0]), [100, 50, 0]);
        // Contrast 0 collapses everything to mid gray
        assert_eq!(apply_to("contrast(0)", [10, 200, 255]), [128, 128, 128]);
        // Saturating brightness clamps at white
        assert_eq!(apply_to("brightness(3)", [200, 200, 200]), [255, 255, 255]);
    }

    #[test]
    fn test_invert() {
        assert_eq!(apply_to("invert(1)", [0, 255, 55]), [255, 0, 200]);
        assert_eq!(apply_to("invert(0)", [0, 255, 55]), [0, 255, 55]);
    }

    #[test]
    fn test_full_hue_turn_is_identity() {
        let out = apply_to("hue-rotate(360deg)", [180, 60, 20]);
        for (a, b) in out.iter().zip([180u8, 60, 20]) {
            assert!((*a as i32 - b as i32).abs() <= 1, "{:?}", out);
        }
    }

    #[test]
    fn test_saturate_zero_is_gray() {
        let [r, g, b] = apply_to("saturate(0)", [255, 0, 0]);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
