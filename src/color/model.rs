//! RGB and HSL color representations and the conversions between them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors from color parsing and conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid color format '{input}': {reason}")]
    InvalidColorFormat { input: String, reason: String },
}

impl ColorError {
    pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> Self {
        ColorError::InvalidColorFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rgb
// ---------------------------------------------------------------------------

/// An opaque sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL. Components are left unrounded so that a round trip
    /// through [`Hsl::to_rgb`] reproduces the original channels.
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(h * 60.0, s * 100.0, l * 100.0)
    }

    /// WCAG 2.1 relative luminance in `[0, 1]`.
    ///
    /// Channels are decoded to `[0, 1]`, linearized with the piecewise sRGB
    /// curve, then weighted `0.2126 R + 0.7152 G + 0.0722 B`.
    pub fn relative_luminance(self) -> f64 {
        let r = linearize(self.r);
        let g = linearize(self.g);
        let b = linearize(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }
}

/// sRGB channel to linear light.
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// Hsl
// ---------------------------------------------------------------------------

/// A color in HSL space.
///
/// Hue is in degrees `[0, 360)`, saturation and lightness are percentages
/// `[0, 100]`. [`Hsl::new`] normalizes out-of-range components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Create a normalized HSL color: hue wraps into `[0, 360)`, saturation
    /// and lightness clamp into `[0, 100]`.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0);
        Self {
            // rem_euclid can return exactly 360.0 for tiny negative inputs.
            h: if h >= 360.0 { 0.0 } else { h },
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// Convert to RGB, rounding each channel to the nearest integer.
    pub fn to_rgb(self) -> Rgb {
        let h = self.h / 360.0;
        let s = self.s / 100.0;
        let l = self.l / 100.0;

        if s == 0.0 {
            let v = channel(l);
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb::new(
            channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            channel(hue_to_rgb(p, q, h)),
            channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.h.round(),
            self.s.round(),
            self.l.round()
        )
    }
}

// ---------------------------------------------------------------------------
// Hex conversions
// ---------------------------------------------------------------------------

/// Parse a strict 6-digit hex color (`#RRGGBB`, the `#` is optional).
///
/// Any other length or a non-hex digit fails with
/// [`ColorError::InvalidColorFormat`]; nothing is clamped or guessed.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return Err(ColorError::invalid(
            hex,
            format!("expected 6 hex digits, found {}", digits.len()),
        ));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::invalid(hex, "contains non-hex characters"));
    }

    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| ColorError::invalid(hex, e.to_string()))
    };
    Ok(Rgb::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
}

/// Format RGB channels as lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_hex()
}

/// Parse a 6-digit hex color into HSL.
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    Ok(hex_to_rgb(hex)?.to_hsl())
}

/// Format an HSL color as lowercase `#rrggbb`.
pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl.to_hex()
}

/// Convert RGB to HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    rgb.to_hsl()
}

/// Convert HSL to RGB.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    hsl.to_rgb()
}

/// Returns `true` if `value` is a strict 6-digit hex color.
pub fn is_valid_hex(value: &str) -> bool {
    hex_to_rgb(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_rgb_parses_with_and_without_hash() {
        assert_eq!(hex_to_rgb("#1a73e8").unwrap(), Rgb::new(0x1a, 0x73, 0xe8));
        assert_eq!(hex_to_rgb("1A73E8").unwrap(), Rgb::new(0x1a, 0x73, 0xe8));
    }

    #[test]
    fn hex_to_rgb_rejects_wrong_length() {
        let err = hex_to_rgb("#fff").unwrap_err();
        assert!(matches!(err, ColorError::InvalidColorFormat { .. }));
        assert!(hex_to_rgb("#1a73e80").is_err());
        assert!(hex_to_rgb("").is_err());
    }

    #[test]
    fn hex_to_rgb_rejects_non_hex() {
        let err = hex_to_rgb("#12345g").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid color format '#12345g': contains non-hex characters"
        );
    }

    #[test]
    fn hex_to_rgb_rejects_multibyte_input() {
        // Six bytes, but not six hex digits.
        assert!(hex_to_rgb("#ééé").is_err());
    }

    #[test]
    fn rgb_to_hex_is_lowercase() {
        assert_eq!(rgb_to_hex(Rgb::new(255, 0, 170)), "#ff00aa");
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "#010203");
    }

    #[test]
    fn primaries_to_hsl() {
        let red = Rgb::new(255, 0, 0).to_hsl();
        assert_eq!((red.h, red.s, red.l), (0.0, 100.0, 50.0));

        let green = Rgb::new(0, 255, 0).to_hsl();
        assert_eq!((green.h, green.s, green.l), (120.0, 100.0, 50.0));

        let blue = Rgb::new(0, 0, 255).to_hsl();
        assert_eq!((blue.h, blue.s, blue.l), (240.0, 100.0, 50.0));
    }

    #[test]
    fn gray_has_zero_saturation() {
        let gray = Rgb::new(128, 128, 128).to_hsl();
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert!((gray.l - 50.196).abs() < 0.01);
    }

    #[test]
    fn hsl_to_rgb_known_values() {
        assert_eq!(Hsl::new(0.0, 100.0, 50.0).to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Hsl::new(0.0, 0.0, 100.0).to_rgb(), Rgb::WHITE);
        assert_eq!(Hsl::new(0.0, 0.0, 0.0).to_rgb(), Rgb::BLACK);
        assert_eq!(hsl_to_hex(Hsl::new(120.0, 100.0, 25.0)), "#008000");
    }

    #[test]
    fn hsl_normalizes_components() {
        let hsl = Hsl::new(-30.0, 150.0, -5.0);
        assert_eq!(hsl.h, 330.0);
        assert_eq!(hsl.s, 100.0);
        assert_eq!(hsl.l, 0.0);
        assert_eq!(Hsl::new(720.0, 50.0, 50.0).h, 0.0);
    }

    #[test]
    fn hex_hsl_round_trip() {
        for hex in ["#1a73e8", "#767676", "#ff00aa", "#000000", "#ffffff", "#0f172a"] {
            let back = hsl_to_hex(hex_to_hsl(hex).unwrap());
            assert_eq!(back, hex);
        }
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(Rgb::WHITE.relative_luminance(), 1.0);
        assert_eq!(Rgb::BLACK.relative_luminance(), 0.0);
    }

    #[test]
    fn is_valid_hex_is_strict() {
        assert!(is_valid_hex("#abcdef"));
        assert!(!is_valid_hex("#abc"));
        assert!(!is_valid_hex("rgb(0, 0, 0)"));
    }
}
