//! Color manipulations: lightness, saturation, hue rotation, mixing, palettes.
//!
//! Each operation exists twice: as an infallible method on [`Rgb`] and as a
//! free function over a 6-digit hex string that fails with
//! [`ColorError::InvalidColorFormat`] on malformed input.

use crate::color::model::{hex_to_rgb, ColorError, Hsl, Rgb};

impl Rgb {
    /// Increase HSL lightness by `amount` percentage points.
    pub fn lighten(self, amount: f64) -> Rgb {
        let hsl = self.to_hsl();
        Hsl::new(hsl.h, hsl.s, hsl.l + amount).to_rgb()
    }

    /// Decrease HSL lightness by `amount` percentage points.
    pub fn darken(self, amount: f64) -> Rgb {
        self.lighten(-amount)
    }

    /// Increase HSL saturation by `amount` percentage points.
    pub fn saturate(self, amount: f64) -> Rgb {
        let hsl = self.to_hsl();
        Hsl::new(hsl.h, hsl.s + amount, hsl.l).to_rgb()
    }

    /// Decrease HSL saturation by `amount` percentage points.
    pub fn desaturate(self, amount: f64) -> Rgb {
        self.saturate(-amount)
    }

    /// Rotate the hue by `degrees` (wraps around the color wheel).
    pub fn adjust_hue(self, degrees: f64) -> Rgb {
        let hsl = self.to_hsl();
        Hsl::new(hsl.h + degrees, hsl.s, hsl.l).to_rgb()
    }

    /// Blend toward `other` channel-wise.
    ///
    /// `weight = 0.0` returns `self`, `weight = 1.0` returns `other`; values
    /// outside `[0, 1]` are clamped.
    pub fn mix(self, other: Rgb, weight: f64) -> Rgb {
        let w = weight.clamp(0.0, 1.0);
        let inv = 1.0 - w;
        let blend = |a: u8, b: u8| (f64::from(a) * inv + f64::from(b) * w).round() as u8;
        Rgb::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }

    /// The color opposite on the wheel (hue + 180°).
    pub fn complementary(self) -> Rgb {
        self.adjust_hue(180.0)
    }

    /// Remove all saturation, keeping HSL lightness.
    pub fn grayscale(self) -> Rgb {
        let hsl = self.to_hsl();
        Hsl::new(hsl.h, 0.0, hsl.l).to_rgb()
    }

    /// Invert each channel.
    pub fn invert(self) -> Rgb {
        Rgb::new(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// `true` when white text reads better on this color than black text.
    pub fn is_dark(self) -> bool {
        let l = self.relative_luminance();
        // (1 + 0.05) / (l + 0.05) > (l + 0.05) / (0 + 0.05)
        (l + 0.05) * (l + 0.05) < 1.05 * 0.05
    }

    /// Inverse of [`Rgb::is_dark`].
    pub fn is_light(self) -> bool {
        !self.is_dark()
    }
}

/// Lighten a hex color by `amount` lightness points.
pub fn lighten(color: &str, amount: f64) -> Result<String, ColorError> {
    Ok(hex_to_rgb(color)?.lighten(amount).to_hex())
}

/// Darken a hex color by `amount` lightness points.
pub fn darken(color: &str, amount: f64) -> Result<String, ColorError> {
    Ok(hex_to_rgb(color)?.darken(amount).to_hex())
}

/// Saturate a hex color by `amount` saturation points.
pub fn saturate(color: &str, amount: f64) -> Result<String, ColorError> {
    Ok(hex_to_rgb(color)?.saturate(amount).to_hex())
}

/// Desaturate a hex color by `amount` saturation points.
pub fn desaturate(color: &str, amount: f64) -> Result<String, ColorError> {
    Ok(hex_to_rgb(color)?.desaturate(amount).to_hex())
}

/// Rotate the hue of a hex color by `degrees`.
pub fn adjust_hue(color: &str, degrees: f64) -> Result<String, ColorError> {
    Ok(hex_to_rgb(color)?.adjust_hue(degrees).to_hex())
}

/// Mix two hex colors. `weight` is the share of `color_b` in the result.
pub fn mix(color_a: &str, color_b: &str, weight: f64) -> Result<String, ColorError> {
    Ok(hex_to_rgb(color_a)?.mix(hex_to_rgb(color_b)?, weight).to_hex())
}

/// Complementary hex color.
pub fn complementary(color: &str) -> Result<String, ColorError> {
    Ok(hex_to_rgb(color)?.complementary().to_hex())
}

/// Grayscale version of a hex color.
pub fn grayscale(color: &str) -> Result<String, ColorError> {
    Ok(hex_to_rgb(color)?.grayscale().to_hex())
}

/// Inverted hex color.
pub fn invert(color: &str) -> Result<String, ColorError> {
    Ok(hex_to_rgb(color)?.invert().to_hex())
}

/// See [`Rgb::is_dark`].
pub fn is_dark(color: &str) -> Result<bool, ColorError> {
    Ok(hex_to_rgb(color)?.is_dark())
}

/// See [`Rgb::is_light`].
pub fn is_light(color: &str) -> Result<bool, ColorError> {
    Ok(hex_to_rgb(color)?.is_light())
}

/// Generate `steps` shades of `base_color`, ordered light to dark.
///
/// Hue and saturation are kept; lightness is spread evenly from 95% down to
/// 10%. `steps == 1` returns the base color itself and `steps == 0` an empty
/// palette.
pub fn generate_palette(base_color: &str, steps: usize) -> Result<Vec<String>, ColorError> {
    let base = hex_to_rgb(base_color)?;
    match steps {
        0 => Ok(Vec::new()),
        1 => Ok(vec![base.to_hex()]),
        n => {
            const LIGHTEST: f64 = 95.0;
            const DARKEST: f64 = 10.0;
            let hsl = base.to_hsl();
            let step = (LIGHTEST - DARKEST) / (n - 1) as f64;
            Ok((0..n)
                .map(|i| Hsl::new(hsl.h, hsl.s, LIGHTEST - step * i as f64).to_hex())
                .collect())
        }
    }
}
