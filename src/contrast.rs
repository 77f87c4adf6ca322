//! WCAG contrast evaluation: relative luminance, contrast ratios, compliance
//! levels, and contrast matrices.
//!
//! Thresholds follow WCAG 2.1:
//!
//! - Normal text: AA >= 4.5:1, AAA >= 7:1
//! - Large text (>= 18pt bold or >= 24pt): AA >= 3:1, AAA >= 4.5:1
//! - UI components and graphical objects: >= 3:1

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{hex_to_rgb, parse_color, ColorError, Hsl, Rgb};

pub const AA_NORMAL: f64 = 4.5;
pub const AAA_NORMAL: f64 = 7.0;
pub const AA_LARGE: f64 = 3.0;
pub const AAA_LARGE: f64 = 4.5;
pub const NON_TEXT: f64 = 3.0;

/// A WCAG conformance level. `AAA` is strictly stronger than `AA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum WcagLevel {
    #[default]
    AA,
    AAA,
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// Text size class used to pick a contrast threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Normal,
    Large,
}

/// Minimum contrast ratio for `level` at `size`.
pub fn threshold(level: WcagLevel, size: TextSize) -> f64 {
    match (level, size) {
        (WcagLevel::AA, TextSize::Normal) => AA_NORMAL,
        (WcagLevel::AAA, TextSize::Normal) => AAA_NORMAL,
        (WcagLevel::AA, TextSize::Large) => AA_LARGE,
        (WcagLevel::AAA, TextSize::Large) => AAA_LARGE,
    }
}

/// Returns `true` if `ratio` satisfies `level` for text of `size`.
pub fn meets_wcag(ratio: f64, level: WcagLevel, size: TextSize) -> bool {
    ratio >= threshold(level, size)
}

/// Relative luminance of a color literal, in `[0, 1]`.
pub fn relative_luminance(color: &str) -> Result<f64, ColorError> {
    Ok(parse_color(color)?.relative_luminance())
}

/// Contrast ratio between two colors, in `[1, 21]`. Order does not matter.
pub fn contrast_ratio(color_a: &str, color_b: &str) -> Result<f64, ColorError> {
    Ok(rgb_contrast_ratio(parse_color(color_a)?, parse_color(color_b)?))
}

/// Contrast ratio between two parsed colors.
pub fn rgb_contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = a.relative_luminance();
    let lb = b.relative_luminance();
    let lighter = la.max(lb);
    let darker = la.min(lb);
    (lighter + 0.05) / (darker + 0.05)
}

// ---------------------------------------------------------------------------
// ContrastPair
// ---------------------------------------------------------------------------

/// An ordered foreground/background pair with its ratio and compliance flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastPair {
    pub foreground: String,
    pub background: String,
    pub ratio: f64,
    pub aa: bool,
    pub aaa: bool,
    pub aa_large: bool,
    pub aaa_large: bool,
}

impl ContrastPair {
    /// Evaluate two color literals.
    pub fn evaluate(foreground: &str, background: &str) -> Result<Self, ColorError> {
        let ratio = contrast_ratio(foreground, background)?;
        Ok(Self::from_ratio(foreground, background, ratio))
    }

    fn from_ratio(foreground: &str, background: &str, ratio: f64) -> Self {
        Self {
            foreground: foreground.to_string(),
            background: background.to_string(),
            ratio,
            aa: meets_wcag(ratio, WcagLevel::AA, TextSize::Normal),
            aaa: meets_wcag(ratio, WcagLevel::AAA, TextSize::Normal),
            aa_large: meets_wcag(ratio, WcagLevel::AA, TextSize::Large),
            aaa_large: meets_wcag(ratio, WcagLevel::AAA, TextSize::Large),
        }
    }

    /// Whether this pair satisfies `level` for text of `size`.
    pub fn meets(&self, level: WcagLevel, size: TextSize) -> bool {
        match (level, size) {
            (WcagLevel::AA, TextSize::Normal) => self.aa,
            (WcagLevel::AAA, TextSize::Normal) => self.aaa,
            (WcagLevel::AA, TextSize::Large) => self.aa_large,
            (WcagLevel::AAA, TextSize::Large) => self.aaa_large,
        }
    }
}

/// One cell of a contrast matrix: two named colors and their evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixEntry {
    pub first: String,
    pub second: String,
    pub pair: ContrastPair,
}

/// Evaluate every unordered pair of named colors exactly once.
///
/// Entries that are not strict 6-digit hex colors are dropped before pairing.
/// Pairs come out in input order: `(0, 1), (0, 2), ..., (1, 2), ...`.
pub fn generate_contrast_matrix<'a, I>(colors: I) -> Vec<MatrixEntry>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let valid: Vec<(&str, &str, Rgb)> = colors
        .into_iter()
        .filter_map(|(name, value)| hex_to_rgb(value).ok().map(|rgb| (name, value, rgb)))
        .collect();

    let mut entries = Vec::with_capacity(valid.len() * valid.len().saturating_sub(1) / 2);
    for (i, (first, first_value, first_rgb)) in valid.iter().enumerate() {
        for (second, second_value, second_rgb) in &valid[i + 1..] {
            let ratio = rgb_contrast_ratio(*first_rgb, *second_rgb);
            entries.push(MatrixEntry {
                first: first.to_string(),
                second: second.to_string(),
                pair: ContrastPair::from_ratio(first_value, second_value, ratio),
            });
        }
    }
    entries
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// Pick the candidate with the highest contrast against `background`.
///
/// With no candidates, chooses between white and black.
pub fn best_text_color(background: &str, candidates: &[&str]) -> Result<String, ColorError> {
    let bg = parse_color(background)?;
    if candidates.is_empty() {
        let white = rgb_contrast_ratio(Rgb::WHITE, bg);
        let black = rgb_contrast_ratio(Rgb::BLACK, bg);
        return Ok(if white >= black { Rgb::WHITE } else { Rgb::BLACK }.to_hex());
    }

    let mut best: Option<(f64, &str)> = None;
    for candidate in candidates {
        let ratio = rgb_contrast_ratio(parse_color(candidate)?, bg);
        if best.map_or(true, |(r, _)| ratio > r) {
            best = Some((ratio, *candidate));
        }
    }
    Ok(best.map(|(_, c)| c.to_string()).unwrap_or_default())
}

/// Adjust the HSL lightness of `foreground` until it reaches `target_ratio`
/// against `background`, staying as close to the original lightness as
/// possible.
///
/// On dark backgrounds the foreground is lightened, on light ones darkened.
/// If even the extreme lightness misses the target, the extreme is returned.
pub fn suggest_accessible_color(
    foreground: &str,
    background: &str,
    target_ratio: f64,
) -> Result<String, ColorError> {
    let fg = parse_color(foreground)?;
    let bg = parse_color(background)?;
    if rgb_contrast_ratio(fg, bg) >= target_ratio {
        return Ok(fg.to_hex());
    }

    let hsl = fg.to_hsl();
    let lighten = bg.is_dark();
    let (mut lo, mut hi) = if lighten { (hsl.l, 100.0) } else { (0.0, hsl.l) };
    let extreme = Hsl::new(hsl.h, hsl.s, if lighten { 100.0 } else { 0.0 }).to_rgb();
    let mut best = extreme;

    for _ in 0..32 {
        let mid = (lo + hi) * 0.5;
        let candidate = Hsl::new(hsl.h, hsl.s, mid).to_rgb();
        if rgb_contrast_ratio(candidate, bg) >= target_ratio {
            best = candidate;
            // Stay closer to the original lightness.
            if lighten {
                hi = mid;
            } else {
                lo = mid;
            }
        } else if lighten {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Ok(best.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_of_white_and_black() {
        assert_eq!(relative_luminance("#ffffff").unwrap(), 1.0);
        assert_eq!(relative_luminance("#000000").unwrap(), 0.0);
    }

    #[test]
    fn black_on_white_is_exactly_21() {
        assert_eq!(contrast_ratio("#ffffff", "#000000").unwrap(), 21.0);
    }

    #[test]
    fn ratio_is_order_independent() {
        let a = contrast_ratio("#1a73e8", "#f8f9fa").unwrap();
        let b = contrast_ratio("#f8f9fa", "#1a73e8").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn self_contrast_is_one() {
        assert_eq!(contrast_ratio("#767676", "#767676").unwrap(), 1.0);
    }

    #[test]
    fn equal_luminance_distinct_colors_have_unit_ratio() {
        // Same channels in a different notation.
        assert_eq!(contrast_ratio("#ff0000", "rgb(255, 0, 0)").unwrap(), 1.0);
        assert_eq!(contrast_ratio("#808080", "hsl(0, 0%, 50.2%)").unwrap(), 1.0);
    }

    #[test]
    fn gray_767676_on_white_is_just_aa() {
        let pair = ContrastPair::evaluate("#767676", "#ffffff").unwrap();
        assert!((pair.ratio - 4.54).abs() < 0.01);
        assert!(pair.aa);
        assert!(!pair.aaa);
        assert!(pair.aa_large);
        assert!(pair.aaa_large);
        assert!(pair.meets(WcagLevel::AA, TextSize::Normal));
        assert!(!pair.meets(WcagLevel::AAA, TextSize::Normal));
    }

    #[test]
    fn thresholds() {
        assert_eq!(threshold(WcagLevel::AA, TextSize::Normal), 4.5);
        assert_eq!(threshold(WcagLevel::AAA, TextSize::Normal), 7.0);
        assert_eq!(threshold(WcagLevel::AA, TextSize::Large), 3.0);
        assert_eq!(threshold(WcagLevel::AAA, TextSize::Large), 4.5);
        assert!(meets_wcag(4.5, WcagLevel::AA, TextSize::Normal));
        assert!(!meets_wcag(4.49, WcagLevel::AA, TextSize::Normal));
    }

    #[test]
    fn level_ordering_and_display() {
        assert!(WcagLevel::AAA > WcagLevel::AA);
        assert_eq!(WcagLevel::AAA.to_string(), "AAA");
        assert_eq!(WcagLevel::default(), WcagLevel::AA);
    }

    #[test]
    fn invalid_colors_error() {
        assert!(matches!(
            contrast_ratio("#fffff", "#000000"),
            Err(ColorError::InvalidColorFormat { .. })
        ));
    }

    #[test]
    fn matrix_pairs_each_unordered_pair_once() {
        let colors = [
            ("white", "#ffffff"),
            ("black", "#000000"),
            ("blue", "#1a73e8"),
            ("gray", "#767676"),
        ];
        let matrix = generate_contrast_matrix(colors);
        assert_eq!(matrix.len(), 6);
        assert!(matrix.iter().all(|e| e.first != e.second));
        let mut seen = std::collections::HashSet::new();
        for entry in &matrix {
            let mut key = [entry.first.clone(), entry.second.clone()];
            key.sort();
            assert!(seen.insert(key), "duplicate pair {entry:?}");
        }
        assert_eq!(matrix[0].first, "white");
        assert_eq!(matrix[0].second, "black");
        assert_eq!(matrix[0].pair.ratio, 21.0);
    }

    #[test]
    fn matrix_skips_invalid_entries() {
        let colors = [
            ("white", "#ffffff"),
            ("short", "#fff"),
            ("ref", "colors.primary"),
            ("black", "#000000"),
        ];
        let matrix = generate_contrast_matrix(colors);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix[0].first, "white");
        assert_eq!(matrix[0].second, "black");
    }

    #[test]
    fn matrix_of_fewer_than_two_is_empty() {
        assert!(generate_contrast_matrix([("a", "#ffffff")]).is_empty());
        assert!(generate_contrast_matrix(Vec::<(&str, &str)>::new()).is_empty());
    }

    #[test]
    fn best_text_color_picks_highest_contrast() {
        assert_eq!(best_text_color("#0f172a", &[]).unwrap(), "#ffffff");
        // Mid blue sits just past the crossover: black 4.66:1, white 4.51:1.
        assert_eq!(best_text_color("#1a73e8", &[]).unwrap(), "#000000");
        assert_eq!(best_text_color("#ffeb3b", &[]).unwrap(), "#000000");
        assert_eq!(
            best_text_color("#ffffff", &["#767676", "#202124"]).unwrap(),
            "#202124"
        );
    }

    #[test]
    fn suggestion_meets_target() {
        let suggested = suggest_accessible_color("#9aa0a6", "#ffffff", AA_NORMAL).unwrap();
        assert!(contrast_ratio(&suggested, "#ffffff").unwrap() >= AA_NORMAL);

        let suggested = suggest_accessible_color("#3c4043", "#121212", AAA_NORMAL).unwrap();
        assert!(contrast_ratio(&suggested, "#121212").unwrap() >= AAA_NORMAL);
    }

    #[test]
    fn suggestion_keeps_already_accessible_color() {
        assert_eq!(
            suggest_accessible_color("#202124", "#ffffff", AA_NORMAL).unwrap(),
            "#202124"
        );
    }
}
