//! Fluid sizes: values that interpolate linearly between two sizes across a
//! viewport range and render as a CSS `clamp()` expression.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default lower viewport bound, in px.
pub const DEFAULT_MIN_VIEWPORT: f64 = 320.0;
/// Default upper viewport bound, in px.
pub const DEFAULT_MAX_VIEWPORT: f64 = 1280.0;

/// Typography steps and their multipliers over the base size.
pub const TYPE_SCALE: &[(&str, f64)] = &[
    ("xs", 0.75),
    ("sm", 0.875),
    ("base", 1.0),
    ("lg", 1.125),
    ("xl", 1.25),
    ("2xl", 1.5),
    ("3xl", 1.875),
    ("4xl", 2.25),
    ("5xl", 3.0),
    ("6xl", 3.75),
];

/// Spacing steps and their multipliers over the base unit.
pub const SPACE_SCALE: &[(&str, f64)] = &[
    ("xs", 0.25),
    ("sm", 0.5),
    ("md", 1.0),
    ("lg", 1.5),
    ("xl", 2.0),
    ("2xl", 3.0),
    ("3xl", 4.0),
];

/// Errors from fluid-size generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FluidError {
    #[error("invalid fluid range: {reason}")]
    InvalidFluidRange { reason: String },
}

fn invalid(reason: impl Into<String>) -> FluidError {
    FluidError::InvalidFluidRange {
        reason: reason.into(),
    }
}

/// Viewport bounds and output precision for fluid scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FluidConfig {
    pub min_viewport: f64,
    pub max_viewport: f64,
    /// Decimal places kept in rendered CSS.
    pub precision: usize,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            min_viewport: DEFAULT_MIN_VIEWPORT,
            max_viewport: DEFAULT_MAX_VIEWPORT,
            precision: 4,
        }
    }
}

impl FluidConfig {
    /// Set the viewport range.
    pub fn with_viewports(mut self, min_viewport: f64, max_viewport: f64) -> Self {
        self.min_viewport = min_viewport;
        self.max_viewport = max_viewport;
        self
    }

    /// Set the rendered precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

// ---------------------------------------------------------------------------
// FluidSize
// ---------------------------------------------------------------------------

/// A size interpolated linearly across a viewport range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FluidSize {
    pub min_size: f64,
    pub max_size: f64,
    pub min_viewport: f64,
    pub max_viewport: f64,
    /// Size change per px of viewport width.
    pub slope: f64,
    /// Size at a zero-width viewport.
    pub intercept: f64,
}

impl FluidSize {
    /// The size at `viewport`, clamped to `[min_size, max_size]`.
    ///
    /// The range ends return the configured sizes exactly.
    pub fn value_at(&self, viewport: f64) -> f64 {
        if viewport <= self.min_viewport {
            self.min_size
        } else if viewport >= self.max_viewport {
            self.max_size
        } else {
            self.min_size + self.slope * (viewport - self.min_viewport)
        }
    }

    /// Render as `clamp(min, intercept + slope·100vw, max)`.
    pub fn to_css(&self, precision: usize) -> String {
        let n = |v: f64| format_number(v, precision);
        format!(
            "clamp({}px, {}px + {}vw, {}px)",
            n(self.min_size),
            n(self.intercept),
            n(self.slope * 100.0),
            n(self.max_size)
        )
    }
}

/// Format with at most `precision` decimals, trimming trailing zeros.
fn format_number(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    match text {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Interpolate between `min_size` at `min_viewport` and `max_size` at
/// `max_viewport`.
pub fn generate_fluid_size(
    min_size: f64,
    max_size: f64,
    min_viewport: f64,
    max_viewport: f64,
) -> Result<FluidSize, FluidError> {
    let all = [min_size, max_size, min_viewport, max_viewport];
    if all.iter().any(|v| !v.is_finite()) {
        return Err(invalid("sizes and viewports must be finite"));
    }
    if min_viewport >= max_viewport {
        return Err(invalid(format!(
            "min viewport {min_viewport} must be below max viewport {max_viewport}"
        )));
    }
    if min_viewport < 0.0 || min_size < 0.0 {
        return Err(invalid("sizes and viewports must not be negative"));
    }
    if min_size > max_size {
        return Err(invalid(format!(
            "min size {min_size} exceeds max size {max_size}"
        )));
    }

    let slope = (max_size - min_size) / (max_viewport - min_viewport);
    let intercept = min_size - slope * min_viewport;
    trace!(min_size, max_size, slope, intercept, "generated fluid size");
    Ok(FluidSize {
        min_size,
        max_size,
        min_viewport,
        max_viewport,
        slope,
        intercept,
    })
}

/// [`generate_fluid_size`] with the viewports from `config`.
pub fn fluid_size_with(min_size: f64, max_size: f64, config: &FluidConfig) -> Result<FluidSize, FluidError> {
    generate_fluid_size(min_size, max_size, config.min_viewport, config.max_viewport)
}

// ---------------------------------------------------------------------------
// Scales
// ---------------------------------------------------------------------------

/// A named scale of fluid sizes, in step order.
pub type FluidScale = IndexMap<String, FluidSize>;

fn scale_from(
    steps: &[(&str, f64)],
    base_min: f64,
    base_max: f64,
    custom: &IndexMap<String, (f64, f64)>,
    config: &FluidConfig,
) -> Result<FluidScale, FluidError> {
    let mut scale = FluidScale::new();
    for (name, multiplier) in steps {
        let (min, max) = custom
            .get(*name)
            .copied()
            .unwrap_or((base_min * multiplier, base_max * multiplier));
        scale.insert((*name).to_string(), fluid_size_with(min, max, config)?);
    }
    for (name, (min, max)) in custom {
        if !scale.contains_key(name) {
            scale.insert(name.clone(), fluid_size_with(*min, *max, config)?);
        }
    }
    Ok(scale)
}

/// Fluid font sizes for `xs` through `6xl`, scaled from a base size that grows
/// from `base_min` to `base_max`.
///
/// Entries in `custom` replace the computed `(min, max)` pair for their key;
/// keys outside the standard steps are appended.
pub fn generate_fluid_typography_scale(
    base_min: f64,
    base_max: f64,
    custom: &IndexMap<String, (f64, f64)>,
    config: &FluidConfig,
) -> Result<FluidScale, FluidError> {
    scale_from(TYPE_SCALE, base_min, base_max, custom, config)
}

/// Fluid spacing for `xs` through `3xl`, scaled from a base unit that grows
/// from `base_min` to `base_max`.
pub fn generate_fluid_spacing_scale(
    base_min: f64,
    base_max: f64,
    config: &FluidConfig,
) -> Result<FluidScale, FluidError> {
    scale_from(SPACE_SCALE, base_min, base_max, &IndexMap::new(), config)
}

/// Render every entry of a scale as CSS.
pub fn scale_to_css(scale: &FluidScale, precision: usize) -> IndexMap<String, String> {
    scale
        .iter()
        .map(|(name, size)| (name.clone(), size.to_css(precision)))
        .collect()
}
