//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::contrast::WcagLevel;
use crate::fluid::FluidConfig;

/// Configuration shared by the audit engine and [`crate::engine::TokenEngine`].
///
/// Every field has a default, so a host can deserialize a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// WCAG level used when a caller does not name one.
    pub level: WcagLevel,
    /// Entries per LRU cache. 0 disables caching.
    pub cache_capacity: usize,
    /// Viewport range and precision for fluid scales.
    pub fluid: FluidConfig,
    /// Pixels per `rem`/`em` when checking sizes.
    pub root_font_size: f64,
    /// Color roles whose absence is an error.
    pub required_colors: Vec<String>,
    /// Color roles whose absence is a warning.
    pub recommended_colors: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            level: WcagLevel::AA,
            cache_capacity: 32,
            fluid: FluidConfig::default(),
            root_font_size: 16.0,
            required_colors: strings(&["primary", "background", "text"]),
            recommended_colors: strings(&["secondary", "surface", "error", "success", "warning"]),
        }
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl EngineConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the default WCAG level (builder).
    pub fn with_level(mut self, level: WcagLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the cache capacity (builder).
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set the fluid-scale config (builder).
    pub fn with_fluid(mut self, fluid: FluidConfig) -> Self {
        self.fluid = fluid;
        self
    }

    /// Set the root font size in px (builder).
    pub fn with_root_font_size(mut self, px: f64) -> Self {
        self.root_font_size = px;
        self
    }

    /// Set the required color roles (builder).
    pub fn with_required_colors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_colors = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the recommended color roles (builder).
    pub fn with_recommended_colors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommended_colors = names.into_iter().map(Into::into).collect();
        self
    }
}
