//! The engine facade: configuration plus two explicitly owned LRU caches.
//!
//! Resolved themes are cached by theme fingerprint, audit results by
//! fingerprint and level. Each `TokenEngine` owns its caches, so independent
//! engines never share state. The engine is not `Sync`-safe by contract;
//! hosts that share one across threads must serialize access.

use tracing::{debug, trace};

use crate::audit::{
    accessibility_score, audit_resolved, compare_accessibility, AccessibilityComparison,
    AccessibilityReport, AuditResult, BatchEntry,
};
use crate::cache::LruCache;
use crate::config::EngineConfig;
use crate::contrast::WcagLevel;
use crate::error::Result;
use crate::fluid::{self, FluidScale, FluidSize};
use crate::tokens::{resolve_component, ComponentTokens, ResolveError, ResolvedTheme, Theme};

/// Token resolution, audits and fluid scales with per-engine caching.
#[derive(Debug)]
pub struct TokenEngine {
    config: EngineConfig,
    resolved: LruCache<u64, ResolvedTheme>,
    audits: LruCache<(u64, WcagLevel), AuditResult>,
}

impl Default for TokenEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl TokenEngine {
    /// Create an engine. Both caches hold `config.cache_capacity` entries.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            resolved: LruCache::new(config.cache_capacity),
            audits: LruCache::new(config.cache_capacity),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -- resolution ----------------------------------------------------------

    /// Resolve `theme`, serving repeats from the cache.
    pub fn resolve(&mut self, theme: &Theme) -> Result<ResolvedTheme> {
        Ok(self.resolve_cached(theme)?)
    }

    fn resolve_cached(&mut self, theme: &Theme) -> std::result::Result<ResolvedTheme, ResolveError> {
        let key = theme.fingerprint();
        if let Some(hit) = self.resolved.get(&key) {
            return Ok(hit.clone());
        }
        let resolved = crate::tokens::resolve_theme(theme)?;
        trace!(fingerprint = key, "caching resolved theme");
        self.resolved.insert(key, resolved.clone());
        Ok(resolved)
    }

    /// Resolve the component table `components.<kind>` of `theme`.
    pub fn component(&mut self, theme: &Theme, kind: &str) -> Result<ComponentTokens> {
        let resolved = self.resolve_cached(theme)?;
        Ok(resolve_component(kind, resolved.as_theme())?)
    }

    // -- audits --------------------------------------------------------------

    /// Audit `theme` at the configured level.
    pub fn audit(&mut self, theme: &Theme) -> Result<AuditResult> {
        self.audit_at(theme, self.config.level)
    }

    /// Audit `theme` at `level`, serving repeats from the cache.
    pub fn audit_at(&mut self, theme: &Theme, level: WcagLevel) -> Result<AuditResult> {
        Ok(self.audit_cached(theme, level)?)
    }

    fn audit_cached(
        &mut self,
        theme: &Theme,
        level: WcagLevel,
    ) -> std::result::Result<AuditResult, ResolveError> {
        let key = (theme.fingerprint(), level);
        if let Some(hit) = self.audits.get(&key) {
            return Ok(hit.clone());
        }
        let resolved = self.resolve_cached(theme)?;
        let result = audit_resolved(&resolved, level, &self.config);
        self.audits.insert(key, result.clone());
        Ok(result)
    }

    /// Audit the dark-mode variant of `theme`, if it has one.
    pub fn audit_dark_mode(&mut self, theme: &Theme, level: WcagLevel) -> Option<Result<AuditResult>> {
        let dark = theme.dark_mode()?;
        Some(self.audit_at(&dark, level))
    }

    /// Audit `theme` at the configured level and render a report.
    pub fn report(&mut self, theme: &Theme) -> Result<AccessibilityReport> {
        let result = self.audit(theme)?;
        Ok(AccessibilityReport::from_result(
            &result,
            crate::audit::report::report_title(theme),
        ))
    }

    /// The 0-100 accessibility score at the configured level.
    pub fn score(&mut self, theme: &Theme) -> Result<u8> {
        Ok(accessibility_score(&self.audit(theme)?))
    }

    /// `true` if `theme` passes an audit at `level`, auditing it if needed.
    ///
    /// For an existing [`AuditResult`], use [`crate::audit::is_accessible`].
    pub fn passes(&mut self, theme: &Theme, level: WcagLevel) -> Result<bool> {
        Ok(self.audit_at(theme, level)?.passed)
    }

    /// Compare two themes at the configured level.
    pub fn compare(&mut self, first: &Theme, second: &Theme) -> Result<AccessibilityComparison> {
        let a = self.audit(first)?;
        let b = self.audit(second)?;
        Ok(compare_accessibility(&a, &b))
    }

    /// Audit each theme at the configured level. Identical themes in the batch
    /// are audited once.
    pub fn batch_audit(&mut self, themes: &[&Theme]) -> Vec<BatchEntry> {
        let level = self.config.level;
        debug!(themes = themes.len(), %level, "batch audit");
        themes
            .iter()
            .enumerate()
            .map(|(i, theme)| BatchEntry {
                name: theme.name().unwrap_or_else(|| format!("theme-{i}")),
                result: self.audit_cached(theme, level),
            })
            .collect()
    }

    // -- fluid scales --------------------------------------------------------

    /// A fluid size across the configured viewport range.
    pub fn fluid_size(&self, min_size: f64, max_size: f64) -> Result<FluidSize> {
        Ok(fluid::fluid_size_with(min_size, max_size, &self.config.fluid)?)
    }

    /// The fluid typography scale for a base size, without custom overrides.
    pub fn fluid_typography(&self, base_min: f64, base_max: f64) -> Result<FluidScale> {
        Ok(fluid::generate_fluid_typography_scale(
            base_min,
            base_max,
            &Default::default(),
            &self.config.fluid,
        )?)
    }

    /// Render a fluid size with the configured precision.
    pub fn fluid_css(&self, size: &FluidSize) -> String {
        size.to_css(self.config.fluid.precision)
    }

    // -- cache control -------------------------------------------------------

    /// Entries across both caches.
    pub fn cache_len(&self) -> usize {
        self.resolved.len() + self.audits.len()
    }

    /// Drop every cached entry.
    pub fn clear_cache(&mut self) {
        self.resolved.clear();
        self.audits.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn audits_are_cached_per_level() {
        let mut engine = TokenEngine::default();
        let theme = presets::tech();
        let first = engine.audit(&theme).unwrap();
        assert_eq!(engine.cache_len(), 2);

        let second = engine.audit(&theme).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.cache_len(), 2);

        engine.audit_at(&theme, WcagLevel::AAA).unwrap();
        assert_eq!(engine.cache_len(), 3);

        engine.clear_cache();
        assert_eq!(engine.cache_len(), 0);
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let mut engine = TokenEngine::new(EngineConfig::default().with_cache_capacity(0));
        engine.audit(&presets::tech()).unwrap();
        assert_eq!(engine.cache_len(), 0);
    }

    #[test]
    fn changed_theme_misses_the_cache() {
        let mut engine = TokenEngine::default();
        let theme = presets::tech();
        engine.resolve(&theme).unwrap();
        let edited = theme.clone().with("colors.primary", "#000000");
        let resolved = engine.resolve(&edited).unwrap();
        assert_eq!(resolved.color("primary"), Some("#000000"));
        assert_eq!(resolved.color("focus"), Some("#000000"));
    }

    #[test]
    fn presets_pass_aa() {
        let mut engine = TokenEngine::default();
        for name in presets::PRESET_NAMES {
            let theme = presets::preset(name).unwrap();
            let result = engine.audit(&theme).unwrap();
            assert!(result.passed, "{name}: {:?}", result.issues);
            assert_eq!(engine.score(&theme).unwrap(), 100, "{name}");
        }
    }

    #[test]
    fn tech_dark_mode_passes_aa() {
        let mut engine = TokenEngine::default();
        let result = engine
            .audit_dark_mode(&presets::tech(), WcagLevel::AA)
            .unwrap()
            .unwrap();
        assert!(result.passed, "{:?}", result.issues);
        assert!(engine.audit_dark_mode(&presets::minimal(), WcagLevel::AA).is_none());
    }

    #[test]
    fn minimal_meets_aaa() {
        let mut engine = TokenEngine::default();
        assert!(engine.passes(&presets::minimal(), WcagLevel::AAA).unwrap());
        assert!(!engine.passes(&presets::tech(), WcagLevel::AAA).unwrap());

        // An AA result says nothing about AAA until the theme is re-audited.
        let aa = engine.audit(&presets::minimal()).unwrap();
        assert!(!crate::audit::is_accessible(&aa, WcagLevel::AAA));
        assert!(engine.passes(&presets::minimal(), WcagLevel::AAA).unwrap());
    }

    #[test]
    fn batch_reuses_cached_audits() {
        let mut engine = TokenEngine::default();
        let tech = presets::tech();
        let dark = presets::dark();
        let entries = engine.batch_audit(&[&tech, &dark, &tech]);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Tech", "Dark", "Tech"]);
        // Two resolved themes and two audits.
        assert_eq!(engine.cache_len(), 4);
    }

    #[test]
    fn component_tables_resolve_through_the_cache() {
        let mut engine = TokenEngine::default();
        let button = engine.component(&presets::tech(), "button").unwrap();
        let bg = button.get("primary", "hover", "background").unwrap();
        assert_eq!(bg.literal(), Some("#1557b0"));
    }

    #[test]
    fn fluid_sizes_use_configured_viewports() {
        let engine = TokenEngine::default();
        let size = engine.fluid_size(16.0, 24.0).unwrap();
        assert_eq!(engine.fluid_css(&size), "clamp(16px, 13.3333px + 0.8333vw, 24px)");
        let scale = engine.fluid_typography(16.0, 18.0).unwrap();
        assert_eq!(scale["base"].max_size, 18.0);
        assert!(engine.fluid_size(24.0, 16.0).is_err());
    }
}
