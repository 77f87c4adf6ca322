//! Integration tests for gilt-tokens.
//!
//! These tests exercise the public API from outside the crate, verifying that
//! resolution, audits, composition, fluid scales and caching work together.

use gilt_tokens::audit::{audit_theme, batch_audit, compare_accessibility, Preferred};
use gilt_tokens::cache::{memoize, LruCache};
use gilt_tokens::color::{darken, hex_to_rgb, lighten, mix};
use gilt_tokens::compose::{extend_theme, merge_themes, override_theme};
use gilt_tokens::contrast::{contrast_ratio, meets_wcag, suggest_accessible_color};
use gilt_tokens::fluid::{generate_fluid_size, generate_fluid_spacing_scale, FluidConfig};
use gilt_tokens::tokens::{resolve_theme, resolve_token};
use gilt_tokens::{
    presets, EngineConfig, Error, ResolveError, Severity, TextSize, Theme, TokenEngine, TokenValue,
    WcagLevel,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn theme(value: serde_json::Value) -> Theme {
    Theme::from_value(value).unwrap()
}

// ---------------------------------------------------------------------------
// Contrast
// ---------------------------------------------------------------------------

#[test]
fn test_gray_on_white_passes_aa_not_aaa() {
    let ratio = contrast_ratio("#767676", "#ffffff").unwrap();
    assert!((ratio - 4.54).abs() < 0.01, "ratio was {ratio}");
    assert!(meets_wcag(ratio, WcagLevel::AA, TextSize::Normal));
    assert!(!meets_wcag(ratio, WcagLevel::AAA, TextSize::Normal));
    assert!(meets_wcag(ratio, WcagLevel::AAA, TextSize::Large));
}

#[test]
fn test_black_on_white_is_maximal() {
    let ratio = contrast_ratio("#000000", "#ffffff").unwrap();
    assert!((ratio - 21.0).abs() < 1e-9);
}

#[test]
fn test_suggestion_reaches_target() {
    let suggested = suggest_accessible_color("#999999", "#ffffff", 4.5).unwrap();
    let ratio = contrast_ratio(&suggested, "#ffffff").unwrap();
    assert!(ratio >= 4.5, "{suggested} only reaches {ratio}");
    assert!(hex_to_rgb(&suggested).unwrap().r < 0x99);
}

#[test]
fn test_manipulations_compose() {
    assert_eq!(lighten("#000000", 100.0).unwrap(), "#ffffff");
    assert_eq!(darken("#ffffff", 100.0).unwrap(), "#000000");
    assert_eq!(mix("#000000", "#ffffff", 0.0).unwrap(), "#000000");
    assert!(lighten("blue", 10.0).is_err());
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[test]
fn test_reference_chain_resolves() {
    let theme = theme(json!({
        "colors": {"brand": "#1a73e8", "primary": "colors.brand", "focus": "colors.primary"}
    }));
    assert_eq!(
        resolve_token("colors.focus", &theme).unwrap(),
        TokenValue::Literal("#1a73e8".into())
    );
    assert_eq!(
        resolve_token("16px", &theme).unwrap(),
        TokenValue::Literal("16px".into())
    );
}

#[test]
fn test_cycle_is_detected() {
    let theme = theme(json!({"colors": {"a": "colors.b", "b": "colors.a"}}));
    let err = resolve_theme(&theme).unwrap_err();
    match &err {
        ResolveError::CyclicTokenReference { cycle } => {
            assert_eq!(cycle.first(), cycle.last());
            assert!(cycle.iter().any(|p| p == "colors.a"));
            assert!(cycle.iter().any(|p| p == "colors.b"));
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
    assert!(err.to_string().starts_with("cyclic token reference"));
}

#[test]
fn test_missing_reference_names_both_paths() {
    let theme = theme(json!({"colors": {"primary": "colors.missing"}}));
    let err = resolve_theme(&theme).unwrap_err();
    assert_eq!(
        err,
        ResolveError::TokenNotFound {
            field: "colors.primary".into(),
            path: "colors.missing".into(),
        }
    );
}

#[test]
fn test_resolution_leaves_source_untouched() {
    let source = presets::tech();
    let before = source.clone();
    let resolved = resolve_theme(&source).unwrap();
    assert_eq!(source, before);
    assert_eq!(resolved.color("focus"), Some("#1a73e8"));
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

#[test]
fn test_merge_overlays_nested_values() {
    let base = theme(json!({
        "colors": {"primary": "#1a73e8", "text": "#202124"},
        "spacing": {"md": "16px"}
    }));
    let overlay = theme(json!({"colors": {"primary": "#000000"}}));
    let merged = merge_themes(&base, &[&overlay]);
    assert_eq!(
        merged.to_json().unwrap(),
        theme(json!({
            "colors": {"primary": "#000000", "text": "#202124"},
            "spacing": {"md": "16px"}
        }))
        .to_json()
        .unwrap()
    );
}

#[test]
fn test_later_overrides_win() {
    let base = theme(json!({"colors": {"primary": "#111111"}}));
    let first = theme(json!({"colors": {"primary": "#222222"}}));
    let second = theme(json!({"colors": {"primary": "#333333"}}));
    let merged = merge_themes(&base, &[&first, &second]);
    assert_eq!(
        merged.get_str("colors.primary"),
        Some(&TokenValue::Literal("#333333".into()))
    );
}

#[test]
fn test_override_rejects_unknown_paths() {
    let base = presets::minimal();
    let ok = override_theme(&base, &theme(json!({"colors": {"primary": "#222222"}}))).unwrap();
    assert_eq!(ok.name().as_deref(), Some("Minimal"));

    let err = override_theme(&base, &theme(json!({"colors": {"brand": "#222222"}}))).unwrap_err();
    assert_eq!(
        Error::from(err).to_string(),
        "override path 'colors.brand' does not exist in the base theme"
    );
}

#[test]
fn test_extend_keeps_base_name() {
    let extended = extend_theme(&presets::tech(), &theme(json!({"colors": {"primary": "#000000"}})));
    assert_eq!(extended.name().as_deref(), Some("Tech"));
}

// ---------------------------------------------------------------------------
// Audits
// ---------------------------------------------------------------------------

#[test]
fn test_gray_text_theme_passes_aa_fails_aaa() {
    let theme = theme(json!({
        "colors": {"primary": "#1a73e8", "background": "#ffffff", "text": "#767676"}
    }));
    let aa = audit_theme(&theme, WcagLevel::AA).unwrap();
    assert!(aa.passed);
    assert!(aa.errors().next().is_none());
    assert!(aa.warnings().all(|issue| issue.severity() == Severity::Warning));

    let aaa = audit_theme(&theme, WcagLevel::AAA).unwrap();
    assert!(!aaa.passed);
    let issue = aaa.errors().find(|i| i.field() == "colors.text").unwrap();
    assert_eq!(issue.current_value(), Some("4.54:1"));
    assert!(issue.recommendation().is_some());
}

#[test]
fn test_presets_audit() {
    assert!(audit_theme(&presets::tech(), WcagLevel::AA).unwrap().passed);
    assert!(audit_theme(&presets::minimal(), WcagLevel::AAA).unwrap().passed);
    assert!(audit_theme(&presets::minimal(), WcagLevel::AA).unwrap().passed);
    let dark = presets::tech().dark_mode().unwrap();
    assert!(audit_theme(&dark, WcagLevel::AA).unwrap().passed);
}

#[test]
fn test_comparison_prefers_fewer_problems() {
    let good = audit_theme(&presets::minimal(), WcagLevel::AA).unwrap();
    let bad = audit_theme(
        &theme(json!({"colors": {"primary": "#cccccc", "background": "#ffffff", "text": "#aaaaaa"}})),
        WcagLevel::AA,
    )
    .unwrap();
    let comparison = compare_accessibility(&good, &bad);
    assert_eq!(comparison.preferred, Preferred::First);
    assert!(comparison.difference < 0);
}

#[test]
fn test_batch_reports_failures_per_theme() {
    let broken = theme(json!({"colors": {"primary": "colors.nope"}}));
    let tech = presets::tech();
    let entries = batch_audit(&[&tech, &broken], WcagLevel::AA, &EngineConfig::default());
    assert_eq!(entries[0].name, "Tech");
    assert!(entries[0].result.is_ok());
    assert_eq!(entries[1].name, "theme-1");
    assert!(entries[1].result.is_err());
}

// ---------------------------------------------------------------------------
// Fluid scales
// ---------------------------------------------------------------------------

#[test]
fn test_fluid_boundaries_are_exact() {
    let size = generate_fluid_size(16.0, 24.0, 320.0, 1280.0).unwrap();
    assert_eq!(size.value_at(320.0), 16.0);
    assert_eq!(size.value_at(1280.0), 24.0);
    assert_eq!(size.value_at(100.0), 16.0);
    assert_eq!(size.value_at(4000.0), 24.0);
    assert!((size.value_at(800.0) - 20.0).abs() < 1e-9);
}

#[test]
fn test_fluid_rejects_inverted_viewports() {
    assert!(generate_fluid_size(16.0, 24.0, 1280.0, 320.0).is_err());
    assert!(generate_fluid_size(16.0, 24.0, 320.0, 320.0).is_err());
}

#[test]
fn test_spacing_scale_keeps_order() {
    let scale = generate_fluid_spacing_scale(16.0, 20.0, &FluidConfig::default()).unwrap();
    let keys: Vec<&str> = scale.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["xs", "sm", "md", "lg", "xl", "2xl", "3xl"]);
    assert_eq!(scale["md"].min_size, 16.0);
    assert_eq!(scale["md"].max_size, 20.0);
}

// ---------------------------------------------------------------------------
// Caching
// ---------------------------------------------------------------------------

#[test]
fn test_lru_evicts_least_recently_used() {
    let mut cache = LruCache::new(2);
    cache.insert("a", 1);
    cache.insert("b", 2);
    assert_eq!(cache.get(&"a"), Some(&1));
    let evicted = cache.insert("c", 3);
    assert_eq!(evicted, Some(("b", 2)));
    assert!(cache.contains(&"a"));
    assert!(cache.contains(&"c"));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_memoize_serves_repeats() {
    use std::cell::Cell;

    let calls = Cell::new(0);
    let ratio = memoize(
        |pair: &(String, String)| {
            calls.set(calls.get() + 1);
            contrast_ratio(&pair.0, &pair.1).unwrap_or(1.0)
        },
        4,
    );
    let pair = ("#767676".to_string(), "#ffffff".to_string());
    let first = ratio.call(&pair);
    let second = ratio.call(&pair);
    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);
    assert!(ratio.is_cached(&pair));
}

#[test]
fn test_engine_caches_and_reports() {
    let mut engine = TokenEngine::new(EngineConfig::default().with_cache_capacity(4));
    let theme = presets::tech();
    let report = engine.report(&theme).unwrap();
    assert_eq!(report.title, "Accessibility report: Tech");
    assert!(report.passed);
    assert_eq!(engine.cache_len(), 2);
    assert_eq!(engine.score(&theme).unwrap(), 100);
    assert_eq!(engine.cache_len(), 2);
}

#[test]
fn test_engine_logs_with_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let mut engine = TokenEngine::default();
        let entries = engine.batch_audit(&[&presets::dark()]);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].result.as_ref().unwrap().passed);
    });
}
