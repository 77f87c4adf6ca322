//! The audit check battery.
//!
//! Each [`Rule`] is plain data: an id, a category, a severity, the lowest
//! audit level it runs at, a numeric limit, and an evaluator. An evaluator
//! returns one [`Outcome`] per check it considered. Checks whose inputs are
//! absent come back as [`Outcome::Skip`] and are not counted.

use std::fmt;

use crate::audit::issue::{Category, Issue, Severity};
use crate::color::parse_color;
use crate::config::EngineConfig;
use crate::contrast::{rgb_contrast_ratio, suggest_accessible_color, WcagLevel};
use crate::tokens::{ComponentTokens, Dimension, ResolvedTheme, TokenPath, TokenValue, Unit};

/// Foreground/background color roles checked as body text.
pub const TEXT_PAIRS: &[(&str, &str)] = &[
    ("text", "background"),
    ("text", "surface"),
    ("textSecondary", "background"),
    ("textSecondary", "surface"),
    ("onPrimary", "primary"),
    ("onSecondary", "secondary"),
    ("onError", "error"),
    ("onSuccess", "success"),
    ("onWarning", "warning"),
];

/// UI color roles that must stand out from the page background.
pub const UI_PAIRS: &[(&str, &str)] = &[("primary", "background"), ("focus", "background")];

/// Decorative boundaries; low contrast is only a warning.
pub const BORDER_PAIRS: &[(&str, &str)] = &[("border", "background")];

/// Where the base font size may live, in lookup order.
const BASE_FONT_SIZE: &[&str] = &[
    "typography.fontSize.base",
    "typography.fontSizes.base",
    "typography.baseFontSize",
    "typography.fontSize.md",
];

/// Where the body line height may live, in lookup order.
const BODY_LINE_HEIGHT: &[&str] = &[
    "typography.lineHeight.normal",
    "typography.lineHeight.base",
    "typography.lineHeight.body",
    "typography.lineHeights.normal",
    "typography.lineHeight",
];

/// States exempt from contrast requirements.
const EXEMPT_STATES: &[&str] = &["disabled"];

/// Evaluates one rule against a theme.
pub type Evaluate = fn(&Rule, &AuditContext<'_>) -> Vec<Outcome>;

/// The result of one check.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    Fail(Issue),
    /// The check did not apply; the reason is logged, not counted.
    Skip(String),
}

/// A data-described audit check.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub category: Category,
    pub severity: Severity,
    /// Lowest audit level the rule runs at.
    pub level: WcagLevel,
    /// Numeric threshold the evaluator compares against.
    pub limit: f64,
    pub criterion: Option<&'static str>,
    pub evaluate: Evaluate,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .field("level", &self.level)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl Rule {
    /// `true` if the rule runs in an audit at `level`.
    pub fn applies_to(&self, level: WcagLevel) -> bool {
        level >= self.level
    }

    /// An issue carrying this rule's category, severity and criterion.
    pub fn issue(&self, field: impl Into<String>, message: impl Into<String>) -> Issue {
        let issue = Issue::new(self.category, self.severity, field, message);
        match self.criterion {
            Some(criterion) => issue.with_criterion(criterion),
            None => issue,
        }
    }

    /// Run the evaluator.
    pub fn run(&self, context: &AuditContext<'_>) -> Vec<Outcome> {
        (self.evaluate)(self, context)
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct AuditContext<'a> {
    pub theme: &'a ResolvedTheme,
    pub level: WcagLevel,
    pub config: &'a EngineConfig,
}

impl<'a> AuditContext<'a> {
    pub fn new(theme: &'a ResolvedTheme, level: WcagLevel, config: &'a EngineConfig) -> Self {
        Self {
            theme,
            level,
            config,
        }
    }

    /// A value converted to px, if it is an absolute length.
    fn px(&self, value: &TokenValue) -> Option<f64> {
        Dimension::from_token(value)?.to_px(self.config.root_font_size)
    }

    /// The first of `paths` present in the theme.
    fn first_of(&self, paths: &[&'static str]) -> Option<(&'static str, &'a TokenValue)> {
        paths
            .iter()
            .find_map(|path| self.theme.get(path).map(|value| (*path, value)))
    }

    /// Resolved component tables, by kind.
    fn components(&self) -> Vec<(&'a str, ComponentTokens)> {
        self.theme
            .section("components")
            .map(|components| {
                components
                    .iter()
                    .filter_map(|(kind, table)| {
                        table
                            .as_group()
                            .map(|t| (kind.as_str(), ComponentTokens::from_resolved(t)))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// The default battery, in execution order.
pub static DEFAULT_RULES: &[Rule] = &[
    Rule {
        id: "required-color-roles",
        category: Category::ColorRoles,
        severity: Severity::Error,
        level: WcagLevel::AA,
        limit: 0.0,
        criterion: None,
        evaluate: required_roles,
    },
    Rule {
        id: "recommended-color-roles",
        category: Category::ColorRoles,
        severity: Severity::Warning,
        level: WcagLevel::AA,
        limit: 0.0,
        criterion: None,
        evaluate: recommended_roles,
    },
    Rule {
        id: "color-format",
        category: Category::ColorFormat,
        severity: Severity::Error,
        level: WcagLevel::AA,
        limit: 0.0,
        criterion: None,
        evaluate: color_format,
    },
    Rule {
        id: "text-contrast",
        category: Category::TextContrast,
        severity: Severity::Error,
        level: WcagLevel::AA,
        limit: 4.5,
        criterion: Some("1.4.3"),
        evaluate: text_contrast,
    },
    Rule {
        id: "text-contrast-enhanced",
        category: Category::TextContrast,
        severity: Severity::Error,
        level: WcagLevel::AAA,
        limit: 7.0,
        criterion: Some("1.4.6"),
        evaluate: text_contrast,
    },
    Rule {
        id: "ui-component-contrast",
        category: Category::NonTextContrast,
        severity: Severity::Error,
        level: WcagLevel::AA,
        limit: 3.0,
        criterion: Some("1.4.11"),
        evaluate: ui_contrast,
    },
    Rule {
        id: "border-contrast",
        category: Category::NonTextContrast,
        severity: Severity::Warning,
        level: WcagLevel::AA,
        limit: 3.0,
        criterion: Some("1.4.11"),
        evaluate: border_contrast,
    },
    Rule {
        id: "state-contrast",
        category: Category::InteractiveStates,
        severity: Severity::Error,
        level: WcagLevel::AA,
        limit: 4.5,
        criterion: Some("1.4.3"),
        evaluate: state_contrast,
    },
    Rule {
        id: "state-contrast-enhanced",
        category: Category::InteractiveStates,
        severity: Severity::Error,
        level: WcagLevel::AAA,
        limit: 7.0,
        criterion: Some("1.4.6"),
        evaluate: state_contrast,
    },
    Rule {
        id: "target-size-minimum",
        category: Category::TouchTargets,
        severity: Severity::Error,
        level: WcagLevel::AA,
        limit: 24.0,
        criterion: Some("2.5.8"),
        evaluate: target_size,
    },
    Rule {
        id: "target-size-enhanced",
        category: Category::TouchTargets,
        severity: Severity::Error,
        level: WcagLevel::AAA,
        limit: 44.0,
        criterion: Some("2.5.5"),
        evaluate: target_size,
    },
    Rule {
        id: "font-size-minimum",
        category: Category::Typography,
        severity: Severity::Error,
        level: WcagLevel::AA,
        limit: 12.0,
        criterion: Some("1.4.4"),
        evaluate: base_font_size,
    },
    Rule {
        id: "font-size-recommended",
        category: Category::Typography,
        severity: Severity::Warning,
        level: WcagLevel::AA,
        limit: 16.0,
        criterion: None,
        evaluate: base_font_size,
    },
    Rule {
        id: "line-height",
        category: Category::Typography,
        severity: Severity::Warning,
        level: WcagLevel::AA,
        limit: 1.5,
        criterion: Some("1.4.12"),
        evaluate: line_height,
    },
    Rule {
        id: "spacing-scale",
        category: Category::Spacing,
        severity: Severity::Warning,
        level: WcagLevel::AA,
        limit: 0.0,
        criterion: None,
        evaluate: spacing_scale,
    },
];

/// Look up a rule of the default battery by id.
pub fn rule(id: &str) -> Option<&'static Rule> {
    DEFAULT_RULES.iter().find(|r| r.id == id)
}

// ---------------------------------------------------------------------------
// Color roles and formats
// ---------------------------------------------------------------------------

fn role_presence(rule: &Rule, context: &AuditContext<'_>, names: &[String]) -> Vec<Outcome> {
    names
        .iter()
        .map(|name| {
            let field = format!("colors.{name}");
            if context.theme.get(&field).is_some() {
                Outcome::Pass
            } else {
                Outcome::Fail(
                    rule.issue(&field, format!("color role '{name}' is not defined"))
                        .with_recommendation(format!("define {field}")),
                )
            }
        })
        .collect()
}

fn required_roles(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    role_presence(rule, context, &context.config.required_colors)
}

fn recommended_roles(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    role_presence(rule, context, &context.config.recommended_colors)
}

fn color_format(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    let Some(colors) = context.theme.get("colors") else {
        return Vec::new();
    };
    colors
        .leaves(&TokenPath::new(["colors"]))
        .into_iter()
        .map(|(path, value)| match value {
            TokenValue::Literal(text) if parse_color(text).is_ok() => Outcome::Pass,
            other => Outcome::Fail(
                rule.issue(path.to_string(), format!("'{other}' is not a valid color"))
                    .with_current_value(other.to_string())
                    .with_recommendation("use #RRGGBB, #RGB, rgb() or hsl()"),
            ),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Contrast
// ---------------------------------------------------------------------------

/// Compare two resolved colors against `rule.limit`.
fn contrast_check(
    rule: &Rule,
    foreground: (&str, Option<&str>),
    background: (&str, Option<&str>),
) -> Outcome {
    let ((fg_field, Some(fg)), (bg_field, Some(bg))) = (foreground, background) else {
        return Outcome::Skip(format!("{} or {} is not defined", foreground.0, background.0));
    };
    let (Ok(fg_rgb), Ok(bg_rgb)) = (parse_color(fg), parse_color(bg)) else {
        return Outcome::Skip(format!("{fg_field} or {bg_field} is not a color"));
    };

    let ratio = rgb_contrast_ratio(fg_rgb, bg_rgb);
    if ratio >= rule.limit {
        return Outcome::Pass;
    }
    let mut issue = rule
        .issue(
            fg_field,
            format!(
                "{fg_field} on {bg_field} has contrast {ratio:.2}:1, below the {}:1 {} minimum",
                rule.limit, rule.level
            ),
        )
        .with_current_value(format!("{ratio:.2}:1"));
    if let Ok(suggestion) = suggest_accessible_color(fg, bg, rule.limit) {
        issue = issue.with_recommendation(format!("use {suggestion} for {fg_field}"));
    }
    Outcome::Fail(issue)
}

fn color_pairs(rule: &Rule, context: &AuditContext<'_>, pairs: &[(&str, &str)]) -> Vec<Outcome> {
    pairs
        .iter()
        .map(|(fg, bg)| {
            let fg_field = format!("colors.{fg}");
            let bg_field = format!("colors.{bg}");
            contrast_check(
                rule,
                (&fg_field, context.theme.color(fg)),
                (&bg_field, context.theme.color(bg)),
            )
        })
        .collect()
}

fn text_contrast(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    color_pairs(rule, context, TEXT_PAIRS)
}

fn ui_contrast(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    color_pairs(rule, context, UI_PAIRS)
}

fn border_contrast(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    color_pairs(rule, context, BORDER_PAIRS)
}

fn state_field(kind: &str, variant: &str, state: &str) -> String {
    if state == crate::tokens::components::DEFAULT_STATE {
        format!("components.{kind}.{variant}")
    } else {
        format!("components.{kind}.{variant}.{state}")
    }
}

fn state_contrast(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    for (kind, tokens) in context.components() {
        for state in tokens.state_colors() {
            let field = state_field(kind, state.variant, state.state);
            if EXEMPT_STATES.contains(&state.state) {
                outcomes.push(Outcome::Skip(format!("{field} is exempt")));
                continue;
            }
            outcomes.push(contrast_check(
                rule,
                (&format!("{field}.text"), state.text),
                (&format!("{field}.background"), state.background),
            ));
        }
    }
    outcomes
}

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

fn target_size(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    for (kind, tokens) in context.components() {
        for token in &tokens.entries {
            if token.property != "minHeight" && token.property != "minWidth" {
                continue;
            }
            let field = format!(
                "{}.{}",
                state_field(kind, &token.variant, &token.state),
                token.property
            );
            let Some(px) = context.px(&token.value) else {
                outcomes.push(Outcome::Skip(format!("{field} is not an absolute length")));
                continue;
            };
            outcomes.push(if px >= rule.limit {
                Outcome::Pass
            } else {
                Outcome::Fail(
                    rule.issue(
                        &field,
                        format!("{field} is {px}px, below the {}px {} target size", rule.limit, rule.level),
                    )
                    .with_current_value(token.value.to_string())
                    .with_recommendation(format!("set {field} to at least {}px", rule.limit)),
                )
            });
        }
    }
    outcomes
}

fn base_font_size(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    let Some((field, value)) = context.first_of(BASE_FONT_SIZE) else {
        return vec![Outcome::Skip("no base font size".into())];
    };
    let Some(px) = context.px(value) else {
        return vec![Outcome::Skip(format!("{field} is not an absolute length"))];
    };
    if px >= rule.limit {
        return vec![Outcome::Pass];
    }
    vec![Outcome::Fail(
        rule.issue(
            field,
            format!("base font size {px}px is below {}px", rule.limit),
        )
        .with_current_value(value.to_string())
        .with_recommendation(format!("use a base font size of at least {}px", rule.limit)),
    )]
}

fn line_height(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    let Some((field, value)) = context.first_of(BODY_LINE_HEIGHT) else {
        return vec![Outcome::Skip("no body line height".into())];
    };
    let ratio = match Dimension::from_token(value) {
        Some(Dimension {
            value,
            unit: Unit::None,
        }) => value,
        Some(Dimension {
            value,
            unit: Unit::Percent,
        }) => value / 100.0,
        _ => return vec![Outcome::Skip(format!("{field} is not a unitless ratio"))],
    };
    if ratio >= rule.limit {
        return vec![Outcome::Pass];
    }
    vec![Outcome::Fail(
        rule.issue(
            field,
            format!("body line height {ratio} is below {}", rule.limit),
        )
        .with_current_value(value.to_string())
        .with_recommendation(format!("use a line height of at least {}", rule.limit)),
    )]
}

fn spacing_scale(rule: &Rule, context: &AuditContext<'_>) -> Vec<Outcome> {
    let steps: Vec<(String, f64)> = match context.theme.get("spacing.scale") {
        Some(TokenValue::List(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(i, v)| context.px(v).map(|px| (format!("spacing.scale.{i}"), px)))
            .collect(),
        _ => context
            .theme
            .section("spacing")
            .map(|spacing| {
                spacing
                    .iter()
                    .filter_map(|(key, v)| context.px(v).map(|px| (format!("spacing.{key}"), px)))
                    .collect()
            })
            .unwrap_or_default(),
    };
    if steps.len() < 2 {
        return vec![Outcome::Skip("spacing scale has fewer than two steps".into())];
    }

    let drop = steps
        .windows(2)
        .find(|pair| pair[1].1 < pair[0].1);
    match drop {
        None => vec![Outcome::Pass],
        Some(pair) => {
            let (prev_field, prev) = &pair[0];
            let (field, px) = &pair[1];
            vec![Outcome::Fail(
                rule.issue(
                    field.as_str(),
                    format!("spacing scale decreases at {field} ({px}px after {prev}px at {prev_field})"),
                )
                .with_current_value(format!("{px}px"))
                .with_recommendation("order spacing steps from smallest to largest"),
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{resolve_theme, Theme};
    use serde_json::json;

    fn resolved(value: serde_json::Value) -> ResolvedTheme {
        resolve_theme(&Theme::from_value(value).unwrap()).unwrap()
    }

    fn run(id: &str, theme: &ResolvedTheme, level: WcagLevel) -> Vec<Outcome> {
        let config = EngineConfig::default();
        let context = AuditContext::new(theme, level, &config);
        rule(id).unwrap().run(&context)
    }

    fn fails(outcomes: &[Outcome]) -> Vec<&Issue> {
        outcomes
            .iter()
            .filter_map(|o| match o {
                Outcome::Fail(issue) => Some(issue),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn battery_ids_are_unique() {
        let mut ids: Vec<&str> = DEFAULT_RULES.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), DEFAULT_RULES.len());
    }

    #[test]
    fn aaa_rules_only_apply_at_aaa() {
        let enhanced = rule("text-contrast-enhanced").unwrap();
        assert!(!enhanced.applies_to(WcagLevel::AA));
        assert!(enhanced.applies_to(WcagLevel::AAA));
        assert!(rule("text-contrast").unwrap().applies_to(WcagLevel::AAA));
    }

    #[test]
    fn missing_roles_fail() {
        let theme = resolved(json!({"colors": {"primary": "#1a73e8"}}));
        let outcomes = run("required-color-roles", &theme, WcagLevel::AA);
        let issues = fails(&outcomes);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field(), "colors.background");
        assert_eq!(issues[0].severity(), Severity::Error);
    }

    #[test]
    fn invalid_color_literal_fails() {
        let theme = resolved(json!({"colors": {"primary": "#1a73e8", "text": "blue-ish", "n": 3}}));
        let outcomes = run("color-format", &theme, WcagLevel::AA);
        let issues = fails(&outcomes);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field(), "colors.text");
        assert_eq!(issues[0].current_value(), Some("blue-ish"));
    }

    #[test]
    fn contrast_pairs_skip_missing_roles() {
        let theme = resolved(json!({"colors": {"text": "#767676", "background": "#ffffff"}}));
        let outcomes = run("text-contrast", &theme, WcagLevel::AA);
        assert_eq!(outcomes.len(), TEXT_PAIRS.len());
        assert_eq!(outcomes[0], Outcome::Pass);
        assert!(outcomes[1..].iter().all(|o| matches!(o, Outcome::Skip(_))));
    }

    #[test]
    fn enhanced_contrast_reports_ratio_and_fix() {
        let theme = resolved(json!({"colors": {"text": "#767676", "background": "#ffffff"}}));
        let outcomes = run("text-contrast-enhanced", &theme, WcagLevel::AAA);
        let issues = fails(&outcomes);
        assert_eq!(issues.len(), 1);
        let issue = issues[0];
        assert_eq!(issue.field(), "colors.text");
        assert_eq!(issue.current_value(), Some("4.54:1"));
        assert_eq!(issue.standard_criterion(), Some("1.4.6"));
        assert_eq!(
            issue.message(),
            "colors.text on colors.background has contrast 4.54:1, below the 7:1 AAA minimum"
        );
        assert!(issue.recommendation().unwrap().starts_with("use #"));
    }

    #[test]
    fn states_inherit_and_disabled_is_exempt() {
        let theme = resolved(json!({
            "colors": {"primary": "#1a73e8", "onPrimary": "#ffffff"},
            "components": {"button": {"primary": {
                "background": "colors.primary",
                "text": "colors.onPrimary",
                "hover": {"background": "#1557b0"},
                "disabled": {"background": "#e0e0e0", "text": "#9e9e9e"}
            }}}
        }));
        let outcomes = run("state-contrast", &theme, WcagLevel::AA);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0], Outcome::Pass);
        assert_eq!(outcomes[1], Outcome::Pass);
        assert!(matches!(outcomes[2], Outcome::Skip(_)));

        let strict = run("state-contrast-enhanced", &theme, WcagLevel::AAA);
        let issues = fails(&strict);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field(), "components.button.primary.text");
        assert_eq!(issues[1].field(), "components.button.primary.hover.text");
    }

    #[test]
    fn touch_targets_convert_units() {
        let theme = resolved(json!({
            "components": {"button": {
                "small": {"minHeight": "20px"},
                "medium": {"minHeight": "2rem", "minWidth": "auto"},
                "large": {"minHeight": "48px"}
            }}
        }));
        let aa = run("target-size-minimum", &theme, WcagLevel::AA);
        assert_eq!(aa.len(), 4);
        let issues = fails(&aa);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field(), "components.button.small.minHeight");

        let aaa = run("target-size-enhanced", &theme, WcagLevel::AAA);
        assert_eq!(fails(&aaa).len(), 2);
    }

    #[test]
    fn font_size_thresholds() {
        let small = resolved(json!({"typography": {"fontSize": {"base": "14px"}}}));
        assert_eq!(run("font-size-minimum", &small, WcagLevel::AA), vec![Outcome::Pass]);
        let warning = run("font-size-recommended", &small, WcagLevel::AA);
        assert_eq!(fails(&warning)[0].severity(), Severity::Warning);

        let tiny = resolved(json!({"typography": {"fontSize": {"base": "0.625rem"}}}));
        let error = run("font-size-minimum", &tiny, WcagLevel::AA);
        assert_eq!(fails(&error)[0].field(), "typography.fontSize.base");

        let absent = resolved(json!({"typography": {}}));
        assert!(matches!(
            run("font-size-minimum", &absent, WcagLevel::AA)[0],
            Outcome::Skip(_)
        ));
    }

    #[test]
    fn line_height_accepts_numbers_and_percentages() {
        let tight = resolved(json!({"typography": {"lineHeight": {"normal": 1.2}}}));
        assert_eq!(fails(&run("line-height", &tight, WcagLevel::AA)).len(), 1);

        let loose = resolved(json!({"typography": {"lineHeight": "160%"}}));
        assert_eq!(run("line-height", &loose, WcagLevel::AA), vec![Outcome::Pass]);
    }

    #[test]
    fn spacing_scale_must_grow() {
        let ok = resolved(json!({"spacing": {"xs": "4px", "sm": "8px", "md": "1rem"}}));
        assert_eq!(run("spacing-scale", &ok, WcagLevel::AA), vec![Outcome::Pass]);

        let bad = resolved(json!({"spacing": {"scale": [0, 8, 4, 16]}}));
        let outcomes = run("spacing-scale", &bad, WcagLevel::AA);
        let issues = fails(&outcomes);
        assert_eq!(issues[0].field(), "spacing.scale.2");
    }
}
