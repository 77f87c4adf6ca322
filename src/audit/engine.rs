//! Running the battery, and derivations over audit results.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::audit::issue::{AuditResult, Category};
use crate::audit::rules::{AuditContext, Outcome, Rule, DEFAULT_RULES};
use crate::config::EngineConfig;
use crate::contrast::WcagLevel;
use crate::tokens::{resolve_theme, ResolveError, ResolvedTheme, Theme};

/// Run `rules` in order against `context`.
///
/// Rules above the context's level are not run. Skipped checks are logged and
/// excluded from every count.
pub fn run_rules(rules: &[Rule], context: &AuditContext<'_>) -> AuditResult {
    debug!(level = %context.level, rules = rules.len(), "audit started");
    let mut issues = Vec::new();
    let mut checks: IndexMap<Category, usize> = IndexMap::new();

    for rule in rules.iter().filter(|r| r.applies_to(context.level)) {
        for outcome in rule.run(context) {
            match outcome {
                Outcome::Pass => *checks.entry(rule.category).or_insert(0) += 1,
                Outcome::Fail(issue) => {
                    *checks.entry(rule.category).or_insert(0) += 1;
                    issues.push(issue);
                }
                Outcome::Skip(reason) => trace!(rule = rule.id, %reason, "check skipped"),
            }
        }
    }

    let result = AuditResult::new(context.level, issues, checks);
    debug!(
        passed = result.passed,
        total = result.summary.total_checks,
        errors = result.summary.failed,
        warnings = result.summary.warnings,
        "audit finished"
    );
    result
}

/// Audit an already-resolved theme with the default battery.
pub fn audit_resolved(theme: &ResolvedTheme, level: WcagLevel, config: &EngineConfig) -> AuditResult {
    run_rules(DEFAULT_RULES, &AuditContext::new(theme, level, config))
}

/// Resolve `theme` and audit it with the default config.
pub fn audit_theme(theme: &Theme, level: WcagLevel) -> Result<AuditResult, ResolveError> {
    audit_theme_with(theme, level, &EngineConfig::default())
}

/// Resolve `theme` and audit it with `config`.
pub fn audit_theme_with(
    theme: &Theme,
    level: WcagLevel,
    config: &EngineConfig,
) -> Result<AuditResult, ResolveError> {
    let resolved = resolve_theme(theme)?;
    Ok(audit_resolved(&resolved, level, config))
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

/// A 0-100 score: each error costs a full check, each warning half a check.
/// An audit that ran no checks scores 100.
pub fn accessibility_score(result: &AuditResult) -> u8 {
    let total = result.summary.total_checks as f64;
    if total == 0.0 {
        return 100;
    }
    let lost = result.summary.failed as f64 + 0.5 * result.summary.warnings as f64;
    (100.0 * (total - lost) / total).round().clamp(0.0, 100.0) as u8
}

/// `true` if the audit passed and was run at `level` or stricter.
///
/// This inspects a finished result and never re-audits; an AA result is not
/// accessible at AAA even if it has no issues.
pub fn is_accessible(result: &AuditResult, level: WcagLevel) -> bool {
    result.passed && result.level >= level
}

/// Which of two audited themes is more accessible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Preferred {
    First,
    Second,
    Tie,
}

/// Side-by-side comparison of two audit results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityComparison {
    pub first_score: u8,
    pub second_score: u8,
    /// `second_score - first_score`.
    pub difference: i16,
    pub first_errors: usize,
    pub second_errors: usize,
    pub preferred: Preferred,
}

/// Compare two results by score, then by error count.
pub fn compare_accessibility(first: &AuditResult, second: &AuditResult) -> AccessibilityComparison {
    let first_score = accessibility_score(first);
    let second_score = accessibility_score(second);
    let preferred = match first_score
        .cmp(&second_score)
        .then(second.summary.failed.cmp(&first.summary.failed))
    {
        Ordering::Greater => Preferred::First,
        Ordering::Less => Preferred::Second,
        Ordering::Equal => Preferred::Tie,
    };
    AccessibilityComparison {
        first_score,
        second_score,
        difference: i16::from(second_score) - i16::from(first_score),
        first_errors: first.summary.failed,
        second_errors: second.summary.failed,
        preferred,
    }
}

/// One theme of a batch audit.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// `meta.name`, or `theme-<index>` when unnamed.
    pub name: String,
    pub result: Result<AuditResult, ResolveError>,
}

impl BatchEntry {
    /// Score of a successful audit.
    pub fn score(&self) -> Option<u8> {
        self.result.as_ref().ok().map(accessibility_score)
    }
}

/// Audit each theme once, in input order. A theme that fails to resolve does
/// not stop the batch.
pub fn batch_audit(themes: &[&Theme], level: WcagLevel, config: &EngineConfig) -> Vec<BatchEntry> {
    themes
        .iter()
        .enumerate()
        .map(|(i, theme)| BatchEntry {
            name: theme.name().unwrap_or_else(|| format!("theme-{i}")),
            result: audit_theme_with(theme, level, config),
        })
        .collect()
}
