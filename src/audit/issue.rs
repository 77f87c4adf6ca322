//! Audit findings and results.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::contrast::WcagLevel;

/// How much an issue matters. Only errors fail an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// The group a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    ColorRoles,
    ColorFormat,
    TextContrast,
    NonTextContrast,
    InteractiveStates,
    TouchTargets,
    Typography,
    Spacing,
}

impl Category {
    /// Human-readable section title.
    pub fn title(self) -> &'static str {
        match self {
            Category::ColorRoles => "Color roles",
            Category::ColorFormat => "Color format",
            Category::TextContrast => "Text contrast",
            Category::NonTextContrast => "Non-text contrast",
            Category::InteractiveStates => "Interactive states",
            Category::TouchTargets => "Touch targets",
            Category::Typography => "Typography",
            Category::Spacing => "Spacing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ---------------------------------------------------------------------------
// Issue
// ---------------------------------------------------------------------------

/// One failed check. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    category: Category,
    severity: Severity,
    message: String,
    field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    standard_criterion: Option<String>,
}

impl Issue {
    pub fn new(
        category: Category,
        severity: Severity,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            message: message.into(),
            field: field.into(),
            current_value: None,
            recommendation: None,
            standard_criterion: None,
        }
    }

    /// Attach the offending value (builder).
    pub fn with_current_value(mut self, value: impl Into<String>) -> Self {
        self.current_value = Some(value.into());
        self
    }

    /// Attach a suggested fix (builder).
    pub fn with_recommendation(mut self, text: impl Into<String>) -> Self {
        self.recommendation = Some(text.into());
        self
    }

    /// Attach the WCAG success criterion, e.g. `"1.4.3"` (builder).
    pub fn with_criterion(mut self, criterion: impl Into<String>) -> Self {
        self.standard_criterion = Some(criterion.into());
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Dotted path of the token the issue is about.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn current_value(&self) -> Option<&str> {
        self.current_value.as_deref()
    }

    pub fn recommendation(&self) -> Option<&str> {
        self.recommendation.as_deref()
    }

    pub fn standard_criterion(&self) -> Option<&str> {
        self.standard_criterion.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ---------------------------------------------------------------------------
// AuditResult
// ---------------------------------------------------------------------------

/// Check counts of one audit. `passed + failed + warnings == total_checks`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub total_checks: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
}

/// The outcome of auditing one theme.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// `true` iff no issue is an error.
    pub passed: bool,
    pub level: WcagLevel,
    pub issues: Vec<Issue>,
    /// `summary.passed / summary.total_checks * 100`, rounded to two decimals.
    /// 100 when no check ran.
    pub pass_rate: f64,
    pub summary: AuditSummary,
    /// Executed checks per category, in battery order.
    pub checks_by_category: IndexMap<Category, usize>,
}

impl AuditResult {
    /// Assemble a result from executed-check counts and the issues raised.
    pub fn new(level: WcagLevel, issues: Vec<Issue>, checks_by_category: IndexMap<Category, usize>) -> Self {
        let total_checks: usize = checks_by_category.values().sum();
        let failed = issues.iter().filter(|i| i.is_error()).count();
        let warnings = issues.len() - failed;
        let passed = total_checks.saturating_sub(issues.len());
        let pass_rate = if total_checks == 0 {
            100.0
        } else {
            (passed as f64 / total_checks as f64 * 10_000.0).round() / 100.0
        };
        Self {
            passed: failed == 0,
            level,
            issues,
            pass_rate,
            summary: AuditSummary {
                total_checks,
                passed,
                failed,
                warnings,
            },
            checks_by_category,
        }
    }

    /// Error issues.
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_error())
    }

    /// Warning issues.
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| !i.is_error())
    }

    /// Issues in `category`.
    pub fn issues_in(&self, category: Category) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.category == category)
    }
}
