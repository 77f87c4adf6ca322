//! Accessibility audits: an ordered battery of WCAG-derived checks over a
//! resolved theme, producing issues, counts and a report.
//!
//! Findings are data, not errors. Only failing to resolve the theme in the
//! first place is reported as an `Err`.

pub mod engine;
pub mod issue;
pub mod report;
pub mod rules;

pub use engine::{
    accessibility_score, audit_resolved, audit_theme, audit_theme_with, batch_audit,
    compare_accessibility, is_accessible, run_rules, AccessibilityComparison, BatchEntry,
    Preferred,
};
pub use issue::{AuditResult, AuditSummary, Category, Issue, Severity};
pub use report::{generate_accessibility_report, AccessibilityReport, ReportSection};
pub use rules::{AuditContext, Outcome, Rule, DEFAULT_RULES};
