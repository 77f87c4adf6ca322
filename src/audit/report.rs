//! Presentation of audit findings for downstream formatters.

use std::fmt;

use serde::Serialize;

use crate::audit::engine::{accessibility_score, audit_theme_with};
use crate::audit::issue::{AuditResult, Category, Issue};
use crate::config::EngineConfig;
use crate::contrast::WcagLevel;
use crate::tokens::{ResolveError, Theme};

/// Issues of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub category: Category,
    pub title: String,
    /// Checks executed in this category.
    pub checks: usize,
    pub issues: Vec<Issue>,
}

/// A rendered audit: one section per category that ran at least one check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    pub title: String,
    pub summary: String,
    pub score: u8,
    pub level: WcagLevel,
    pub passed: bool,
    pub sections: Vec<ReportSection>,
}

impl AccessibilityReport {
    /// Build a report from an existing result without re-running checks.
    pub fn from_result(result: &AuditResult, title: impl Into<String>) -> Self {
        let sections = result
            .checks_by_category
            .iter()
            .map(|(category, checks)| ReportSection {
                category: *category,
                title: category.title().to_string(),
                checks: *checks,
                issues: result.issues_in(*category).cloned().collect(),
            })
            .collect();
        let s = &result.summary;
        Self {
            title: title.into(),
            summary: format!(
                "{} of {} checks passed ({}%), {} {}, {} {}",
                s.passed,
                s.total_checks,
                result.pass_rate,
                s.failed,
                plural(s.failed, "error"),
                s.warnings,
                plural(s.warnings, "warning"),
            ),
            score: accessibility_score(result),
            level: result.level,
            passed: result.passed,
            sections,
        }
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

impl fmt::Display for AccessibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(
            f,
            "Level {}: {}, score {}/100",
            self.level,
            if self.passed { "PASSED" } else { "FAILED" },
            self.score
        )?;
        writeln!(f, "{}", self.summary)?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(
                f,
                "{} ({} {})",
                section.title,
                section.checks,
                plural(section.checks, "check")
            )?;
            if section.issues.is_empty() {
                writeln!(f, "  all checks passed")?;
            }
            for issue in &section.issues {
                writeln!(f, "  [{}] {}: {}", issue.severity(), issue.field(), issue.message())?;
                if let Some(fix) = issue.recommendation() {
                    writeln!(f, "    fix: {fix}")?;
                }
            }
        }
        Ok(())
    }
}

/// Audit `theme` and render the findings.
pub fn generate_accessibility_report(
    theme: &Theme,
    level: WcagLevel,
    config: &EngineConfig,
) -> Result<AccessibilityReport, ResolveError> {
    let result = audit_theme_with(theme, level, config)?;
    Ok(AccessibilityReport::from_result(&result, report_title(theme)))
}

/// `Accessibility report: <meta.name>`, or without the name when unset.
pub(crate) fn report_title(theme: &Theme) -> String {
    match theme.name() {
        Some(name) => format!("Accessibility report: {name}"),
        None => "Accessibility report".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn theme() -> Theme {
        Theme::from_value(json!({
            "meta": {"name": "Gray"},
            "colors": {
                "primary": "#1a73e8",
                "secondary": "#34a853",
                "background": "#ffffff",
                "surface": "#ffffff",
                "text": "#767676",
                "error": "#d93025",
                "success": "#188038",
                "warning": "#fbbc04"
            }
        }))
        .unwrap()
    }

    #[test]
    fn sections_follow_categories() {
        let report =
            generate_accessibility_report(&theme(), WcagLevel::AAA, &EngineConfig::default())
                .unwrap();
        assert_eq!(report.title, "Accessibility report: Gray");
        assert!(!report.passed);
        let titles: Vec<&str> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Color roles", "Color format", "Text contrast", "Non-text contrast"]
        );
        let text = &report.sections[2];
        assert_eq!(text.checks, 4);
        assert_eq!(text.issues.len(), 2);
    }

    #[test]
    fn renders_plain_text() {
        let report =
            generate_accessibility_report(&theme(), WcagLevel::AA, &EngineConfig::default())
                .unwrap();
        insta::assert_snapshot!(report.to_string().trim_end(), @r"
        Accessibility report: Gray
        Level AA: PASSED, score 100/100
        19 of 19 checks passed (100%), 0 errors, 0 warnings

        Color roles (8 checks)
          all checks passed

        Color format (8 checks)
          all checks passed

        Text contrast (2 checks)
          all checks passed

        Non-text contrast (1 check)
          all checks passed
        ");
    }

    #[test]
    fn summary_uses_singular_forms() {
        let theme = Theme::new()
            .with("colors.primary", "#1a73e8")
            .with("colors.background", "#ffffff");
        let report = generate_accessibility_report(
            &theme,
            WcagLevel::AA,
            &EngineConfig::default().with_recommended_colors(["surface"]),
        )
        .unwrap();
        assert_eq!(report.summary, "5 of 7 checks passed (71.43%), 1 error, 1 warning");
    }
}
