//! Built-in theme descriptions.
//!
//! Presets are ordinary themes. Nothing in the engine treats them specially.

use crate::tokens::{Theme, TokenValue};

/// Names accepted by [`preset`].
pub const PRESET_NAMES: &[&str] = &["tech", "minimal", "dark"];

/// Look up a preset by name.
///
/// Returns `None` if the name is not recognized.
pub fn preset(name: &str) -> Option<Theme> {
    Some(match name {
        "tech" => tech(),
        "minimal" => minimal(),
        "dark" => dark(),
        _ => return None,
    })
}

/// Sections shared by every preset: typography, spacing, radii, shadows,
/// z-index layers and breakpoints.
fn scaffold(name: &str, description: &str, tags: &[&str]) -> Theme {
    let tags: Vec<TokenValue> = tags.iter().map(|t| TokenValue::from(*t)).collect();
    let scale: Vec<TokenValue> = [0i32, 4, 8, 12, 16, 24, 32, 48, 64]
        .into_iter()
        .map(TokenValue::from)
        .collect();
    Theme::new()
        .with("meta.name", name)
        .with("meta.version", "1.0.0")
        .with("meta.description", description)
        .with("meta.tags", tags)
        .with("typography.fontFamily.sans", "Inter, system-ui, sans-serif")
        .with("typography.fontFamily.mono", "JetBrains Mono, monospace")
        .with("typography.fontSize.xs", "0.75rem")
        .with("typography.fontSize.sm", "0.875rem")
        .with("typography.fontSize.base", "1rem")
        .with("typography.fontSize.lg", "1.125rem")
        .with("typography.fontSize.xl", "1.25rem")
        .with("typography.fontSize.2xl", "1.5rem")
        .with("typography.fontWeight.regular", 400)
        .with("typography.fontWeight.bold", 700)
        .with("typography.lineHeight.tight", 1.25)
        .with("typography.lineHeight.normal", 1.5)
        .with("typography.lineHeight.relaxed", 1.75)
        .with("spacing.xs", "4px")
        .with("spacing.sm", "8px")
        .with("spacing.md", "16px")
        .with("spacing.lg", "24px")
        .with("spacing.xl", "32px")
        .with("spacing.scale", scale)
        .with("borders.thin", "1px solid")
        .with("radii.sm", "4px")
        .with("radii.md", "8px")
        .with("radii.full", "9999px")
        .with("shadows.sm", "0 1px 2px rgba(0, 0, 0, 0.1)")
        .with("shadows.md", "0 4px 8px rgba(0, 0, 0, 0.12)")
        .with("zIndex.dropdown", 1000)
        .with("zIndex.modal", 1300)
        .with("zIndex.tooltip", 1500)
        .with("breakpoints.sm", "640px")
        .with("breakpoints.md", "768px")
        .with("breakpoints.lg", "1024px")
}

/// Button and card tables, expressed in terms of color roles.
fn components(theme: Theme) -> Theme {
    theme
        .with("components.button.primary.background", "colors.primary")
        .with("components.button.primary.text", "colors.onPrimary")
        .with("components.button.primary.minHeight", "2.75rem")
        .with("components.button.primary.padding", "spacing.md")
        .with("components.button.primary.hover.background", "colors.primaryDark")
        .with("components.button.primary.focus.border", "colors.focus")
        .with("components.button.primary.disabled.background", "colors.border")
        .with("components.button.primary.disabled.text", "colors.textSecondary")
        .with("components.button.secondary.background", "colors.background")
        .with("components.button.secondary.text", "colors.primary")
        .with("components.button.secondary.border", "colors.border")
        .with("components.button.secondary.minHeight", "44px")
        .with("components.card.default.background", "colors.surface")
        .with("components.card.default.text", "colors.text")
        .with("components.card.default.radius", "radii.md")
        .with("components.card.default.shadow", "shadows.sm")
}

fn with_colors(theme: Theme, colors: &[(&str, &str)]) -> Theme {
    colors.iter().fold(theme, |theme, (name, value)| {
        theme.with(&format!("colors.{name}"), *value)
    })
}

/// Bright, blue-accented product theme with a dark-mode overlay.
pub fn tech() -> Theme {
    let theme = scaffold(
        "Tech",
        "Clean product UI with a blue accent",
        &["light", "product"],
    );
    let theme = with_colors(
        theme,
        &[
            ("primary", "#1a73e8"),
            ("primaryDark", "#1557b0"),
            ("onPrimary", "#ffffff"),
            ("secondary", "#188038"),
            ("onSecondary", "#ffffff"),
            ("background", "#ffffff"),
            ("surface", "#f8f9fa"),
            ("text", "#202124"),
            ("textSecondary", "#5f6368"),
            ("border", "#80868b"),
            ("focus", "colors.primary"),
            ("error", "#d93025"),
            ("onError", "#ffffff"),
            ("success", "colors.secondary"),
            ("onSuccess", "colors.onSecondary"),
            ("warning", "#fbbc04"),
            ("onWarning", "colors.text"),
        ],
    );
    components(theme)
        .with("darkMode.colors.primary", "#8ab4f8")
        .with("darkMode.colors.primaryDark", "#aecbfa")
        .with("darkMode.colors.onPrimary", "#202124")
        .with("darkMode.colors.background", "#121212")
        .with("darkMode.colors.surface", "#1e1e1e")
        .with("darkMode.colors.text", "#e8eaed")
        .with("darkMode.colors.textSecondary", "#9aa0a6")
        .with("darkMode.colors.onWarning", "#202124")
}

/// Monochrome theme tuned to meet AAA.
pub fn minimal() -> Theme {
    let theme = scaffold(
        "Minimal",
        "High-contrast monochrome",
        &["light", "monochrome"],
    );
    let theme = with_colors(
        theme,
        &[
            ("primary", "#000000"),
            ("primaryDark", "#333333"),
            ("onPrimary", "#ffffff"),
            ("secondary", "#424242"),
            ("onSecondary", "#ffffff"),
            ("background", "#ffffff"),
            ("surface", "#fafafa"),
            ("text", "#111111"),
            ("textSecondary", "#555555"),
            ("border", "#767676"),
            ("focus", "#000000"),
            ("error", "#b00020"),
            ("onError", "#ffffff"),
            ("success", "#1b5e20"),
            ("onSuccess", "#ffffff"),
            ("warning", "#f9a825"),
            ("onWarning", "#000000"),
        ],
    );
    components(theme)
}

/// Dark theme with pastel accents.
pub fn dark() -> Theme {
    let theme = scaffold("Dark", "Dark surfaces with pastel accents", &["dark"]);
    let theme = with_colors(
        theme,
        &[
            ("primary", "#8ab4f8"),
            ("primaryDark", "#aecbfa"),
            ("onPrimary", "#202124"),
            ("secondary", "#81c995"),
            ("onSecondary", "#202124"),
            ("background", "#121212"),
            ("surface", "#1e1e1e"),
            ("text", "#e8eaed"),
            ("textSecondary", "#9aa0a6"),
            ("border", "#80868b"),
            ("focus", "colors.primary"),
            ("error", "#f28b82"),
            ("onError", "#202124"),
            ("success", "#81c995"),
            ("onSuccess", "#202124"),
            ("warning", "#fdd663"),
            ("onWarning", "#202124"),
        ],
    );
    components(theme)
}
