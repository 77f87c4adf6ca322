//! Per-component token tables: `{variant -> state -> property -> value}`.
//!
//! A component table such as `components.button` maps variants (`primary`,
//! `secondary`) to states (`hover`, `focus`, ...), each holding properties.
//! Properties written directly under a variant belong to the `default` state.

use serde::Serialize;

use crate::tokens::path::TokenPath;
use crate::tokens::resolver::{resolve_value_at, ResolveError};
use crate::tokens::theme::Theme;
use crate::tokens::value::{TokenMap, TokenValue};

/// Name of the implicit state for properties set directly on a variant.
pub const DEFAULT_STATE: &str = "default";

/// Which color slot a component property fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Background,
    Text,
    Border,
}

impl ColorRole {
    /// Classify a property name.
    pub fn classify(property: &str) -> Option<ColorRole> {
        match property {
            "background" | "backgroundColor" | "bg" => Some(ColorRole::Background),
            "text" | "color" | "textColor" | "foreground" => Some(ColorRole::Text),
            "border" | "borderColor" => Some(ColorRole::Border),
            _ => None,
        }
    }
}

/// One resolved `{variant, state, property}` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentToken {
    pub variant: String,
    pub state: String,
    pub property: String,
    pub value: TokenValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ColorRole>,
}

impl ComponentToken {
    /// The resolved value as a string literal, if it is one.
    pub fn literal(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// The background/text colors of one `{variant, state}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateColors<'a> {
    pub variant: &'a str,
    pub state: &'a str,
    pub background: Option<&'a str>,
    pub text: Option<&'a str>,
    pub border: Option<&'a str>,
}

/// A flattened, resolved component table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComponentTokens {
    pub entries: Vec<ComponentToken>,
}

impl ComponentTokens {
    /// Flatten an already-resolved table without touching a theme.
    pub fn from_resolved(table: &TokenMap) -> Self {
        let mut entries = Vec::new();
        for (variant, body) in table {
            let Some(body) = body.as_group() else {
                continue;
            };
            for (key, value) in body {
                match value {
                    TokenValue::Group(state) => {
                        for (property, value) in state {
                            entries.push(entry(variant, key, property, value.clone()));
                        }
                    }
                    other => entries.push(entry(variant, DEFAULT_STATE, key, other.clone())),
                }
            }
        }
        Self { entries }
    }

    /// Look up one entry.
    pub fn get(&self, variant: &str, state: &str, property: &str) -> Option<&ComponentToken> {
        self.entries
            .iter()
            .find(|e| e.variant == variant && e.state == state && e.property == property)
    }

    /// Entries filling a color slot.
    pub fn colors(&self) -> impl Iterator<Item = &ComponentToken> {
        self.entries.iter().filter(|e| e.role.is_some())
    }

    /// Color slots grouped per `{variant, state}`, in table order.
    ///
    /// A state that does not set a slot inherits it from the variant's
    /// `default` state.
    pub fn state_colors(&self) -> Vec<StateColors<'_>> {
        let mut out: Vec<StateColors<'_>> = Vec::new();
        for token in &self.entries {
            let Some(role) = token.role else {
                continue;
            };
            let index = match out
                .iter()
                .position(|s| s.variant == token.variant && s.state == token.state)
            {
                Some(i) => i,
                None => {
                    out.push(StateColors {
                        variant: &token.variant,
                        state: &token.state,
                        background: None,
                        text: None,
                        border: None,
                    });
                    out.len() - 1
                }
            };
            let slot = &mut out[index];
            match role {
                ColorRole::Background => slot.background = token.literal(),
                ColorRole::Text => slot.text = token.literal(),
                ColorRole::Border => slot.border = token.literal(),
            }
        }

        for i in 0..out.len() {
            if out[i].state == DEFAULT_STATE {
                continue;
            }
            let Some(base) = out
                .iter()
                .find(|s| s.variant == out[i].variant && s.state == DEFAULT_STATE)
                .cloned()
            else {
                continue;
            };
            let slot = &mut out[i];
            slot.background = slot.background.or(base.background);
            slot.text = slot.text.or(base.text);
            slot.border = slot.border.or(base.border);
        }
        out
    }
}

fn entry(variant: &str, state: &str, property: &str, value: TokenValue) -> ComponentToken {
    ComponentToken {
        variant: variant.to_string(),
        state: state.to_string(),
        property: property.to_string(),
        role: ColorRole::classify(property),
        value,
    }
}

/// Resolve every entry of a component table against `theme` and classify the
/// color-bearing properties.
///
/// When `table` is one of the theme's own `components.<kind>` tables, errors
/// name the full `components.<kind>...` path; otherwise paths are relative to
/// the table.
pub fn resolve_component_tokens(table: &TokenMap, theme: &Theme) -> Result<ComponentTokens, ResolveError> {
    let location = theme
        .components()
        .and_then(|components| {
            components
                .iter()
                .find(|(_, candidate)| candidate.as_group() == Some(table))
        })
        .map(|(kind, _)| TokenPath::new(["components", kind.as_str()]))
        .unwrap_or_else(TokenPath::root);
    resolve_table_at(&location, table, theme)
}

/// Resolve the table at `components.<kind>`. An absent kind yields an empty
/// table.
pub fn resolve_component(kind: &str, theme: &Theme) -> Result<ComponentTokens, ResolveError> {
    let path = TokenPath::new(["components", kind]);
    match theme.get(&path).and_then(TokenValue::as_group) {
        Some(table) => resolve_table_at(&path, table, theme),
        None => Ok(ComponentTokens::default()),
    }
}

fn resolve_table_at(
    location: &TokenPath,
    table: &TokenMap,
    theme: &Theme,
) -> Result<ComponentTokens, ResolveError> {
    let resolved = resolve_value_at(location, &TokenValue::Group(table.clone()), theme)?;
    Ok(resolved
        .as_group()
        .map(ComponentTokens::from_resolved)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn theme() -> Theme {
        Theme::from_value(json!({
            "colors": {"primary": "#1a73e8", "primaryDark": "#1557b0", "onPrimary": "#ffffff"},
            "components": {
                "button": {
                    "primary": {
                        "background": "colors.primary",
                        "text": "colors.onPrimary",
                        "padding": "8px 16px",
                        "hover": {"background": "colors.primaryDark"},
                        "disabled": {"background": "#e0e0e0", "text": "#9e9e9e"}
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn classify_properties() {
        assert_eq!(ColorRole::classify("background"), Some(ColorRole::Background));
        assert_eq!(ColorRole::classify("color"), Some(ColorRole::Text));
        assert_eq!(ColorRole::classify("borderColor"), Some(ColorRole::Border));
        assert_eq!(ColorRole::classify("padding"), None);
    }

    #[test]
    fn resolves_and_flattens() {
        let tokens = resolve_component("button", &theme()).unwrap();
        assert_eq!(tokens.entries.len(), 6);

        let bg = tokens.get("primary", "default", "background").unwrap();
        assert_eq!(bg.literal(), Some("#1a73e8"));
        assert_eq!(bg.role, Some(ColorRole::Background));

        let hover = tokens.get("primary", "hover", "background").unwrap();
        assert_eq!(hover.literal(), Some("#1557b0"));

        let padding = tokens.get("primary", "default", "padding").unwrap();
        assert_eq!(padding.role, None);
        assert_eq!(tokens.colors().count(), 5);
    }

    #[test]
    fn states_inherit_default_slots() {
        let tokens = resolve_component("button", &theme()).unwrap();
        let states = tokens.state_colors();
        let names: Vec<&str> = states.iter().map(|s| s.state).collect();
        assert_eq!(names, vec!["default", "hover", "disabled"]);

        let hover = &states[1];
        assert_eq!(hover.background, Some("#1557b0"));
        assert_eq!(hover.text, Some("#ffffff"));
    }

    #[test]
    fn missing_kind_is_empty() {
        assert!(resolve_component("card", &theme()).unwrap().entries.is_empty());
    }

    #[test]
    fn broken_reference_fails() {
        let theme = Theme::new().with("components.button.primary.background", "colors.nope");
        let expected = ResolveError::TokenNotFound {
            field: "components.button.primary.background".into(),
            path: "colors.nope".into(),
        };
        assert_eq!(resolve_component("button", &theme).unwrap_err(), expected);

        let table = theme.get_str("components.button").and_then(TokenValue::as_group).unwrap();
        assert_eq!(resolve_component_tokens(table, &theme).unwrap_err(), expected);
    }

    #[test]
    fn detached_table_reports_relative_field() {
        let table: TokenMap = serde_json::from_value(json!({
            "primary": {"background": "colors.nope"}
        }))
        .unwrap();
        assert_eq!(
            resolve_component_tokens(&table, &Theme::new()).unwrap_err(),
            ResolveError::TokenNotFound {
                field: "primary.background".into(),
                path: "colors.nope".into(),
            }
        );
    }
}
