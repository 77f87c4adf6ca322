//! Projections of the `colors` section, and structural compatibility.

use std::collections::BTreeSet;

use crate::tokens::{Theme, TokenValue};

/// Keep only the named colors. Every other section is left untouched; a theme
/// without a `colors` section is returned as is.
pub fn pick_colors(theme: &Theme, names: &[&str]) -> Theme {
    retain_colors(theme, |name| names.contains(&name))
}

/// Drop the named colors. Every other section is left untouched.
pub fn omit_colors(theme: &Theme, names: &[&str]) -> Theme {
    retain_colors(theme, |name| !names.contains(&name))
}

fn retain_colors(theme: &Theme, keep: impl Fn(&str) -> bool) -> Theme {
    let mut out = theme.clone();
    if let Some(colors) = out
        .root_mut()
        .get_mut("colors")
        .and_then(TokenValue::as_group_mut)
    {
        colors.retain(|name, _| keep(name));
    }
    out
}

/// `true` if both themes declare the same set of top-level sections,
/// regardless of order.
pub fn are_themes_compatible(a: &Theme, b: &Theme) -> bool {
    let keys = |t: &Theme| t.section_keys().map(str::to_owned).collect::<BTreeSet<_>>();
    keys(a) == keys(b)
}
