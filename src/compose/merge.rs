//! Deep merges over theme trees.
//!
//! Groups merge key by key. Every other value (literals, references and lists)
//! is replaced by the rightmost overlay that sets it, so scales keep their
//! index alignment.

use tracing::{debug, trace};

use crate::compose::ComposeError;
use crate::tokens::{Theme, TokenMap, TokenPath, TokenValue};

/// Overlay `overlay` onto `base` in place.
pub(crate) fn merge_maps(base: &mut TokenMap, overlay: &TokenMap) {
    for (key, value) in overlay {
        match (base.get_mut(key), value) {
            (Some(TokenValue::Group(target)), TokenValue::Group(source)) => {
                merge_maps(target, source);
            }
            (Some(slot), value) => {
                if matches!(value, TokenValue::List(_)) {
                    trace!(key = %key, "replacing list wholesale");
                }
                *slot = value.clone();
            }
            (None, value) => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Deep-merge `overrides` onto `base`, left to right. The rightmost override
/// that sets a leaf wins.
pub fn merge_themes(base: &Theme, overrides: &[&Theme]) -> Theme {
    let mut root = base.root().clone();
    for overlay in overrides {
        merge_maps(&mut root, overlay.root());
    }
    debug!(overrides = overrides.len(), "merged themes");
    Theme::from_map(root)
}

/// Merge `partial` onto `base`, keeping `meta.name` from `base` unless
/// `partial` sets one.
pub fn extend_theme(base: &Theme, partial: &Theme) -> Theme {
    let mut merged = merge_themes(base, &[partial]);
    let name_path = TokenPath::new(["meta", "name"]);
    if !partial.contains(&name_path) {
        if let Some(name) = base.get(&name_path) {
            merged.set(&name_path, name.clone());
        }
    }
    merged
}

/// Merge `overrides` onto `base`, refusing to introduce new keys.
///
/// Every leaf of `overrides` must name a path that already exists in `base`;
/// the first one that does not is reported as
/// [`ComposeError::UnknownOverridePath`].
pub fn override_theme(base: &Theme, overrides: &Theme) -> Result<Theme, ComposeError> {
    if let Some((path, _)) = overrides
        .leaves()
        .into_iter()
        .find(|(path, _)| !base.contains(path))
    {
        return Err(ComposeError::UnknownOverridePath {
            path: path.to_string(),
        });
    }
    Ok(merge_themes(base, &[overrides]))
}

/// Derive a new theme by applying `mutate` to a copy of `base`.
pub fn create_theme_variant<F>(base: &Theme, mutate: F) -> Theme
where
    F: FnOnce(Theme) -> Theme,
{
    mutate(base.clone())
}
