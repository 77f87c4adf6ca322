//! Theme composition: merge, extend, override, project and derive theme
//! descriptions. All operations work on unresolved descriptions and return new
//! values.

pub mod merge;
pub mod project;

pub use merge::{create_theme_variant, extend_theme, merge_themes, override_theme};
pub use project::{are_themes_compatible, omit_colors, pick_colors};

/// Errors from theme composition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("override path '{path}' does not exist in the base theme")]
    UnknownOverridePath { path: String },
}
