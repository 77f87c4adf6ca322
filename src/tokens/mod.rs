//! Design tokens: theme descriptions, token values, reference resolution and
//! component tables.

pub mod components;
pub mod dimension;
pub mod path;
pub mod resolver;
pub mod theme;
pub mod value;

pub use components::{
    resolve_component, resolve_component_tokens, ColorRole, ComponentToken, ComponentTokens,
    StateColors,
};
pub use dimension::{Dimension, Unit};
pub use path::{TokenPath, SECTIONS};
pub use resolver::{resolve_theme, resolve_token, resolve_value, resolve_value_at, ResolveError, ResolvedTheme};
pub use theme::{Theme, ThemeMeta};
pub use value::{TokenMap, TokenValue};
