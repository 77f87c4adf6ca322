//! Token reference resolution.
//!
//! References are resolved by walking the theme tree segment by segment. The
//! resolver keeps the chain of paths currently being resolved; meeting a path
//! that is already on the chain is a cycle and fails instead of recursing.

use indexmap::IndexSet;
use serde::Serialize;
use tracing::{trace, warn};

use crate::color::{parse_color, Rgb};
use crate::tokens::path::TokenPath;
use crate::tokens::theme::Theme;
use crate::tokens::value::{TokenMap, TokenValue};

/// Errors from token resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("token '{path}' referenced by '{field}' does not exist")]
    TokenNotFound { field: String, path: String },
    #[error("cyclic token reference: {}", cycle.join(" -> "))]
    CyclicTokenReference { cycle: Vec<String> },
}

/// Resolution state for one theme.
struct Resolver<'t> {
    theme: &'t Theme,
    /// Paths currently being resolved, in the order they were entered.
    chain: IndexSet<TokenPath>,
}

impl<'t> Resolver<'t> {
    fn new(theme: &'t Theme) -> Self {
        Self {
            theme,
            chain: IndexSet::new(),
        }
    }

    /// Resolve the reference `path`, found at `field`.
    fn resolve_path(&mut self, field: &TokenPath, path: &TokenPath) -> Result<TokenValue, ResolveError> {
        if let Some(start) = self.chain.get_index_of(path) {
            let mut cycle: Vec<String> = self
                .chain
                .iter()
                .skip(start)
                .map(ToString::to_string)
                .collect();
            cycle.push(path.to_string());
            warn!(cycle = %cycle.join(" -> "), "cyclic token reference");
            return Err(ResolveError::CyclicTokenReference { cycle });
        }

        let target = self
            .theme
            .get(path)
            .ok_or_else(|| ResolveError::TokenNotFound {
                field: field.to_string(),
                path: path.to_string(),
            })?;

        trace!(%field, %path, "resolving token reference");
        self.chain.insert(path.clone());
        let resolved = self.resolve_value(path, target);
        self.chain.pop();
        resolved
    }

    /// Resolve every reference inside `value`, which lives at `field`.
    fn resolve_value(&mut self, field: &TokenPath, value: &TokenValue) -> Result<TokenValue, ResolveError> {
        match value {
            TokenValue::Reference(path) => self.resolve_path(field, path),
            TokenValue::Group(map) => Ok(TokenValue::Group(self.resolve_map(field, map)?)),
            TokenValue::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.resolve_value(&field.child(i.to_string()), item))
                .collect::<Result<Vec<_>, _>>()
                .map(TokenValue::List),
            literal => Ok(literal.clone()),
        }
    }

    fn resolve_map(&mut self, field: &TokenPath, map: &TokenMap) -> Result<TokenMap, ResolveError> {
        map.iter()
            .map(|(key, child)| {
                let value = self.resolve_value(&field.child(key.as_str()), child)?;
                Ok((key.clone(), value))
            })
            .collect()
    }
}

/// Resolve a token string against `theme`.
///
/// Strings that are not references (`"16px"`, `"#1a73e8"`) are returned
/// unchanged as literals. References are followed until a literal is reached.
pub fn resolve_token(reference: &str, theme: &Theme) -> Result<TokenValue, ResolveError> {
    match TokenPath::parse_reference(reference) {
        Some(path) => Resolver::new(theme).resolve_path(&path, &path),
        None => Ok(TokenValue::Literal(reference.to_string())),
    }
}

/// Resolve every reference inside an arbitrary value against `theme`.
///
/// Resolving an already-resolved value returns it unchanged.
pub fn resolve_value(value: &TokenValue, theme: &Theme) -> Result<TokenValue, ResolveError> {
    Resolver::new(theme).resolve_value(&TokenPath::root(), value)
}

/// Resolve every reference inside `value`, which lives at `field`.
///
/// Errors report locations under `field`, so a value lifted out of the theme
/// keeps its full path in `TokenNotFound`.
pub fn resolve_value_at(
    field: &TokenPath,
    value: &TokenValue,
    theme: &Theme,
) -> Result<TokenValue, ResolveError> {
    Resolver::new(theme).resolve_value(field, value)
}

/// Resolve a whole theme. The source theme is not modified.
pub fn resolve_theme(theme: &Theme) -> Result<ResolvedTheme, ResolveError> {
    let root = Resolver::new(theme).resolve_map(&TokenPath::root(), theme.root())?;
    Ok(ResolvedTheme {
        theme: Theme::from_map(root),
    })
}

// ---------------------------------------------------------------------------
// ResolvedTheme
// ---------------------------------------------------------------------------

/// A theme with every reference replaced by its literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedTheme {
    theme: Theme,
}

impl ResolvedTheme {
    /// View as a plain theme description (which contains no references).
    pub fn as_theme(&self) -> &Theme {
        &self.theme
    }

    /// Unwrap into a plain theme description.
    pub fn into_theme(self) -> Theme {
        self.theme
    }

    /// Look up a resolved value by dotted path.
    pub fn get(&self, path: &str) -> Option<&TokenValue> {
        self.theme.get_str(path)
    }

    /// A top-level section.
    pub fn section(&self, name: &str) -> Option<&TokenMap> {
        self.theme.section(name)
    }

    /// The literal value of `colors.<name>`, if present.
    pub fn color(&self, name: &str) -> Option<&str> {
        self.theme
            .colors()
            .and_then(|colors| colors.get(name))
            .and_then(TokenValue::as_str)
    }

    /// `colors.<name>` parsed as a color. `None` if absent or not a valid color.
    pub fn rgb(&self, name: &str) -> Option<Rgb> {
        self.color(name).and_then(|c| parse_color(c).ok())
    }

    /// `meta.name`, if set.
    pub fn name(&self) -> Option<String> {
        self.theme.name()
    }
}
