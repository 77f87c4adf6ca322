//! Theme descriptions: the author-facing tree of design tokens.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::compose::merge::merge_maps;
use crate::tokens::path::TokenPath;
use crate::tokens::value::{TokenMap, TokenValue};

/// The `meta` section of a theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeMeta {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

/// A theme description: named sections (`meta`, `colors`, `typography`,
/// `spacing`, ..., `components`, optionally `darkMode`) whose leaves are
/// literals or token references.
///
/// Themes are plain values. Every engine operation takes them by reference and
/// returns new values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    root: TokenMap,
}

impl Theme {
    /// An empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing tree.
    pub fn from_map(root: TokenMap) -> Self {
        Self { root }
    }

    /// Parse a theme from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build a theme from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The top-level sections.
    pub fn root(&self) -> &TokenMap {
        &self.root
    }

    /// Mutable access to the top-level sections.
    pub fn root_mut(&mut self) -> &mut TokenMap {
        &mut self.root
    }

    /// Unwrap into the underlying tree.
    pub fn into_root(self) -> TokenMap {
        self.root
    }

    /// Names of the top-level sections, in author order.
    pub fn section_keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// A top-level section, if it is a group.
    pub fn section(&self, name: &str) -> Option<&TokenMap> {
        self.root.get(name).and_then(TokenValue::as_group)
    }

    /// The `colors` section.
    pub fn colors(&self) -> Option<&TokenMap> {
        self.section("colors")
    }

    /// The `components` section.
    pub fn components(&self) -> Option<&TokenMap> {
        self.section("components")
    }

    /// Typed view of the `meta` section. Missing fields are `None`.
    pub fn meta(&self) -> ThemeMeta {
        let Some(meta) = self.section("meta") else {
            return ThemeMeta::default();
        };
        let text = |key: &str| meta.get(key).map(ToString::to_string);
        ThemeMeta {
            name: text("name"),
            version: text("version"),
            description: text("description"),
            tags: meta
                .get("tags")
                .and_then(TokenValue::as_list)
                .map(|tags| tags.iter().map(ToString::to_string).collect())
                .unwrap_or_default(),
        }
    }

    /// `meta.name`, if set.
    pub fn name(&self) -> Option<String> {
        self.meta().name
    }

    /// Look up the value at `path`.
    pub fn get(&self, path: &TokenPath) -> Option<&TokenValue> {
        let (first, rest) = path.segments().split_first()?;
        let section = self.root.get(first)?;
        rest.iter()
            .try_fold(section, |node, segment| node.child(segment))
    }

    /// Look up the value at a dotted path string.
    pub fn get_str(&self, path: &str) -> Option<&TokenValue> {
        self.get(&TokenPath::parse(path)?)
    }

    /// Returns `true` if `path` exists in this theme.
    pub fn contains(&self, path: &TokenPath) -> bool {
        self.get(path).is_some()
    }

    /// Set the value at `path`, creating intermediate groups as needed.
    ///
    /// A non-group value in the way is replaced by a group.
    pub fn set(&mut self, path: &TokenPath, value: impl Into<TokenValue>) {
        let Some((last, parents)) = path.segments().split_last() else {
            return;
        };
        let mut node = &mut self.root;
        for segment in parents {
            let entry = node
                .entry(segment.clone())
                .or_insert_with(TokenValue::group);
            if entry.as_group().is_none() {
                *entry = TokenValue::group();
            }
            node = match entry {
                TokenValue::Group(map) => map,
                _ => return,
            };
        }
        node.insert(last.clone(), value.into());
    }

    /// Builder form of [`Theme::set`].
    pub fn with(mut self, path: &str, value: impl Into<TokenValue>) -> Self {
        if let Some(path) = TokenPath::parse(path) {
            self.set(&path, value);
        }
        self
    }

    /// Every leaf of the theme with its full path.
    pub fn leaves(&self) -> Vec<(TokenPath, &TokenValue)> {
        let mut out = Vec::new();
        for (key, value) in &self.root {
            out.extend(value.leaves(&TokenPath::new([key.as_str()])));
        }
        out
    }

    /// The theme as it appears in dark mode: the `darkMode` section overlaid on
    /// the top-level sections with the same precedence as a merge.
    ///
    /// The `darkMode` section itself is kept so references into it still
    /// resolve. Returns `None` when the theme has no `darkMode` section.
    pub fn dark_mode(&self) -> Option<Theme> {
        let overlay = self.section("darkMode")?;
        let mut root = self.root.clone();
        merge_maps(&mut root, overlay);
        Some(Theme { root })
    }

    /// A deterministic 64-bit fingerprint of the tree, stable for the life of
    /// the process. Used as a cache key.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        hash_map(&self.root, &mut hasher);
        hasher.finish()
    }
}

fn hash_map<H: Hasher>(map: &TokenMap, state: &mut H) {
    map.len().hash(state);
    for (key, value) in map {
        key.hash(state);
        hash_value(value, state);
    }
}

fn hash_value<H: Hasher>(value: &TokenValue, state: &mut H) {
    match value {
        TokenValue::Bool(b) => {
            0u8.hash(state);
            b.hash(state);
        }
        TokenValue::Number(n) => {
            1u8.hash(state);
            n.to_bits().hash(state);
        }
        TokenValue::Literal(s) => {
            2u8.hash(state);
            s.hash(state);
        }
        TokenValue::Reference(path) => {
            3u8.hash(state);
            path.hash(state);
        }
        TokenValue::List(items) => {
            4u8.hash(state);
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        TokenValue::Group(map) => {
            5u8.hash(state);
            hash_map(map, state);
        }
    }
}

impl From<TokenMap> for Theme {
    fn from(root: TokenMap) -> Self {
        Self::from_map(root)
    }
}
