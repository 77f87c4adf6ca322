//! Token values: the tagged tree a theme description is made of.
//!
//! Every leaf is either a literal (number, boolean, string) or a
//! [`TokenValue::Reference`] to another location in the same tree. Strings are
//! classified when the value is built, so the resolver and the composer never
//! need to re-inspect string contents.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tokens::path::TokenPath;

/// An insertion-ordered group of named token values.
pub type TokenMap = IndexMap<String, TokenValue>;

/// A node in a theme tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// A boolean flag.
    Bool(bool),
    /// A bare number (`1.5`, `400`, `10`).
    Number(f64),
    /// Any string that is not a reference: colors, dimensions, font stacks.
    Literal(String),
    /// A dotted path to another token.
    Reference(TokenPath),
    /// An ordered scale; replaced wholesale when merged.
    List(Vec<TokenValue>),
    /// A nested group of named values.
    Group(TokenMap),
}

impl TokenValue {
    /// Classify a string: references become [`TokenValue::Reference`],
    /// everything else stays a [`TokenValue::Literal`].
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        match TokenPath::parse_reference(&text) {
            Some(path) => TokenValue::Reference(path),
            None => TokenValue::Literal(text),
        }
    }

    /// An empty group.
    pub fn group() -> Self {
        TokenValue::Group(TokenMap::new())
    }

    /// Returns `true` if this value is a reference.
    pub fn is_reference(&self) -> bool {
        matches!(self, TokenValue::Reference(_))
    }

    /// Returns `true` for literals, numbers, booleans and references.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, TokenValue::Group(_) | TokenValue::List(_))
    }

    /// The string content of a literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content, for numbers and numeric literals (`"1.5"`).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Number(n) => Some(*n),
            TokenValue::Literal(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The referenced path, if this is a reference.
    pub fn as_reference(&self) -> Option<&TokenPath> {
        match self {
            TokenValue::Reference(path) => Some(path),
            _ => None,
        }
    }

    /// The children of a group.
    pub fn as_group(&self) -> Option<&TokenMap> {
        match self {
            TokenValue::Group(map) => Some(map),
            _ => None,
        }
    }

    /// Mutable children of a group.
    pub fn as_group_mut(&mut self) -> Option<&mut TokenMap> {
        match self {
            TokenValue::Group(map) => Some(map),
            _ => None,
        }
    }

    /// The items of a list.
    pub fn as_list(&self) -> Option<&[TokenValue]> {
        match self {
            TokenValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a direct child by segment. Lists are indexed by position.
    pub fn child(&self, segment: &str) -> Option<&TokenValue> {
        match self {
            TokenValue::Group(map) => map.get(segment),
            TokenValue::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Walk `path` below this value.
    pub fn get(&self, path: &TokenPath) -> Option<&TokenValue> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Collect every leaf below this value with its path, depth-first in
    /// insertion order. Lists count as leaves.
    pub fn leaves(&self, prefix: &TokenPath) -> Vec<(TokenPath, &TokenValue)> {
        let mut out = Vec::new();
        collect_leaves(self, prefix, &mut out);
        out
    }
}

fn collect_leaves<'a>(value: &'a TokenValue, path: &TokenPath, out: &mut Vec<(TokenPath, &'a TokenValue)>) {
    match value {
        TokenValue::Group(map) => {
            for (key, child) in map {
                collect_leaves(child, &path.child(key.as_str()), out);
            }
        }
        other => out.push((path.clone(), other)),
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Bool(b) => write!(f, "{b}"),
            TokenValue::Number(n) => write!(f, "{n}"),
            TokenValue::Literal(s) => write!(f, "{s}"),
            TokenValue::Reference(path) => write!(f, "{path}"),
            TokenValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            TokenValue::Group(map) => write!(f, "{{{} tokens}}", map.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::from_text(value)
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::from_text(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Number(value)
    }
}

impl From<i32> for TokenValue {
    fn from(value: i32) -> Self {
        TokenValue::Number(f64::from(value))
    }
}

impl From<bool> for TokenValue {
    fn from(value: bool) -> Self {
        TokenValue::Bool(value)
    }
}

impl From<Vec<TokenValue>> for TokenValue {
    fn from(value: Vec<TokenValue>) -> Self {
        TokenValue::List(value)
    }
}

impl From<TokenMap> for TokenValue {
    fn from(value: TokenMap) -> Self {
        TokenValue::Group(value)
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

impl Serialize for TokenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenValue::Bool(b) => serializer.serialize_bool(*b),
            TokenValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            TokenValue::Number(n) => serializer.serialize_f64(*n),
            TokenValue::Literal(s) => serializer.serialize_str(s),
            TokenValue::Reference(path) => serializer.collect_str(path),
            TokenValue::List(items) => items.serialize(serializer),
            TokenValue::Group(map) => map.serialize(serializer),
        }
    }
}

/// Wire shape of a token value before strings are classified.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<TokenValue>),
    Group(TokenMap),
}

impl<'de> Deserialize<'de> for TokenValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawValue::deserialize(deserializer)? {
            RawValue::Bool(b) => TokenValue::Bool(b),
            RawValue::Number(n) => TokenValue::Number(n),
            RawValue::Text(s) => TokenValue::from_text(s),
            RawValue::List(items) => TokenValue::List(items),
            RawValue::Group(map) => TokenValue::Group(map),
        })
    }
}
