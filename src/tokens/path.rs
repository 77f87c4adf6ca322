//! Dotted token paths: `colors.primary`, `components.button.primary.hover.background`.

use std::fmt;

use crate::lexer::{single, ValueToken};

/// Top-level sections of a theme description. A dotted string only counts as a
/// token reference when its first segment names one of these.
pub const SECTIONS: &[&str] = &[
    "meta",
    "colors",
    "typography",
    "spacing",
    "borders",
    "radii",
    "shadows",
    "zIndex",
    "breakpoints",
    "components",
    "darkMode",
];

/// A path into a theme tree, one segment per level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenPath {
    segments: Vec<String>,
}

impl TokenPath {
    /// Build a path from segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The empty path (the theme root).
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Split a dotted string into a path without any syntax checks beyond
    /// rejecting empty segments.
    pub fn parse(input: &str) -> Option<Self> {
        if input.is_empty() || input.split('.').any(str::is_empty) {
            return None;
        }
        Some(Self::new(input.split('.')))
    }

    /// Interpret `input` as a token reference.
    ///
    /// Returns `Some` only when the whole string lexes as a single dotted path
    /// and its first segment is a known theme section.
    pub fn parse_reference(input: &str) -> Option<Self> {
        let lexeme = single(input)?;
        if lexeme.token != ValueToken::Path || lexeme.text.len() != input.len() {
            return None;
        }
        let path = Self::parse(input)?;
        SECTIONS.contains(&path.segments[0].as_str()).then_some(path)
    }

    /// The path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first segment (the section), if any.
    pub fn section(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// The last segment, if any.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// `true` if `self` equals `other` or lies beneath it.
    pub fn starts_with(&self, other: &TokenPath) -> bool {
        self.segments.starts_with(&other.segments)
    }
}

impl fmt::Display for TokenPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
