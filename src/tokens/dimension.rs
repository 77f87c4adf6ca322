//! Dimension values: `16px`, `1.5rem`, `50%`, `2vw`, unitless numbers.

use std::fmt;

use crate::lexer::{single, ValueToken};
use crate::tokens::value::TokenValue;

/// A length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// CSS pixels.
    Px,
    /// Relative to the root font size.
    Rem,
    /// Relative to the element font size (treated like `rem`).
    Em,
    /// Points (1pt = 4/3 px).
    Pt,
    /// Percentage of the parent dimension.
    Percent,
    /// Viewport width percentage.
    Vw,
    /// Viewport height percentage.
    Vh,
    /// No unit; `line-height: 1.5`, `z-index: 10`.
    None,
}

impl Unit {
    fn from_suffix(suffix: &str) -> Option<Unit> {
        Some(match suffix {
            "px" => Unit::Px,
            "rem" => Unit::Rem,
            "em" => Unit::Em,
            "pt" => Unit::Pt,
            "%" => Unit::Percent,
            "vw" => Unit::Vw,
            "vh" => Unit::Vh,
            "" => Unit::None,
            _ => return None,
        })
    }

    fn suffix(self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Rem => "rem",
            Unit::Em => "em",
            Unit::Pt => "pt",
            Unit::Percent => "%",
            Unit::Vw => "vw",
            Unit::Vh => "vh",
            Unit::None => "",
        }
    }
}

/// A number with a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub value: f64,
    pub unit: Unit,
}

impl Dimension {
    /// A pixel dimension.
    pub fn px(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    /// A rem dimension.
    pub fn rem(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Rem,
        }
    }

    /// A unitless number.
    pub fn unitless(value: f64) -> Self {
        Self {
            value,
            unit: Unit::None,
        }
    }

    /// Parse `16px`, `1.5rem`, `50%`, `10`, ...
    pub fn parse(input: &str) -> Option<Self> {
        let lexeme = single(input)?;
        match lexeme.token {
            ValueToken::Number => lexeme.text.parse().ok().map(Self::unitless),
            ValueToken::Dimension => {
                let text = lexeme.text;
                let end = text.find(|c: char| c.is_ascii_alphabetic() || c == '%')?;
                let value = text[..end].parse().ok()?;
                let unit = Unit::from_suffix(&text[end..])?;
                Some(Self { value, unit })
            }
            _ => None,
        }
    }

    /// Interpret a resolved token value as a dimension.
    pub fn from_token(value: &TokenValue) -> Option<Self> {
        match value {
            TokenValue::Number(n) => Some(Self::unitless(*n)),
            TokenValue::Literal(s) => Self::parse(s),
            _ => None,
        }
    }

    /// Absolute size in pixels. Unitless values count as pixels; relative
    /// units that depend on layout (`%`, `vw`, `vh`) have no pixel size.
    pub fn to_px(&self, root_font_size: f64) -> Option<f64> {
        match self.unit {
            Unit::Px | Unit::None => Some(self.value),
            Unit::Rem | Unit::Em => Some(self.value * root_font_size),
            Unit::Pt => Some(self.value * 4.0 / 3.0),
            Unit::Percent | Unit::Vw | Unit::Vh => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.fract() == 0.0 {
            write!(f, "{}{}", self.value as i64, self.unit.suffix())
        } else {
            write!(f, "{}{}", self.value, self.unit.suffix())
        }
    }
}
