//! logos-based lexer for token value strings.
//!
//! Theme values are plain strings (`"#1a73e8"`, `"rgb(26, 115, 232)"`,
//! `"1.5rem"`, `"colors.primary"`). This lexer splits such a string into
//! classified lexemes so color parsing, dimension parsing, and reference
//! detection share one tokenizer.
//!
//! Two pairs of variants overlap. A dotted run like `colors.primary` could
//! also start as the identifier `colors`, and `1.5rem` could split into the
//! number `1.5` and the identifier `rem`. Both regexes consume the whole run,
//! so [`ValueToken::Path`] and [`ValueToken::Dimension`] win; a bare word
//! stays an [`ValueToken::Ident`] and a bare figure a [`ValueToken::Number`].
//! Path segments may start with a digit, so `fontSize.2xl` is one path.

use logos::Logos;

/// A classified fragment of a token value string.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum ValueToken {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// Hex color: `#fff`, `#1a73e8`. Digit count is validated by the caller.
    #[regex(r"#[0-9a-fA-F]+")]
    HexColor,

    /// Number with a unit suffix: `16px`, `1.5rem`, `50%`, `210deg`.
    #[regex(r"-?[0-9]+(\.[0-9]+)?(px|rem|em|%|vw|vh|pt|deg)")]
    Dimension,

    /// Bare number: integer or float, possibly negative.
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    /// Dotted path: `colors.primary`, `typography.fontSize.2xl`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*(\.[a-zA-Z0-9_-]+)+")]
    Path,

    /// Identifier: function names (`rgb`, `hsl`), keywords, font names.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `,`
    #[token(",")]
    Comma,

    /// `/`
    #[token("/")]
    Slash,
}

/// A token together with the source text it matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub token: ValueToken,
    pub text: &'a str,
}

/// Errors from lexing a value string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized input '{fragment}' at byte {position}")]
pub struct LexError {
    pub position: usize,
    pub fragment: String,
}

/// Tokenize a value string, failing on the first unrecognized fragment.
pub fn tokenize(input: &str) -> Result<Vec<Lexeme<'_>>, LexError> {
    let mut lexemes = Vec::new();
    for (result, span) in ValueToken::lexer(input).spanned() {
        match result {
            Ok(token) => lexemes.push(Lexeme {
                token,
                text: &input[span],
            }),
            Err(()) => {
                return Err(LexError {
                    position: span.start,
                    fragment: input[span].to_string(),
                })
            }
        }
    }
    Ok(lexemes)
}

/// Returns the single lexeme of `input` if the whole string lexes to exactly one
/// token, or `None` otherwise.
pub fn single(input: &str) -> Option<Lexeme<'_>> {
    match tokenize(input) {
        Ok(lexemes) if lexemes.len() == 1 => Some(lexemes[0]),
        _ => None,
    }
}
