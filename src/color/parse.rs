//! Parsing of CSS color literals found in theme descriptions.
//!
//! Accepts `#RRGGBB`, the `#RGB` shorthand, `rgb(r, g, b)` and
//! `hsl(h, s%, l%)` (commas optional, as in CSS Color 4), plus the `white`
//! and `black` keywords. Out-of-range channels are rejected, never clamped.

use crate::color::model::{hex_to_rgb, ColorError, Hsl, Rgb};
use crate::lexer::{tokenize, Lexeme, ValueToken};

/// Parse any supported color literal into RGB.
pub fn parse_color(input: &str) -> Result<Rgb, ColorError> {
    let trimmed = input.trim();
    let lexemes = tokenize(trimmed).map_err(|e| ColorError::invalid(input, e.to_string()))?;

    match lexemes.as_slice() {
        [] => Err(ColorError::invalid(input, "empty color value")),
        [single] if single.token == ValueToken::HexColor => parse_hex_literal(input, single.text),
        [single] if single.token == ValueToken::Ident => match single.text.to_ascii_lowercase().as_str() {
            "white" => Ok(Rgb::WHITE),
            "black" => Ok(Rgb::BLACK),
            other => Err(ColorError::invalid(input, format!("unknown color keyword '{other}'"))),
        },
        [func, open, args @ .., close]
            if func.token == ValueToken::Ident
                && open.token == ValueToken::ParenOpen
                && close.token == ValueToken::ParenClose =>
        {
            let args = function_args(input, args)?;
            match func.text.to_ascii_lowercase().as_str() {
                "rgb" => parse_rgb_args(input, &args),
                "hsl" => parse_hsl_args(input, &args),
                "rgba" | "hsla" => Err(ColorError::invalid(input, "alpha channels are not supported")),
                other => Err(ColorError::invalid(input, format!("unknown color function '{other}'"))),
            }
        }
        _ => Err(ColorError::invalid(input, "not a color literal")),
    }
}

/// Returns `true` if `input` parses as any supported color literal.
pub fn is_color(input: &str) -> bool {
    parse_color(input).is_ok()
}

fn parse_hex_literal(input: &str, text: &str) -> Result<Rgb, ColorError> {
    let digits = &text[1..];
    match digits.len() {
        3 => {
            let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
            hex_to_rgb(&expanded).map_err(|_| ColorError::invalid(input, "invalid hex shorthand"))
        }
        6 => hex_to_rgb(digits).map_err(|_| ColorError::invalid(input, "invalid hex color")),
        n => Err(ColorError::invalid(
            input,
            format!("expected 3 or 6 hex digits, found {n}"),
        )),
    }
}

/// Collect the numeric arguments between the parentheses. Separating commas
/// are optional but must not be doubled or trailing.
fn function_args<'a>(input: &str, lexemes: &[Lexeme<'a>]) -> Result<Vec<Lexeme<'a>>, ColorError> {
    let mut args = Vec::new();
    let mut expect_value = true;
    for lexeme in lexemes {
        match lexeme.token {
            ValueToken::Number | ValueToken::Dimension => {
                args.push(*lexeme);
                expect_value = false;
            }
            ValueToken::Comma if !expect_value => expect_value = true,
            _ => {
                return Err(ColorError::invalid(
                    input,
                    format!("unexpected '{}' in color function", lexeme.text),
                ))
            }
        }
    }
    if expect_value && !args.is_empty() {
        return Err(ColorError::invalid(input, "trailing comma in color function"));
    }
    if args.len() != 3 {
        return Err(ColorError::invalid(
            input,
            format!("expected 3 arguments, found {}", args.len()),
        ));
    }
    Ok(args)
}

/// Split a numeric lexeme into its value and unit suffix.
fn split_number<'a>(input: &str, lexeme: &Lexeme<'a>) -> Result<(f64, &'a str), ColorError> {
    let text = lexeme.text;
    let end = text
        .find(|c: char| c.is_ascii_alphabetic() || c == '%')
        .unwrap_or(text.len());
    let value = text[..end]
        .parse::<f64>()
        .map_err(|e| ColorError::invalid(input, e.to_string()))?;
    Ok((value, &text[end..]))
}

fn parse_rgb_args(input: &str, args: &[Lexeme<'_>]) -> Result<Rgb, ColorError> {
    let mut channels = [0u8; 3];
    for (slot, arg) in channels.iter_mut().zip(args) {
        let (value, unit) = split_number(input, arg)?;
        let scaled = match unit {
            "" if (0.0..=255.0).contains(&value) => value,
            "%" if (0.0..=100.0).contains(&value) => value * 2.55,
            "" | "%" => {
                return Err(ColorError::invalid(
                    input,
                    format!("channel '{}' is out of range", arg.text),
                ))
            }
            other => {
                return Err(ColorError::invalid(
                    input,
                    format!("unexpected unit '{other}' in rgb()"),
                ))
            }
        };
        *slot = scaled.round() as u8;
    }
    Ok(Rgb::new(channels[0], channels[1], channels[2]))
}

fn parse_hsl_args(input: &str, args: &[Lexeme<'_>]) -> Result<Rgb, ColorError> {
    let (hue, hue_unit) = split_number(input, &args[0])?;
    if !matches!(hue_unit, "" | "deg") {
        return Err(ColorError::invalid(
            input,
            format!("unexpected hue unit '{hue_unit}'"),
        ));
    }

    let mut percents = [0.0f64; 2];
    for (slot, arg) in percents.iter_mut().zip(&args[1..]) {
        let (value, unit) = split_number(input, arg)?;
        if !matches!(unit, "" | "%") {
            return Err(ColorError::invalid(
                input,
                format!("expected a percentage, found '{}'", arg.text),
            ));
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(ColorError::invalid(
                input,
                format!("percentage '{}' is out of range", arg.text),
            ));
        }
        *slot = value;
    }

    Ok(Hsl::new(hue, percents[0], percents[1]).to_rgb())
}
