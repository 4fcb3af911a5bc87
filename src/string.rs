//! Basic (`"..."`) and literal (`'...'`) string values.
//!
//! Basic strings understand a fixed escape table:
//!
//! | Escape | Character |
//! |--------|-----------|
//! | `\t` | tab |
//! | `\b` | backspace |
//! | `\r` | carriage return |
//! | `\n` | line feed |
//! | `\\` | backslash |
//! | `\'` | single quote |
//! | `\"` | double quote |
//! | `\uXXXX` | code point, 4 hex digits |
//! | `\UXXXXXXXX` | code point, 8 hex digits |
//!
//! Anything else after a backslash is a parse error. Literal strings are taken
//! verbatim, except that `\'` may be unescaped when
//! [`TomlConfig::allow_escaped_quotes_in_literal_strings`] is set. A `'` inside
//! a literal string must be written as `\'`.
//!
//! ```rust
//! use toml_tree::string::{escape_basic, unescape_basic};
//!
//! let text = "tab\there \"quoted\"";
//! assert_eq!(escape_basic(text), r#"tab\there \"quoted\""#);
//! assert_eq!(unescape_basic(&escape_basic(text), 1).unwrap(), text);
//! ```

use crate::{Error, Result, TomlConfig};
use std::str::CharIndices;

const SHORT_UNICODE_LEN: usize = 4;
const LONG_UNICODE_LEN: usize = 8;

/// Parses a complete basic string token, quotes included.
///
/// # Errors
///
/// Fails if the token is not wrapped in double quotes, contains an unescaped
/// double quote, or uses an unknown or malformed escape sequence.
pub fn parse_basic_string(raw: &str, line: usize) -> Result<String> {
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return Err(Error::parse(
            line,
            format!(
                "string values should be wrapped (start and end) with double quotes, \
                 but the following value was not: <{}>",
                raw
            ),
        ));
    }
    unescape_basic(&raw[1..raw.len() - 1], line)
}

/// Parses a complete literal string token, quotes included.
///
/// # Errors
///
/// Fails if the token is not wrapped in single quotes, or if a single quote
/// inside it is not preceded by a backslash.
pub fn parse_literal_string(raw: &str, line: usize, config: &TomlConfig) -> Result<String> {
    if raw.len() < 2 || !raw.starts_with('\'') || !raw.ends_with('\'') {
        return Err(Error::parse(
            line,
            format!(
                "literal string should be wrapped with single quotes (''), \
                 it looks like the closing quote is missing in <{}>",
                raw
            ),
        ));
    }
    let content = &raw[1..raw.len() - 1];
    let mut previous = None;
    for (position, ch) in content.char_indices() {
        if ch == '\'' && previous != Some('\\') {
            return Err(Error::parse(
                line,
                format!(
                    "found unescaped single quote at position {} in literal string <{}>",
                    position, raw
                ),
            ));
        }
        previous = Some(ch);
    }
    if config.allow_escaped_quotes_in_literal_strings {
        Ok(content.replace("\\'", "'"))
    } else {
        Ok(content.to_string())
    }
}

/// Expands the escape sequences of a basic string body (quotes excluded).
///
/// # Errors
///
/// Fails on an unescaped `"`, an unknown escape, a dangling backslash, or a
/// `\u`/`\U` escape with the wrong number of hex digits or an invalid code
/// point.
pub fn unescape_basic(body: &str, line: usize) -> Result<String> {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.char_indices();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '"' => {
                return Err(Error::parse(
                    line,
                    format!(
                        "found unescaped quote at position {} in <{}>, \
                         remove the quote or escape it with a backslash",
                        position, body
                    ),
                ))
            }
            '\\' => {
                let Some((_, escape)) = chars.next() else {
                    return Err(Error::parse(
                        line,
                        format!("unterminated escape sequence at the end of <{}>", body),
                    ));
                };
                match escape {
                    't' => result.push('\t'),
                    'b' => result.push('\u{0008}'),
                    'r' => result.push('\r'),
                    'n' => result.push('\n'),
                    '\\' => result.push('\\'),
                    '\'' => result.push('\''),
                    '"' => result.push('"'),
                    'u' => result.push(read_code_point(&mut chars, SHORT_UNICODE_LEN, line)?),
                    'U' => result.push(read_code_point(&mut chars, LONG_UNICODE_LEN, line)?),
                    other => {
                        return Err(Error::parse(
                            line,
                            format!("unknown escape sequence [\\{}] is not allowed", other),
                        ))
                    }
                }
            }
            other => result.push(other),
        }
    }

    Ok(result)
}

fn read_code_point(chars: &mut CharIndices<'_>, len: usize, line: usize) -> Result<char> {
    let hex: String = chars.by_ref().take(len).map(|(_, ch)| ch).collect();
    let malformed = || {
        Error::parse(
            line,
            format!("malformed unicode escape [{}], expected {} hex digits", hex, len),
        )
    };
    if hex.chars().count() != len || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(malformed());
    }
    let code_point = u32::from_str_radix(&hex, 16).map_err(|_| malformed())?;
    char::from_u32(code_point).ok_or_else(|| {
        Error::parse(
            line,
            format!("escape [{}] is not a valid unicode code point", hex),
        )
    })
}

/// Collapses text back into a basic string body using the escape table.
///
/// Control characters without a short escape become `\uXXXX`.
#[must_use]
pub fn escape_basic(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);
    for ch in text.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\t' => result.push_str("\\t"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\u{0008}' => result.push_str("\\b"),
            c if c.is_control() => result.push_str(&format!("\\u{:04X}", c as u32)),
            c => result.push(c),
        }
    }
    result
}
