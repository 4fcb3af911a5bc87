//! Array literals.
//!
//! An array body is split on the commas of its top nesting level. A comma
//! inside a quoted span, a nested array or an inline table is part of the
//! element it belongs to:
//!
//! ```rust
//! use toml_tree::array::split_array;
//!
//! assert_eq!(
//!     split_array(r#"[ [1, 2], "a, b", { x = 1, y = 2 } ]"#),
//!     vec!["[1, 2]", r#""a, b""#, "{ x = 1, y = 2 }"]
//! );
//! assert!(split_array("[ ]").is_empty());
//! ```

use crate::scan::Quotes;
use crate::value::parse_value;
use crate::{Error, Result, TomlConfig, Value};

/// Splits an array literal (brackets included) into its trimmed top-level
/// elements. A blank body yields no elements.
#[must_use]
pub fn split_array(raw: &str) -> Vec<&str> {
    let raw = raw.trim();
    let body = raw.strip_prefix('[').unwrap_or(raw);
    let body = body.strip_suffix(']').unwrap_or(body);
    if body.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(body)
}

/// Splits `body` on commas that are outside quotes, `[]` and `{}`; every
/// piece is trimmed.
pub(crate) fn split_top_level(body: &str) -> Vec<&str> {
    let mut quotes = Quotes::default();
    let mut depth = 0usize;
    let mut start = 0;
    let mut elements = Vec::new();

    for (i, ch) in body.char_indices() {
        if !quotes.feed(ch) {
            continue;
        }
        match ch {
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                elements.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    elements.push(body[start..].trim());
    elements
}

/// Checks that no quoted span of the literal is left open.
///
/// Quotes are tracked span by span rather than counted, so `\"` inside a basic
/// string and a quote of the other style inside a string keep the balance.
///
/// # Errors
///
/// Returns a parse error naming the literal when a quote is never closed.
pub fn validate_quotes(raw: &str, line: usize) -> Result<()> {
    let mut quotes = Quotes::default();
    for ch in raw.chars() {
        quotes.feed(ch);
    }
    if quotes.is_open() {
        return Err(Error::parse(
            line,
            format!(
                "not able to parse the array <{}> as it is missing a closing quote",
                raw
            ),
        ));
    }
    Ok(())
}

/// Parses an array literal into its values, recursing into nested arrays.
///
/// A single trailing comma is accepted.
///
/// # Errors
///
/// Fails when the literal is not closed with `]`, a quote is left open, an
/// element is empty, or an element fails to parse.
pub fn parse_array(raw: &str, line: usize, config: &TomlConfig) -> Result<Vec<Value>> {
    let raw = raw.trim();
    if raw.len() < 2 || !raw.starts_with('[') || !raw.ends_with(']') {
        return Err(Error::parse(
            line,
            format!("array <{}> is not closed with ']'", raw),
        ));
    }
    validate_quotes(raw, line)?;

    let mut elements = split_array(raw);
    if elements.len() > 1 && elements.last() == Some(&"") {
        elements.pop();
    }

    elements
        .into_iter()
        .map(|element| {
            if element.is_empty() {
                Err(Error::parse(
                    line,
                    format!("array <{}> contains an empty element", raw),
                ))
            } else if element.starts_with('[') {
                parse_array(element, line, config).map(Value::Array)
            } else {
                parse_value(element, line, config)
            }
        })
        .collect()
}
