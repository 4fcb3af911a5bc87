//! Classification of single input lines.
//!
//! Every logical line is one of four statements:
//!
//! ```rust
//! use toml_tree::statement::{classify, Statement};
//!
//! assert!(matches!(classify("  # comment", 1).unwrap(), Statement::Empty));
//! assert!(matches!(classify("[a.b]", 2).unwrap(), Statement::Table("a.b")));
//! assert!(matches!(classify("[[fruit]]", 3).unwrap(), Statement::ArrayOfTables("fruit")));
//! assert!(matches!(
//!     classify(r#"name = "x = y" # trailing"#, 4).unwrap(),
//!     Statement::KeyValue { key: "name", value: r#""x = y""# }
//! ));
//! ```

use crate::scan::find_structural;
use crate::{Error, Result};

/// A classified line. Header names and key/value texts are raw and trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statement<'a> {
    /// Blank line or comment.
    Empty,
    /// `[name]`
    Table(&'a str),
    /// `[[name]]`
    ArrayOfTables(&'a str),
    /// `key = value`
    KeyValue { key: &'a str, value: &'a str },
}

impl Statement<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Statement::Empty)
    }
}

/// Cuts a line at its first `#` outside quotes.
#[must_use]
pub fn strip_comment(line: &str) -> &str {
    match find_structural(line, '#', false) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Splits `key = value` at the first `=` that is outside quotes and
/// brackets. Both halves are trimmed.
///
/// # Errors
///
/// Fails when the text has no such `=`.
pub fn split_key_value(text: &str, line: usize) -> Result<(&str, &str)> {
    match find_structural(text, '=', true) {
        Some(idx) => Ok((text[..idx].trim(), text[idx + 1..].trim())),
        None => Err(Error::parse(
            line,
            format!(
                "incorrect format of key-value pair <{}>: expected 'key = value'",
                text.trim()
            ),
        )),
    }
}

/// Classifies one line.
///
/// # Errors
///
/// Returns a parse error for an unclosed header, a header name with an
/// unquoted bracket, a key-value line without `=` and a key-value line with
/// an empty key.
pub fn classify(text: &str, line: usize) -> Result<Statement<'_>> {
    let text = strip_comment(text).trim();
    if text.is_empty() {
        return Ok(Statement::Empty);
    }

    if let Some(rest) = text.strip_prefix("[[") {
        return match rest.strip_suffix("]]") {
            Some(name) => header_name(name, text, line).map(Statement::ArrayOfTables),
            None => Err(Error::parse(
                line,
                format!("array of tables header <{}> is not closed with ']]'", text),
            )),
        };
    }
    if let Some(rest) = text.strip_prefix('[') {
        return match rest.strip_suffix(']') {
            Some(name) => header_name(name, text, line).map(Statement::Table),
            None => Err(Error::parse(
                line,
                format!("table header <{}> is not closed with ']'", text),
            )),
        };
    }

    let (key, value) = split_key_value(text, line)?;
    if key.is_empty() {
        return Err(Error::parse(
            line,
            format!("key-value pair <{}> has an empty key", text),
        ));
    }
    Ok(Statement::KeyValue { key, value })
}

/// Trims a header name; brackets are only allowed inside quoted parts.
fn header_name<'a>(name: &'a str, text: &str, line: usize) -> Result<&'a str> {
    let stray = find_structural(name, '[', false).or(find_structural(name, ']', false));
    if stray.is_some() {
        return Err(Error::parse(
            line,
            format!("table header <{}> contains an unquoted bracket", text),
        ));
    }
    Ok(name.trim())
}
