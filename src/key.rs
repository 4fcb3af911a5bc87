//! Keys of key-value pairs and table headers.
//!
//! A raw key is split on every `.` that is not inside a quoted span. Each
//! resulting part is trimmed and stripped of its wrapping quotes:
//!
//! ```rust
//! use toml_tree::Key;
//!
//! let key = Key::parse(r#"a."b.c" . 'd'"#, 1).unwrap();
//! assert_eq!(key.parts(), ["a", "b.c", "d"]);
//! assert!(key.is_dotted());
//! assert_eq!(key.name(), "d");
//! ```

use crate::scan::Quotes;
use crate::{Error, Result};
use std::fmt;

/// A parsed key: the raw text plus its unquoted parts.
///
/// Escape sequences inside quoted parts are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    raw: String,
    parts: Vec<String>,
    dotted: bool,
    line: usize,
}

impl Key {
    /// Splits a raw key into its parts.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the key is blank, a bare part is empty
    /// (`a..b`) or a quote is left open.
    pub fn parse(raw: &str, line: usize) -> Result<Key> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::parse(line, "empty key"));
        }

        let mut quotes = Quotes::default();
        let mut parts = Vec::new();
        let mut start = 0;
        for (i, ch) in raw.char_indices() {
            if quotes.feed(ch) && ch == '.' {
                parts.push(unquote_part(&raw[start..i], raw, line)?);
                start = i + 1;
            }
        }
        if quotes.is_open() {
            return Err(Error::parse(
                line,
                format!("key <{}> does not have a closing quote", raw),
            ));
        }
        parts.push(unquote_part(&raw[start..], raw, line)?);

        Ok(Key {
            raw: raw.to_string(),
            dotted: parts.len() > 1,
            parts,
            line,
        })
    }

    /// The key text as written, trimmed.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The unquoted parts, in order.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The last part: the name this key binds within its table.
    #[must_use]
    pub fn name(&self) -> &str {
        // parts is never empty: `parse` pushes at least one part
        self.parts.last().map_or("", String::as_str)
    }

    /// `true` if the raw key contains a `.` outside quotes.
    #[must_use]
    pub fn is_dotted(&self) -> bool {
        self.dotted
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Drops every part but the last, turning `a.b.c` into `c`.
    pub(crate) fn into_leaf(mut self) -> Key {
        if let Some(name) = self.parts.pop() {
            self.raw = name.clone();
            self.parts = vec![name];
        }
        self.dotted = false;
        self
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn unquote_part(part: &str, raw: &str, line: usize) -> Result<String> {
    let part = part.trim();
    if part.is_empty() {
        return Err(Error::parse(
            line,
            format!("key <{}> contains an empty part", raw),
        ));
    }
    Ok(trim_quotes(part).trim().to_string())
}

/// Strips one pair of matching wrapping quotes, if present.
pub(crate) fn trim_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}
