//! Typed values of key-value pairs.
//!
//! This module provides the [`Value`] enum, a closed set of variants covering
//! every value the parser understands, and [`parse_value`], which turns a raw
//! value token into one of them.
//!
//! ## Recognition Order
//!
//! | Token shape | Variant |
//! |-------------|---------|
//! | `"..."` | [`Value::BasicString`] |
//! | `'...'` | [`Value::LiteralString`] |
//! | `[...]` | [`Value::Array`] |
//! | `{...}` | [`Value::InlineTable`] |
//! | `true` / `false` | [`Value::Boolean`] |
//! | `null`, `nil`, `NULL`, `NIL`, nothing | [`Value::Null`] |
//! | `42`, `-1_000`, `0xff` | [`Value::Integer`] |
//! | `3.14`, `1e6`, `inf`, `nan` | [`Value::Float`] |
//! | `1979-05-27T07:32:00Z`, ... | [`Value::DateTime`] |
//!
//! ```rust
//! use toml_tree::{parse_value, TomlConfig, Value};
//!
//! let config = TomlConfig::default();
//! assert_eq!(parse_value("42", 1, &config).unwrap(), Value::Integer(42));
//! assert_eq!(parse_value("\"hi\"", 1, &config).unwrap().as_str(), Some("hi"));
//! assert!(parse_value("[[1, 2], [3]]", 1, &config).unwrap().is_array());
//! ```

use crate::array::{parse_array, split_top_level};
use crate::datetime::{parse_date_time, DateTime};
use crate::statement::split_key_value;
use crate::string::{escape_basic, parse_basic_string, parse_literal_string};
use crate::{Error, Key, Result, TomlConfig};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// A typed value.
///
/// # Examples
///
/// ```rust
/// use toml_tree::Value;
///
/// let value = Value::from(42);
/// assert!(value.is_integer());
/// assert_eq!(value.as_integer(), Some(42));
/// assert_eq!(value.to_string(), "42");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// `'text'`, taken verbatim.
    LiteralString(String),
    /// `"text"`, with escapes expanded.
    BasicString(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime),
    #[default]
    Null,
    Array(Vec<Value>),
    /// `{ key = value, ... }`. Expanded into a table when it is the value of a
    /// key-value pair; kept as a value only inside arrays.
    InlineTable(Vec<(Key, Value)>),
}

/// Parses a raw value token.
///
/// # Errors
///
/// Returns a parse error for malformed strings, arrays or inline tables, and
/// for any token that is neither a number nor a date-time.
pub fn parse_value(raw: &str, line: usize, config: &TomlConfig) -> Result<Value> {
    let raw = raw.trim();
    match raw {
        "" => {
            return if config.allow_empty_values {
                Ok(Value::Null)
            } else {
                Err(Error::parse(line, "empty values are not allowed"))
            }
        }
        "true" => return Ok(Value::Boolean(true)),
        "false" => return Ok(Value::Boolean(false)),
        "null" | "nil" | "NULL" | "NIL" => {
            return if config.allow_null_values {
                Ok(Value::Null)
            } else {
                Err(Error::parse(
                    line,
                    format!("null values are not allowed: <{}>", raw),
                ))
            }
        }
        _ => {}
    }

    if raw.starts_with('"') {
        parse_basic_string(raw, line).map(Value::BasicString)
    } else if raw.starts_with('\'') {
        parse_literal_string(raw, line, config).map(Value::LiteralString)
    } else if raw.starts_with('[') {
        parse_array(raw, line, config).map(Value::Array)
    } else if raw.starts_with('{') {
        parse_inline_table(raw, line, config).map(Value::InlineTable)
    } else {
        parse_scalar(raw, line)
    }
}

fn parse_scalar(raw: &str, line: usize) -> Result<Value> {
    if let Some(integer) = parse_integer(raw) {
        return Ok(Value::Integer(integer));
    }
    if let Some(float) = parse_float(raw) {
        return Ok(Value::Float(float));
    }
    if let Some(date_time) = parse_date_time(raw) {
        return Ok(Value::DateTime(date_time));
    }
    Err(Error::parse(
        line,
        format!(
            "unknown value <{}>: expected a string, number, boolean, date-time, \
             array or inline table",
            raw
        ),
    ))
}

fn parse_integer(text: &str) -> Option<i64> {
    let (radix, digits) = match text.get(..2) {
        Some("0x") => (16, &text[2..]),
        Some("0o") => (8, &text[2..]),
        Some("0b") => (2, &text[2..]),
        _ => (10, text),
    };
    let cleaned = strip_separators(digits)?;
    if radix != 10 && cleaned.starts_with(['+', '-']) {
        return None;
    }
    i64::from_str_radix(&cleaned, radix).ok()
}

fn parse_float(text: &str) -> Option<f64> {
    match text {
        "inf" | "+inf" => return Some(f64::INFINITY),
        "-inf" => return Some(f64::NEG_INFINITY),
        "nan" | "+nan" | "-nan" => return Some(f64::NAN),
        _ => {}
    }
    let bytes = text.as_bytes();
    let numeric = bytes
        .iter()
        .all(|&b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E' | b'_'));
    if !numeric || !bytes.iter().any(u8::is_ascii_digit) {
        return None;
    }
    // A decimal point needs a digit on both sides: `1.` and `.5` are rejected.
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'.' {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + 1).copied();
            match (before, after) {
                (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {}
                _ => return None,
            }
        }
    }
    strip_separators(text)?.parse().ok()
}

/// Removes `_` digit separators; each must sit between two alphanumerics.
fn strip_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'_' {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + 1).copied();
            match (before, after) {
                (Some(x), Some(y)) if x.is_ascii_alphanumeric() && y.is_ascii_alphanumeric() => {}
                _ => return None,
            }
        }
    }
    Some(text.replace('_', ""))
}

fn parse_inline_table(raw: &str, line: usize, config: &TomlConfig) -> Result<Vec<(Key, Value)>> {
    if raw.len() < 2 || !raw.ends_with('}') {
        return Err(Error::parse(
            line,
            format!("inline table <{}> is not closed with '}}'", raw),
        ));
    }
    let body = raw[1..raw.len() - 1].trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }
    if body.ends_with(',') {
        return Err(Error::parse(
            line,
            format!("trailing commas are not permitted in inline tables: [{}]", raw),
        ));
    }

    split_top_level(body)
        .into_iter()
        .map(|entry| {
            if entry.is_empty() {
                return Err(Error::parse(
                    line,
                    format!("inline table <{}> contains an empty entry", raw),
                ));
            }
            let (key, value) = split_key_value(entry, line)?;
            Ok((Key::parse(key, line)?, parse_value(value, line, config)?))
        })
        .collect()
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `true` for both basic and literal strings.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::BasicString(_) | Value::LiteralString(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_date_time(&self) -> bool {
        matches!(self, Value::DateTime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_inline_table(&self) -> bool {
        matches!(self, Value::InlineTable(_))
    }

    /// The string content of either string variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Value;
    ///
    /// assert_eq!(Value::LiteralString("a".into()).as_str(), Some("a"));
    /// assert_eq!(Value::Integer(1).as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::BasicString(s) | Value::LiteralString(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as `f64`; integers are widened.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date_time(&self) -> Option<&DateTime> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_inline_table(&self) -> Option<&[(Key, Value)]> {
        match self {
            Value::InlineTable(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Human-readable name of the variant, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::LiteralString(_) => "literal string",
            Value::BasicString(_) => "basic string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::DateTime(_) => "date-time",
            Value::Null => "null",
            Value::Array(_) => "array",
            Value::InlineTable(_) => "inline table",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::LiteralString(s) => write!(f, "'{}'", s),
            Value::BasicString(s) => write!(f, "\"{}\"", escape_basic(s)),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) if fl.is_nan() => write!(f, "nan"),
            Value::Float(fl) if fl.is_infinite() => {
                write!(f, "{}", if *fl > 0.0 { "inf" } else { "-inf" })
            }
            Value::Float(fl) => write!(f, "{:?}", fl),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::Null => write!(f, "null"),
            Value::Array(values) => {
                write!(
                    f,
                    "[{}]",
                    values
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Value::InlineTable(pairs) if pairs.is_empty() => write!(f, "{{}}"),
            Value::InlineTable(pairs) => {
                write!(
                    f,
                    "{{ {} }}",
                    pairs
                        .iter()
                        .map(|(k, v)| format!("{} = {}", k, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::LiteralString(s) | Value::BasicString(s) => serializer.serialize_str(s),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::DateTime(dt) => dt.serialize(serializer),
            Value::Null => serializer.serialize_unit(),
            Value::Array(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for element in values {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::InlineTable(pairs) => InlineGroup::from_pairs(pairs).serialize(serializer),
        }
    }
}

/// Inline-table pairs regrouped by key part, so `p.q = 2` nests like a table.
#[derive(Default)]
struct InlineGroup<'a> {
    value: Option<&'a Value>,
    children: IndexMap<&'a str, InlineGroup<'a>>,
}

impl<'a> InlineGroup<'a> {
    fn from_pairs(pairs: &'a [(Key, Value)]) -> Self {
        let mut root = InlineGroup::default();
        for (key, value) in pairs {
            let mut group = &mut root;
            for part in key.parts() {
                group = group.children.entry(part.as_str()).or_default();
            }
            group.value = Some(value);
        }
        root
    }
}

impl Serialize for InlineGroup<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let (Some(value), true) = (self.value, self.children.is_empty()) {
            return value.serialize(serializer);
        }
        let mut map = serializer.serialize_map(Some(self.children.len()))?;
        for (name, group) in &self.children {
            map.serialize_entry(name, group)?;
        }
        map.end()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::BasicString(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::BasicString(value)
    }
}

impl From<DateTime> for Value {
    fn from(value: DateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}
