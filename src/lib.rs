//! # toml_tree
//!
//! A line-oriented TOML parser that builds an ordered, typed document tree.
//!
//! ## What does it produce?
//!
//! Parsing yields a [`File`]: the root of a tree of [`Table`]s and
//! [`KeyValue`] leaves, kept in declaration order and tagged with the line
//! each node came from. Dotted keys and inline tables are expanded into real
//! table nodes, intermediate tables that were never declared are created as
//! *synthetic* tables, and every `[[array]]` header becomes its own sibling
//! table.
//!
//! ## Key Features
//!
//! - **Typed values**: a closed [`Value`] enum covering strings, integers,
//!   floats, booleans, date-times, arrays and inline tables
//! - **Precise diagnostics**: every [`Error`] carries the 1-based line that failed
//! - **Table discovery**: walk every table, or only the declared ones
//! - **Partial parsing**: keep just the contents of one named table
//! - **Serde bridge**: the tree implements `Serialize`, so any serde format
//!   can consume it
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_tree::{parse_str, Value};
//!
//! let toml = r#"
//! title = "TOML Example"
//!
//! [owner]
//! name = "Tom Preston-Werner"
//! dob = 1979-05-27T07:32:00-08:00
//!
//! [database]
//! ports = [ 8000, 8001, 8002 ]
//! enabled = true
//! "#;
//!
//! let file = parse_str(toml).unwrap();
//! assert_eq!(file.get("title").and_then(Value::as_str), Some("TOML Example"));
//!
//! let database = file.find_table("database").unwrap();
//! assert_eq!(database.get("ports").and_then(Value::as_array).map(<[_]>::len), Some(3));
//! assert!(file.find_table("owner").unwrap().get("dob").unwrap().is_date_time());
//! ```
//!
//! ### Arrays of Tables
//!
//! ```rust
//! use toml_tree::parse_str;
//!
//! let file = parse_str("[[fruit]]\nname = 'apple'\n[[fruit]]\nname = 'banana'").unwrap();
//! let names: Vec<_> = file
//!     .tables()
//!     .map(|t| (t.index(), t.get("name").and_then(|v| v.as_str())))
//!     .collect();
//! assert_eq!(names, [(Some(0), Some("apple")), (Some(1), Some("banana"))]);
//! ```
//!
//! ### Partial Parsing
//!
//! ```rust
//! use toml_tree::{partial_str, Error};
//!
//! let toml = "[table1]\na = 1\nb = 2\n[table2]\nc = 1";
//! let only = partial_str(toml, "table1").unwrap();
//! assert_eq!(only.children().len(), 2);
//!
//! assert!(matches!(
//!     partial_str(toml, "table3"),
//!     Err(Error::MissingRequiredProperty { .. })
//! ));
//! ```
//!
//! ### Binding through Serde
//!
//! ```rust
//! let file = toml_tree::parse_str("[server]\nhost = 'localhost'\nport = 8080").unwrap();
//! let json = serde_json::to_value(&file).unwrap();
//! assert_eq!(json["server"]["port"], 8080);
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Malformed input is reported through `Result`, never by panicking
//! - A parser holds no state between calls and can be shared across threads
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`table_discovery.rs`** - Walking declared and synthetic tables
//! - **`partial_table.rs`** - Extracting a single table
//!
//! Run any example with: `cargo run --example <name>`

pub mod array;
pub mod config;
pub mod datetime;
pub mod error;
pub mod key;
pub mod parser;
mod scan;
pub mod statement;
pub mod string;
pub mod tree;
pub mod value;

pub use config::TomlConfig;
pub use datetime::DateTime;
pub use error::{Error, Result};
pub use key::Key;
pub use parser::TomlParser;
pub use statement::Statement;
pub use tree::{File, KeyValue, Node, Table, TableKind};
pub use value::{parse_value, Value};

/// Parse a TOML document with the default configuration.
///
/// # Examples
///
/// ```rust
/// use toml_tree::parse_str;
///
/// let file = parse_str("a.b.c = 1").unwrap();
/// let table = file.find_table("a.b").unwrap();
/// assert!(table.is_synthetic());
/// assert_eq!(table.get("c").and_then(|v| v.as_integer()), Some(1));
/// ```
///
/// # Errors
///
/// Returns an error if a line is malformed or conflicts with an earlier one.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(text: &str) -> Result<File> {
    TomlParser::default().parse_str(text)
}

/// Parse a TOML document that is already split into lines.
///
/// # Examples
///
/// ```rust
/// use toml_tree::parse_lines;
///
/// let file = parse_lines(["[a]", "x = 1"]).unwrap();
/// assert!(file.find_table("a").is_some());
/// ```
///
/// # Errors
///
/// Returns an error if a line is malformed or conflicts with an earlier one.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_lines<I>(lines: I) -> Result<File>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    TomlParser::default().parse_lines(lines)
}

/// Parse a TOML document and keep only the contents of the named table.
///
/// # Errors
///
/// Returns an error if parsing fails or the table does not exist.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn partial_str(text: &str, table: &str) -> Result<File> {
    TomlParser::default().partial_str(text, table)
}

/// Line-sequence counterpart of [`partial_str`].
///
/// # Errors
///
/// Returns an error if parsing fails or the table does not exist.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn partial_lines<I>(lines: I, table: &str) -> Result<File>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    TomlParser::default().partial_lines(lines, table)
}
