//! Error types for TOML parsing and tree building.
//!
//! Every failure raised by the parser is reported through the single [`Error`]
//! enum. Errors are raised at the point of detection and propagate straight to
//! the caller: a single malformed line fails the whole parse.
//!
//! ## Error Categories
//!
//! - **Parse errors**: malformed syntax (quotes, escapes, literals, keys)
//! - **Structural conflicts**: a table or key declared twice, or a name used
//!   both as a table and as a value
//! - **Missing properties**: a partially decoded table does not exist
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{parse_str, Error};
//!
//! let err = parse_str("[a]\n[a]").unwrap_err();
//! assert!(matches!(err, Error::StructuralConflict { line: 2, .. }));
//! assert_eq!(err.line(), Some(2));
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur while building a document tree.
///
/// Line numbers are 1-based and refer to the logical input line that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed syntax
    #[error("Parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    /// Redeclaration of a table, duplicate key or table/value name clash
    #[error("Structural conflict at line {line}: {msg}")]
    StructuralConflict { line: usize, msg: String },

    /// The table requested for partial decoding is not in the tree
    #[error(
        "Missing required property: cannot find table <{table}> in the toml input. \
         Are you sure that this table exists in the input?"
    )]
    MissingRequiredProperty { table: String },
}

impl Error {
    /// Creates a parse error for the given line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::Error;
    ///
    /// let err = Error::parse(10, "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Error::Parse {
            line,
            msg: msg.into(),
        }
    }

    /// Creates a structural conflict error for the given line.
    pub fn conflict(line: usize, msg: impl Into<String>) -> Self {
        Error::StructuralConflict {
            line,
            msg: msg.into(),
        }
    }

    /// Creates the error returned when a partially decoded table is absent.
    pub fn missing_table(table: &str) -> Self {
        Error::MissingRequiredProperty {
            table: table.to_string(),
        }
    }

    /// Returns the originating line number, if the error is tied to one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. } | Error::StructuralConflict { line, .. } => Some(*line),
            Error::MissingRequiredProperty { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
