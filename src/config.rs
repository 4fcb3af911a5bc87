//! Configuration options for the TOML parser.
//!
//! [`TomlConfig`] toggles the permissive parts of the accepted dialect. The
//! defaults accept everything; switch a flag off to make the parser stricter.
//!
//! ## Examples
//!
//! ```rust
//! use toml_tree::{TomlConfig, TomlParser};
//!
//! let strict = TomlConfig::new().with_allow_null_values(false);
//! let parser = TomlParser::new(strict);
//! assert!(parser.parse_str("a = null").is_err());
//! ```

/// Configuration options for parsing.
///
/// # Examples
///
/// ```rust
/// use toml_tree::TomlConfig;
///
/// let config = TomlConfig::new()
///     .with_allow_empty_values(false)
///     .with_allow_escaped_quotes_in_literal_strings(false);
/// assert!(!config.allow_empty_values);
/// assert!(config.allow_null_values);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TomlConfig {
    /// Unescape `\'` inside literal strings (`'it\'s'` becomes `it's`).
    pub allow_escaped_quotes_in_literal_strings: bool,
    /// Accept `key =` with nothing after the `=` as a null value.
    pub allow_empty_values: bool,
    /// Accept `null`, `nil`, `NULL` and `NIL` as null values.
    pub allow_null_values: bool,
    /// Accept a document without any table or key-value statement.
    pub allow_empty_toml: bool,
}

impl Default for TomlConfig {
    fn default() -> Self {
        TomlConfig {
            allow_escaped_quotes_in_literal_strings: true,
            allow_empty_values: true,
            allow_null_values: true,
            allow_empty_toml: true,
        }
    }
}

impl TomlConfig {
    /// Creates the default (permissive) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_allow_escaped_quotes_in_literal_strings(mut self, allow: bool) -> Self {
        self.allow_escaped_quotes_in_literal_strings = allow;
        self
    }

    #[must_use]
    pub fn with_allow_empty_values(mut self, allow: bool) -> Self {
        self.allow_empty_values = allow;
        self
    }

    #[must_use]
    pub fn with_allow_null_values(mut self, allow: bool) -> Self {
        self.allow_null_values = allow;
        self
    }

    /// Sets whether a document with no statements is accepted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_tree::{TomlConfig, TomlParser};
    ///
    /// let parser = TomlParser::new(TomlConfig::new().with_allow_empty_toml(false));
    /// assert!(parser.parse_str("# only a comment\n").is_err());
    /// ```
    #[must_use]
    pub fn with_allow_empty_toml(mut self, allow: bool) -> Self {
        self.allow_empty_toml = allow;
        self
    }
}
