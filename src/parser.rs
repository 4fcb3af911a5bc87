//! The line-by-line tree builder.
//!
//! [`TomlParser`] classifies each input line, parses keys and values, and
//! inserts the results into a [`File`]. The only state carried between lines
//! is the path of the table the following key-values belong to; it is local
//! to one call, so a parser can be reused and shared freely.
//!
//! ```rust
//! use toml_tree::{TomlConfig, TomlParser, Value};
//!
//! let parser = TomlParser::new(TomlConfig::default());
//! let file = parser
//!     .parse_str("title = \"demo\"\n\n[owner]\nname = 'Tom'\n")
//!     .unwrap();
//!
//! assert_eq!(file.get("title"), Some(&Value::BasicString("demo".into())));
//! let owner = file.find_table("owner").unwrap();
//! assert_eq!(owner.get("name").and_then(|v| v.as_str()), Some("Tom"));
//! ```

use crate::statement::{classify, strip_comment, Statement};
use crate::tree::{File, KeyValue};
use crate::value::parse_value;
use crate::{Error, Key, Result, TomlConfig};
use log::trace;

/// Builds document trees from TOML text.
#[derive(Clone, Debug, Default)]
pub struct TomlParser {
    config: TomlConfig,
}

impl TomlParser {
    #[must_use]
    pub fn new(config: TomlConfig) -> Self {
        TomlParser { config }
    }

    #[must_use]
    pub fn config(&self) -> &TomlConfig {
        &self.config
    }

    /// Parses a whole document. Lines end with `\n` or `\r\n`.
    ///
    /// # Errors
    ///
    /// Returns the first parse error or structural conflict, tagged with its
    /// 1-based line number.
    pub fn parse_str(&self, text: &str) -> Result<File> {
        self.parse_lines(text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)))
    }

    /// Parses a document that is already split into lines.
    ///
    /// # Errors
    ///
    /// Same as [`TomlParser::parse_str`]. With
    /// [`TomlConfig::allow_empty_toml`] unset, a document without statements
    /// fails at line 1.
    pub fn parse_lines<I>(&self, lines: I) -> Result<File>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut file = File::new();
        let mut current: Vec<String> = Vec::new();
        let mut statements = 0usize;

        for (idx, line) in lines.into_iter().enumerate() {
            let number = idx + 1;
            let text = line.as_ref();
            let statement = classify(text, number)?;
            trace!("line {}: {:?}", number, statement);

            match statement {
                Statement::Empty => continue,
                Statement::Table(name) => {
                    current = header_path(name, number)?;
                    file.insert_table(&current, false, number, content_of(text))?;
                }
                Statement::ArrayOfTables(name) => {
                    current = header_path(name, number)?;
                    file.insert_table(&current, true, number, content_of(text))?;
                }
                Statement::KeyValue { key, value } => {
                    let key = Key::parse(key, number)?;
                    let value = parse_value(value, number, &self.config)?;
                    let kv = KeyValue::with_content(key, value, number, content_of(text));
                    file.insert_key_value(&current, kv)?;
                }
            }
            statements += 1;
        }

        if statements == 0 && !self.config.allow_empty_toml {
            return Err(Error::parse(
                1,
                "the input has no tables or key-value pairs, \
                 but empty documents are not allowed by the configuration",
            ));
        }
        Ok(file)
    }

    /// Parses a document and keeps only the contents of one table.
    ///
    /// # Errors
    ///
    /// Any parse error, or [`Error::MissingRequiredProperty`] when the table
    /// does not exist.
    pub fn partial_str(&self, text: &str, table: &str) -> Result<File> {
        self.parse_str(text)?.into_subtree(table)
    }

    /// Line-sequence counterpart of [`TomlParser::partial_str`].
    ///
    /// # Errors
    ///
    /// Same as [`TomlParser::partial_str`].
    pub fn partial_lines<I>(&self, lines: I, table: &str) -> Result<File>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.parse_lines(lines)?.into_subtree(table)
    }
}

fn header_path(name: &str, line: usize) -> Result<Vec<String>> {
    if name.is_empty() {
        return Err(Error::parse(line, "table header has an empty name"));
    }
    Ok(Key::parse(name, line)?.parts().to_vec())
}

fn content_of(text: &str) -> String {
    strip_comment(text).trim().to_string()
}
