//! The document tree and the insertion rules that build it.
//!
//! A [`File`] owns an ordered list of [`Node`]s; every [`Table`] owns its own
//! children the same way. Nodes never point back to their parents. While
//! building, the table a statement belongs to is addressed by its path of
//! names from the root, and each path segment resolves to the *last* sibling
//! table carrying that name. That is what attaches `[fruit.physical]` to the
//! most recent `[[fruit]]` element.
//!
//! Tables that exist only because a longer path or a dotted key needed them
//! are *synthetic*:
//!
//! ```rust
//! let file = toml_tree::parse_str("[a.b.c]\n[a.d]\n[d]\n[d.a]").unwrap();
//!
//! let real: Vec<&str> = file.real_tables().map(|t| t.full_name()).collect();
//! assert_eq!(real, ["a.b.c", "a.d", "d", "d.a"]);
//!
//! let all: Vec<&str> = file.tables().map(|t| t.full_name()).collect();
//! assert_eq!(all, ["a", "a.b", "a.b.c", "a.d", "d", "d.a"]);
//! ```

use crate::{Error, Key, Result, Value};
use indexmap::map::Entry as MapEntry;
use indexmap::IndexMap;
use log::debug;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::slice;

/// A child of a [`File`] or a [`Table`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Table(Table),
    KeyValue(KeyValue),
}

impl Node {
    /// Source line the node was created from.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Node::Table(table) => table.line,
            Node::KeyValue(kv) => kv.line,
        }
    }

    /// The source text the node was built from.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Node::Table(table) => &table.content,
            Node::KeyValue(kv) => &kv.content,
        }
    }

    /// Table name or key name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Node::Table(table) => table.name(),
            Node::KeyValue(kv) => kv.name(),
        }
    }

    /// Owned children; always empty for key-value leaves.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Table(table) => &table.children,
            Node::KeyValue(_) => &[],
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Node::Table(table) => Some(table),
            Node::KeyValue(_) => None,
        }
    }

    #[must_use]
    pub fn as_key_value(&self) -> Option<&KeyValue> {
        match self {
            Node::KeyValue(kv) => Some(kv),
            Node::Table(_) => None,
        }
    }
}

/// A `key = value` leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValue {
    key: Key,
    value: Value,
    line: usize,
    content: String,
}

impl KeyValue {
    /// Builds a leaf whose content is rendered from the key and the value.
    #[must_use]
    pub fn new(key: Key, value: Value, line: usize) -> Self {
        let content = format!("{} = {}", key, value);
        KeyValue {
            key,
            value,
            line,
            content,
        }
    }

    pub(crate) fn with_content(key: Key, value: Value, line: usize, content: String) -> Self {
        KeyValue {
            key,
            value,
            line,
            content,
        }
    }

    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The last part of the key.
    #[must_use]
    pub fn name(&self) -> &str {
        self.key.name()
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Whether a table is a plain table or one element of an array of tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    /// `[name]`, unique per full name.
    Primitive,
    /// `[[name]]`; `index` counts the earlier elements of the same array.
    ArrayElement { index: usize },
}

/// How a table came to exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origin {
    /// Written as a header or as an inline table.
    Declared,
    /// Prefix of a longer header path.
    Implicit,
    /// Prefix of a dotted key.
    DottedKey,
}

/// A table node.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    path: Vec<String>,
    full_name: String,
    kind: TableKind,
    origin: Origin,
    declared: bool,
    line: usize,
    content: String,
    children: Vec<Node>,
}

impl Table {
    fn new(path: Vec<String>, kind: TableKind, origin: Origin, line: usize, content: String) -> Self {
        Table {
            full_name: path.join("."),
            path,
            kind,
            declared: origin == Origin::Declared,
            origin,
            line,
            content,
            children: Vec::new(),
        }
    }

    fn synthetic(path: Vec<String>, origin: Origin, line: usize) -> Self {
        let content = format!("[{}]", path.join("."));
        Table::new(path, TableKind::Primitive, origin, line, content)
    }

    /// Dot-joined path from the root, e.g. `a.b.c`.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Last segment of the path.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.last().map_or("", String::as_str)
    }

    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Occurrence index of an array-of-tables element.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self.kind {
            TableKind::ArrayElement { index } => Some(index),
            TableKind::Primitive => None,
        }
    }

    #[must_use]
    pub fn is_array_element(&self) -> bool {
        matches!(self.kind, TableKind::ArrayElement { .. })
    }

    /// `true` for tables created only to hold a longer path or a dotted key.
    ///
    /// A header naming a table that a dotted key already created leaves the
    /// table synthetic.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.origin != Origin::Declared
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct key-value children in declaration order.
    pub fn key_values(&self) -> impl Iterator<Item = &KeyValue> + '_ {
        self.children.iter().filter_map(Node::as_key_value)
    }

    /// Direct sub-tables in declaration order.
    pub fn sub_tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.children.iter().filter_map(Node::as_table)
    }

    /// Value of a direct key-value child.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        find_value(&self.children, key)
    }
}

/// Root of a parsed document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct File {
    children: Vec<Node>,
}

impl File {
    #[must_use]
    pub fn new() -> Self {
        File::default()
    }

    /// Top-level key-values and tables in declaration order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Value of a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        find_value(&self.children, key)
    }

    /// Every table in the tree, synthetic ones included, in pre-order.
    #[must_use]
    pub fn tables(&self) -> Tables<'_> {
        Tables {
            stack: vec![self.children.iter()],
        }
    }

    /// Every table that was declared in the input, in pre-order.
    pub fn real_tables(&self) -> impl Iterator<Item = &Table> + '_ {
        self.tables().filter(|table| !table.is_synthetic())
    }

    /// First primitive table with the given full name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let file = toml_tree::parse_str("[[fruit]]\n[fruit.physical]\ncolor = 'red'").unwrap();
    /// let physical = file.find_table("fruit.physical").unwrap();
    /// assert_eq!(physical.get("color").and_then(|v| v.as_str()), Some("red"));
    /// assert!(file.find_table("fruit").is_none());
    /// ```
    #[must_use]
    pub fn find_table(&self, full_name: &str) -> Option<&Table> {
        self.tables()
            .find(|table| !table.is_array_element() && table.full_name == full_name)
    }

    /// Consumes the tree and returns a new root owning only the children of
    /// the named table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRequiredProperty`] when no primitive table has
    /// that full name.
    pub fn into_subtree(self, full_name: &str) -> Result<File> {
        match take_table(self.children, full_name) {
            Some(table) => {
                debug!(
                    "extracted table [{}] with {} children",
                    full_name,
                    table.children.len()
                );
                Ok(File {
                    children: table.children,
                })
            }
            None => Err(Error::missing_table(full_name)),
        }
    }

    /// Declares the table at `path` from a `[path]` or `[[path]]` header.
    pub(crate) fn insert_table(
        &mut self,
        path: &[String],
        array: bool,
        line: usize,
        content: String,
    ) -> Result<()> {
        declare_table(&mut self.children, path, array, line, content, Origin::Implicit)
    }

    /// Adds a key-value to the table at `table_path`, expanding dotted keys
    /// and inline tables into tables.
    pub(crate) fn insert_key_value(&mut self, table_path: &[String], kv: KeyValue) -> Result<()> {
        insert_key_value(&mut self.children, table_path, kv)
    }
}

/// Pre-order iterator over every table of a [`File`].
#[derive(Debug, Clone)]
pub struct Tables<'a> {
    stack: Vec<slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Tables<'a> {
    type Item = &'a Table;

    fn next(&mut self) -> Option<&'a Table> {
        loop {
            let siblings = self.stack.last_mut()?;
            match siblings.next() {
                Some(Node::Table(table)) => {
                    self.stack.push(table.children.iter());
                    return Some(table);
                }
                Some(Node::KeyValue(_)) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

fn find_value<'a>(children: &'a [Node], key: &str) -> Option<&'a Value> {
    children
        .iter()
        .filter_map(Node::as_key_value)
        .find(|kv| kv.name() == key)
        .map(KeyValue::value)
}

fn take_table(children: Vec<Node>, full_name: &str) -> Option<Table> {
    for node in children {
        if let Node::Table(table) = node {
            if !table.is_array_element() && table.full_name == full_name {
                return Some(table);
            }
            if let Some(found) = take_table(table.children, full_name) {
                return Some(found);
            }
        }
    }
    None
}

fn declare_table(
    root: &mut Vec<Node>,
    path: &[String],
    array: bool,
    line: usize,
    content: String,
    prefix_origin: Origin,
) -> Result<()> {
    let Some((name, prefix)) = path.split_last() else {
        return Err(Error::parse(line, "table header has an empty name"));
    };
    let siblings = open_path(root, prefix, line, prefix_origin)?;
    let full_name = path.join(".");

    let Some(idx) = last_table_named(siblings, name) else {
        ensure_no_value(siblings, name, &full_name, line)?;
        let kind = if array {
            debug!("array of tables [[{}]] starts at line {}", full_name, line);
            TableKind::ArrayElement { index: 0 }
        } else {
            TableKind::Primitive
        };
        siblings.push(Node::Table(Table::new(
            path.to_vec(),
            kind,
            Origin::Declared,
            line,
            content,
        )));
        return Ok(());
    };

    let existing = table_at(siblings, idx);
    match (array, existing.kind) {
        (false, TableKind::Primitive) => {
            if existing.declared {
                return Err(Error::conflict(
                    line,
                    format!(
                        "table [{}] is declared twice, first declaration at line {}",
                        full_name, existing.line
                    ),
                ));
            }
            existing.declared = true;
            if existing.origin == Origin::Implicit {
                existing.origin = Origin::Declared;
            }
            existing.line = line;
            existing.content = content;
            Ok(())
        }
        (false, TableKind::ArrayElement { .. }) => Err(Error::conflict(
            line,
            format!(
                "table [{}] is already declared as an array of tables",
                full_name
            ),
        )),
        (true, TableKind::Primitive) => Err(Error::conflict(
            line,
            format!(
                "array of tables [[{}]] is already declared as a table at line {}",
                full_name, existing.line
            ),
        )),
        (true, TableKind::ArrayElement { index }) => {
            debug!(
                "array of tables [[{}]] element {} at line {}",
                full_name,
                index + 1,
                line
            );
            siblings.push(Node::Table(Table::new(
                path.to_vec(),
                TableKind::ArrayElement { index: index + 1 },
                Origin::Declared,
                line,
                content,
            )));
            Ok(())
        }
    }
}

fn insert_key_value(root: &mut Vec<Node>, table_path: &[String], kv: KeyValue) -> Result<()> {
    let KeyValue {
        key,
        value,
        line,
        content,
    } = kv;

    let mut path = table_path.to_vec();
    let key = if key.is_dotted() {
        let parts = key.parts();
        path.extend(parts[..parts.len() - 1].iter().cloned());
        key.into_leaf()
    } else {
        key
    };

    match value {
        Value::InlineTable(pairs) => {
            path.push(key.name().to_string());
            declare_table(root, &path, false, line, content, Origin::DottedKey)?;
            for (inner_key, inner_value) in pairs {
                insert_key_value(root, &path, KeyValue::new(inner_key, inner_value, line))?;
            }
            Ok(())
        }
        value => {
            let siblings = open_path(root, &path, line, Origin::DottedKey)?;
            ensure_no_duplicate(siblings, key.name(), &path, line)?;
            siblings.push(Node::KeyValue(KeyValue::with_content(
                key, value, line, content,
            )));
            Ok(())
        }
    }
}

/// Walks `path` from `children`, creating synthetic tables for missing
/// segments, and returns the children of the last one.
fn open_path<'a>(
    mut children: &'a mut Vec<Node>,
    path: &[String],
    line: usize,
    origin: Origin,
) -> Result<&'a mut Vec<Node>> {
    for depth in 0..path.len() {
        children = &mut child_table(children, &path[..=depth], line, origin)?.children;
    }
    Ok(children)
}

fn child_table<'a>(
    children: &'a mut Vec<Node>,
    path: &[String],
    line: usize,
    origin: Origin,
) -> Result<&'a mut Table> {
    let name = path.last().map_or("", String::as_str);
    if let Some(idx) = last_table_named(children, name) {
        return Ok(table_at(children, idx));
    }

    let full_name = path.join(".");
    ensure_no_value(children, name, &full_name, line)?;
    debug!("creating synthetic table [{}] at line {}", full_name, line);
    children.push(Node::Table(Table::synthetic(path.to_vec(), origin, line)));
    let idx = children.len() - 1;
    Ok(table_at(children, idx))
}

fn last_table_named(children: &[Node], name: &str) -> Option<usize> {
    children
        .iter()
        .rposition(|node| matches!(node, Node::Table(table) if table.name() == name))
}

fn table_at(children: &mut [Node], idx: usize) -> &mut Table {
    match &mut children[idx] {
        Node::Table(table) => table,
        Node::KeyValue(_) => unreachable!("node {} was located as a table", idx),
    }
}

fn ensure_no_value(children: &[Node], name: &str, full_name: &str, line: usize) -> Result<()> {
    match children
        .iter()
        .filter_map(Node::as_key_value)
        .find(|kv| kv.name() == name)
    {
        Some(kv) => Err(Error::conflict(
            line,
            format!(
                "cannot define table [{}]: key <{}> is already defined at line {}",
                full_name, name, kv.line
            ),
        )),
        None => Ok(()),
    }
}

fn ensure_no_duplicate(children: &[Node], name: &str, path: &[String], line: usize) -> Result<()> {
    let owner = if path.is_empty() {
        "the root table".to_string()
    } else {
        format!("table [{}]", path.join("."))
    };
    for node in children {
        match node {
            Node::KeyValue(kv) if kv.name() == name => {
                return Err(Error::conflict(
                    line,
                    format!(
                        "duplicate key <{}> in {}, first defined at line {}",
                        name, owner, kv.line
                    ),
                ));
            }
            Node::Table(table) if table.name() == name => {
                return Err(Error::conflict(
                    line,
                    format!(
                        "key <{}> in {} conflicts with table [{}]",
                        name, owner, table.full_name
                    ),
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

/// A map entry while grouping the children of one table.
enum Entry<'a> {
    Value(&'a Value),
    Table(&'a Table),
    Array(Vec<&'a Table>),
}

impl Serialize for Entry<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Entry::Value(value) => value.serialize(serializer),
            Entry::Table(table) => table.serialize(serializer),
            Entry::Array(tables) => serializer.collect_seq(tables),
        }
    }
}

fn serialize_children<S>(children: &[Node], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut entries: IndexMap<&str, Entry<'_>> = IndexMap::with_capacity(children.len());
    for node in children {
        match node {
            Node::KeyValue(kv) => {
                entries.insert(kv.name(), Entry::Value(&kv.value));
            }
            Node::Table(table) if table.is_array_element() => match entries.entry(table.name()) {
                MapEntry::Occupied(mut occupied) => {
                    if let Entry::Array(elements) = occupied.get_mut() {
                        elements.push(table);
                    }
                }
                MapEntry::Vacant(vacant) => {
                    vacant.insert(Entry::Array(vec![table]));
                }
            },
            Node::Table(table) => {
                entries.insert(table.name(), Entry::Table(table));
            }
        }
    }

    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (name, entry) in &entries {
        map.serialize_entry(name, entry)?;
    }
    map.end()
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_children(&self.children, serializer)
    }
}

impl Serialize for File {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_children(&self.children, serializer)
    }
}
