//! Dictionary file formats
//!
//! Three formats are recognized by file extension:
//!
//! - **plain** (`.txt`, `.list`, `.tsv`, anything else): one
//!   `key<TAB>value value ...` entry per line. A second tab starts an
//!   ignored comment; a line without a tab maps the key to itself.
//! - **jlist** (`.json`, `.jlist`): a compact JSON object, dumped in entry
//!   order. An array of `[key, values]` pairs is also accepted on load.
//! - **tlist** (`.tlist`): a nested JSON trie with the value list under the
//!   empty key. Loads into a [`Trie`]; the other formats load into a
//!   [`Table`].

use std::fs;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::dict::{Dictionary, Table, Trie};
use crate::error::{Error, Result};

/// On-disk dictionary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Tab-separated text.
    Plain,
    /// Flat JSON object.
    JList,
    /// Nested JSON trie.
    TList,
}

impl Format {
    /// Picks the format for a file path by extension.
    pub fn from_path(path: &Path) -> Format {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") | Some("jlist") => Format::JList,
            Some("tlist") => Format::TList,
            _ => Format::Plain,
        }
    }
}

/// Parses plain-format text.
pub fn parse_plain(text: &str) -> Table {
    let mut table = Table::new();
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        let key = match fields.next() {
            Some(k) if !k.is_empty() => k,
            _ => continue,
        };
        match fields.next() {
            Some(values) => table.add(key, values.split(' '), false),
            None => table.add(key, [key], false),
        }
    }
    table
}

/// Renders a table as plain-format text.
pub fn dump_plain(table: &Table) -> String {
    let mut out = String::new();
    for (key, values) in table.iter() {
        out.push_str(key);
        out.push('\t');
        out.push_str(&values.join(" "));
        out.push('\n');
    }
    out
}

struct JList<'a>(&'a Table);

impl Serialize for JList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, values) in self.0.iter() {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

/// Renders a table as a compact JSON object in entry order.
pub fn dump_jlist(table: &Table) -> String {
    // table keys are valid UTF-8 strings, serialization cannot fail
    serde_json::to_string(&JList(table)).unwrap_or_default()
}

/// Parses a jlist document, either an object or an array of pairs.
pub fn parse_jlist(text: &str) -> Result<Table> {
    let value: Value = serde_json::from_str(text)?;
    let mut table = Table::new();
    match value {
        Value::Object(map) => {
            for (key, values) in map {
                table.add(key, string_list(&values)?, false);
            }
        }
        Value::Array(pairs) => {
            for pair in pairs {
                let items = pair
                    .as_array()
                    .filter(|a| a.len() == 2)
                    .ok_or_else(|| Error::Config("jlist pair must be [key, values]".into()))?;
                let key = items[0]
                    .as_str()
                    .ok_or_else(|| Error::Config("jlist key must be a string".into()))?;
                table.add(key, string_list(&items[1])?, false);
            }
        }
        _ => return Err(Error::Config("jlist must be an object or array".into())),
    }
    Ok(table)
}

fn string_list(value: &Value) -> Result<Vec<String>> {
    value
        .as_array()
        .ok_or_else(|| Error::Config("dictionary values must be an array".into()))?
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::Config("dictionary value must be a string".into()))
        })
        .collect()
}

struct TListNode<'a> {
    trie: &'a Trie,
    node: u32,
}

impl Serialize for TListNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (edge, child) in self.trie.children(self.node) {
            map.serialize_entry(
                edge,
                &TListNode {
                    trie: self.trie,
                    node: *child,
                },
            )?;
        }
        if let Some(values) = self.trie.values(self.node) {
            if !values.is_empty() {
                map.serialize_entry("", values)?;
            }
        }
        map.end()
    }
}

/// Renders a table as a compact nested-trie JSON document.
pub fn dump_tlist(table: &Table) -> String {
    let mut trie = Trie::new();
    for (key, values) in table.iter() {
        trie.add(key, values.iter().cloned(), false);
    }
    serde_json::to_string(&TListNode {
        trie: &trie,
        node: trie.root(),
    })
    .unwrap_or_default()
}

/// Parses a tlist document into a trie.
pub fn parse_tlist(text: &str) -> Result<Trie> {
    let value: Value = serde_json::from_str(text)?;
    let mut trie = Trie::new();
    let root = value
        .as_object()
        .ok_or_else(|| Error::Config("tlist must be an object".into()))?;
    load_tlist_node(root, String::new(), &mut trie)?;
    Ok(trie)
}

fn load_tlist_node(
    node: &serde_json::Map<String, Value>,
    prefix: String,
    trie: &mut Trie,
) -> Result<()> {
    for (edge, child) in node {
        if edge.is_empty() {
            trie.add(&prefix, string_list(child)?, false);
        } else {
            let inner = child
                .as_object()
                .ok_or_else(|| Error::Config("tlist node must be an object".into()))?;
            load_tlist_node(inner, format!("{prefix}{edge}"), trie)?;
        }
    }
    Ok(())
}

/// Renders a table in the given format.
pub fn dump(table: &Table, format: Format) -> String {
    match format {
        Format::Plain => dump_plain(table),
        Format::JList => dump_jlist(table),
        Format::TList => dump_tlist(table),
    }
}

/// Rejects entries whose key or values would corrupt the plain format.
pub fn check(table: &Table) -> Result<()> {
    for (key, values) in table.iter() {
        if key.contains(['\t', '\n', '\r']) {
            return Err(Error::Validation {
                key: key.to_string(),
                value: None,
            });
        }
        for value in values {
            if value.contains([' ', '\t', '\n', '\r']) {
                return Err(Error::Validation {
                    key: key.to_string(),
                    value: Some(value.clone()),
                });
            }
        }
    }
    Ok(())
}

/// Loads a dictionary file, picking the store by format.
pub fn load_dict(path: &Path) -> Result<Dictionary> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    match Format::from_path(path) {
        Format::Plain => Ok(Dictionary::Table(parse_plain(&text))),
        Format::JList => Ok(Dictionary::Table(parse_jlist(&text)?)),
        Format::TList => Ok(Dictionary::Trie(parse_tlist(&text)?)),
    }
}

/// Loads a dictionary file flattened into a table.
pub fn load_table(path: &Path) -> Result<Table> {
    Ok(load_dict(path)?.into_table())
}

/// Writes a table to `path` in the format its extension selects.
pub fn save_table(table: &Table, path: &Path, sort: bool, validate: bool) -> Result<()> {
    let sorted;
    let table = if sort {
        sorted = {
            let mut t = table.clone();
            t.sort_keys();
            t
        };
        &sorted
    } else {
        table
    };
    if validate {
        check(table)?;
    }
    let text = dump(table, Format::from_path(path));
    fs::write(path, text).map_err(|e| Error::io(path, e))
}
