//! Dictionary stores and composition operations
//!
//! A dictionary maps composite-unit keys to ordered value lists. Two stores
//! exist: [`Table`], an insertion-ordered flat map used for editing and
//! composition, and [`Trie`], a prefix tree used for fast conversion
//! lookups. Both implement [`Dict`] and so can back a
//! [`Converter`](crate::Converter).

mod ops;
pub mod serial;
mod table;
mod trie;

pub use ops::{expand, filter, join, load, swap, FilterMethod};
pub use table::Table;
pub use trie::Trie;

/// A dictionary hit starting at some unit position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictMatch<'a> {
    /// Unit index just past the matched key.
    pub end: usize,
    /// Conversion candidates, never empty.
    pub values: &'a [String],
}

/// Lookup interface shared by the dictionary stores.
pub trait Dict {
    /// Longest key starting at `units[pos]` that has at least one value.
    fn match_at<'a>(&'a self, units: &[&str], pos: usize) -> Option<DictMatch<'a>>;

    /// Key match of exactly `len` units at `pos`, if one exists.
    fn match_exact<'a>(&'a self, units: &[&str], pos: usize, len: usize) -> Option<DictMatch<'a>>;
}

/// Either dictionary store, chosen by file format at load time.
#[derive(Debug, Clone)]
pub enum Dictionary {
    /// Insertion-ordered flat map.
    Table(Table),
    /// Prefix tree.
    Trie(Trie),
}

impl Dict for Dictionary {
    fn match_at<'a>(&'a self, units: &[&str], pos: usize) -> Option<DictMatch<'a>> {
        match self {
            Dictionary::Table(t) => t.match_at(units, pos),
            Dictionary::Trie(t) => t.match_at(units, pos),
        }
    }

    fn match_exact<'a>(&'a self, units: &[&str], pos: usize, len: usize) -> Option<DictMatch<'a>> {
        match self {
            Dictionary::Table(t) => t.match_exact(units, pos, len),
            Dictionary::Trie(t) => t.match_exact(units, pos, len),
        }
    }
}

impl Dictionary {
    /// Entries in insertion order, skipping keys without values.
    pub fn entries(&self) -> Vec<(String, Vec<String>)> {
        match self {
            Dictionary::Table(t) => t
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_vec()))
                .collect(),
            Dictionary::Trie(t) => t.entries(),
        }
    }

    /// Flattens into a [`Table`], preserving entry order.
    pub fn into_table(self) -> Table {
        match self {
            Dictionary::Table(t) => t,
            Dictionary::Trie(t) => {
                let mut out = Table::new();
                for (key, values) in t.entries() {
                    out.add(key, values, false);
                }
                out
            }
        }
    }
}

impl From<Table> for Dictionary {
    fn from(t: Table) -> Self {
        Dictionary::Table(t)
    }
}

impl From<Trie> for Dictionary {
    fn from(t: Trie) -> Self {
        Dictionary::Trie(t)
    }
}
