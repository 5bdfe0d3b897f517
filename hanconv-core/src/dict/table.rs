//! Insertion-ordered flat dictionary

use std::collections::HashMap;

use crate::dict::{Dict, DictMatch};
use crate::unicode::unit_count;

/// Flat key/value-list map preserving first-insertion order of keys.
///
/// A key whose value list has been emptied stays in the backing storage but
/// is invisible to iteration and matching; [`Table::raw_iter`] exposes it
/// for the composition operations that need to see it.
#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
    /// Longest key length in units, bounds the match scan.
    max_key_units: usize,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Table::default()
    }

    /// Builds a table from `(key, values)` pairs in order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = Table::new();
        for (key, values) in pairs {
            table.add(key.into(), values.into_iter().map(Into::into), false);
        }
        table
    }

    /// Number of keys with at least one value.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|(_, v)| !v.is_empty()).count()
    }

    /// True when no key has a value.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values for `key`, if the entry exists and is non-empty.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        let idx = *self.index.get(key)?;
        let values = &self.entries[idx].1;
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }

    /// Adds values under `key`.
    ///
    /// New values already present are skipped. With `important` the new
    /// values go in front of the existing ones instead of after.
    pub fn add<I>(&mut self, key: impl Into<String>, values: I, important: bool)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let key = key.into();
        let new: Vec<String> = values.into_iter().map(Into::into).collect();
        match self.index.get(&key) {
            Some(&idx) => {
                let old = &mut self.entries[idx].1;
                if important {
                    let mut merged: Vec<String> = Vec::with_capacity(new.len() + old.len());
                    for v in new {
                        if !merged.contains(&v) {
                            merged.push(v);
                        }
                    }
                    for v in old.drain(..) {
                        if !merged.contains(&v) {
                            merged.push(v);
                        }
                    }
                    *old = merged;
                } else {
                    for v in new {
                        if !old.contains(&v) {
                            old.push(v);
                        }
                    }
                }
            }
            None => {
                let mut merged: Vec<String> = Vec::with_capacity(new.len());
                for v in new {
                    if !merged.contains(&v) {
                        merged.push(v);
                    }
                }
                self.max_key_units = self.max_key_units.max(unit_count(&key));
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, merged));
            }
        }
    }

    /// Removes `key` by clearing its values.
    pub fn delete(&mut self, key: &str) {
        if let Some(&idx) = self.index.get(key) {
            self.entries[idx].1.clear();
        }
    }

    /// Entries with values, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// All entries including empty-valued ones, in insertion order.
    pub fn raw_iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Sorts entries by key codepoint order.
    pub fn sort_keys(&mut self) {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (idx, (key, _)) in self.entries.iter().enumerate() {
            self.index.insert(key.clone(), idx);
        }
    }
}

impl Dict for Table {
    fn match_at<'a>(&'a self, units: &[&str], pos: usize) -> Option<DictMatch<'a>> {
        let remaining = units.len().saturating_sub(pos);
        let longest = self.max_key_units.min(remaining);
        for len in (1..=longest).rev() {
            if let Some(m) = self.match_exact(units, pos, len) {
                return Some(m);
            }
        }
        None
    }

    fn match_exact<'a>(&'a self, units: &[&str], pos: usize, len: usize) -> Option<DictMatch<'a>> {
        if len == 0 || pos + len > units.len() {
            return None;
        }
        let key: String = units[pos..pos + len].concat();
        let values = self.get(&key)?;
        Some(DictMatch {
            end: pos + len,
            values,
        })
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Table {}
