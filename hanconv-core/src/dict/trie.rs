//! Prefix-tree dictionary

use crate::dict::{Dict, DictMatch};
use crate::unicode::segment;

const ROOT: u32 = 0;

#[derive(Debug, Clone, Default)]
struct Node {
    /// Child edges keyed by one composite unit, in insertion order.
    children: Vec<(String, u32)>,
    values: Option<Vec<String>>,
}

impl Node {
    fn child(&self, unit: &str) -> Option<u32> {
        self.children
            .iter()
            .find(|(edge, _)| edge == unit)
            .map(|&(_, id)| id)
    }
}

/// Prefix tree over composite units.
///
/// Nodes live in a flat arena addressed by `u32` ids, so lookups never chase
/// heap pointers per edge and the whole structure clones cheaply.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
}

impl Default for Trie {
    fn default() -> Self {
        Trie::new()
    }
}

impl Trie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Trie {
            nodes: vec![Node::default()],
        }
    }

    /// Builds a trie from `(key, values)` pairs in order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut trie = Trie::new();
        for (key, values) in pairs {
            trie.add(key.as_ref(), values.into_iter().map(Into::into), false);
        }
        trie
    }

    fn node_for_key(&self, key: &str) -> Option<u32> {
        let mut cur = ROOT;
        for unit in segment(key) {
            cur = self.nodes[cur as usize].child(unit)?;
        }
        Some(cur)
    }

    /// Values for `key`, if present and non-empty.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        let id = self.node_for_key(key)?;
        match self.nodes[id as usize].values.as_deref() {
            Some(v) if !v.is_empty() => Some(v),
            _ => None,
        }
    }

    /// Adds values under `key`, with the same merge rules as
    /// [`Table::add`](crate::Table::add).
    pub fn add<I>(&mut self, key: &str, values: I, important: bool)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut cur = ROOT;
        for unit in segment(key) {
            cur = match self.nodes[cur as usize].child(unit) {
                Some(id) => id,
                None => {
                    let id = self.nodes.len() as u32;
                    self.nodes.push(Node::default());
                    self.nodes[cur as usize]
                        .children
                        .push((unit.to_string(), id));
                    id
                }
            };
        }
        let old = self.nodes[cur as usize]
            .values
            .get_or_insert_with(Vec::new);
        let new: Vec<String> = values.into_iter().map(Into::into).collect();
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

    /// Removes `key` by clearing its values.
    pub fn delete(&mut self, key: &str) {
        if let Some(id) = self.node_for_key(key) {
            self.nodes[id as usize].values = None;
        }
    }

    /// All `(key, values)` entries in insertion (preorder) order.
    pub fn entries(&self) -> Vec<(String, Vec<String>)> {
        let mut out = Vec::new();
        self.collect(ROOT, String::new(), &mut out);
        out
    }

    fn collect(&self, id: u32, prefix: String, out: &mut Vec<(String, Vec<String>)>) {
        let node = &self.nodes[id as usize];
        for (edge, child) in &node.children {
            let key = format!("{prefix}{edge}");
            if let Some(values) = &self.nodes[*child as usize].values {
                if !values.is_empty() {
                    out.push((key.clone(), values.clone()));
                }
            }
            self.collect(*child, key, out);
        }
    }

    pub(crate) fn root(&self) -> u32 {
        ROOT
    }

    pub(crate) fn children(&self, id: u32) -> &[(String, u32)] {
        &self.nodes[id as usize].children
    }

    pub(crate) fn values(&self, id: u32) -> Option<&[String]> {
        self.nodes[id as usize].values.as_deref()
    }
}

impl Dict for Trie {
    fn match_at<'a>(&'a self, units: &[&str], pos: usize) -> Option<DictMatch<'a>> {
        let mut cur = ROOT;
        let mut best: Option<DictMatch<'a>> = None;
        for (offset, unit) in units[pos..].iter().enumerate() {
            let Some(next) = self.nodes[cur as usize].child(unit) else {
                break;
            };
            cur = next;
            match self.nodes[cur as usize].values.as_deref() {
                Some(values) if !values.is_empty() => {
                    best = Some(DictMatch {
                        end: pos + offset + 1,
                        values,
                    });
                }
                _ => {}
            }
        }
        best
    }

    fn match_exact<'a>(&'a self, units: &[&str], pos: usize, len: usize) -> Option<DictMatch<'a>> {
        if len == 0 || pos + len > units.len() {
            return None;
        }
        let mut cur = ROOT;
        for unit in &units[pos..pos + len] {
            cur = self.nodes[cur as usize].child(unit)?;
        }
        match self.nodes[cur as usize].values.as_deref() {
            Some(values) if !values.is_empty() => Some(DictMatch {
                end: pos + len,
                values,
            }),
            _ => None,
        }
    }
}
