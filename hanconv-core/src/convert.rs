//! Text conversion engine
//!
//! A [`Converter`] drives greedy longest-match conversion over the composite
//! units of the input. Conversion is lazy: [`Converter::convert`] returns an
//! iterator of [`ConvItem`]s that together cover the input exactly.

use std::path::Path;

use regex::Regex;
use serde_json::{json, Value};

use crate::dict::{serial, Dict, Dictionary};
use crate::error::{Error, Result};
use crate::unicode::Segments;

/// One piece of converted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvItem {
    /// A unit with no dictionary hit, passed through.
    Literal(String),
    /// Text kept as is because an exclusion pattern matched it.
    Excluded(String),
    /// A dictionary hit.
    Match {
        /// The matched key, one string per unit.
        key: Vec<String>,
        /// Conversion candidates, best first.
        values: Vec<String>,
    },
}

/// Rendering styles for [`Converter::convert_formatted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text, first candidate wins.
    #[default]
    Txt,
    /// Text with `{{key->v1|v2}}` conversion markers.
    Txtm,
    /// A JSON array of items.
    Json,
}

impl OutputFormat {
    /// Parses the config/CLI spelling of a format name.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "txt" => Ok(OutputFormat::Txt),
            "txtm" => Ok(OutputFormat::Txtm),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::Config(format!("unknown output format: {name}"))),
        }
    }
}

/// Compiles an exclusion pattern, unwrapping `/pattern/flags` notation.
pub fn compile_exclusion(pattern: &str) -> Result<Regex> {
    let unwrapped = match pattern.strip_prefix('/').and_then(|rest| rest.rfind('/')) {
        Some(idx) => {
            let body = &pattern[1..idx + 1];
            let flags = &pattern[idx + 2..];
            if flags.is_empty() {
                format!("(?:{body})")
            } else {
                format!("(?{flags}:{body})")
            }
        }
        None => pattern.to_string(),
    };
    Ok(Regex::new(&unwrapped)?)
}

fn is_return_group(name: &str) -> bool {
    name.strip_prefix("return")
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
}

enum Region<'a> {
    Text(&'a str),
    Keep(String),
}

fn split_regions<'a>(text: &'a str, exclude: Option<&Regex>) -> Vec<Region<'a>> {
    let Some(re) = exclude else {
        return vec![Region::Text(text)];
    };
    let return_groups: Vec<&str> = re
        .capture_names()
        .flatten()
        .filter(|name| is_return_group(name))
        .collect();
    let mut regions = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always participates");
        if whole.start() > last {
            regions.push(Region::Text(&text[last..whole.start()]));
        }
        let kept = return_groups
            .iter()
            .find_map(|name| caps.name(name))
            .map(|g| g.as_str())
            .unwrap_or_else(|| whole.as_str());
        if !kept.is_empty() {
            regions.push(Region::Keep(kept.to_string()));
        }
        last = whole.end();
    }
    if last < text.len() {
        regions.push(Region::Text(&text[last..]));
    }
    regions
}

/// Lazy stream of conversion items.
pub struct Convert<'a> {
    dict: &'a Dictionary,
    regions: std::vec::IntoIter<Region<'a>>,
    units: Vec<&'a str>,
    pos: usize,
}

impl Iterator for Convert<'_> {
    type Item = ConvItem;

    fn next(&mut self) -> Option<ConvItem> {
        loop {
            if self.pos < self.units.len() {
                if let Some(m) = self.dict.match_at(&self.units, self.pos) {
                    let key = self.units[self.pos..m.end]
                        .iter()
                        .map(|u| u.to_string())
                        .collect();
                    let values = m.values.to_vec();
                    self.pos = m.end;
                    return Some(ConvItem::Match { key, values });
                }
                let unit = self.units[self.pos].to_string();
                self.pos += 1;
                return Some(ConvItem::Literal(unit));
            }
            match self.regions.next()? {
                Region::Keep(text) => return Some(ConvItem::Excluded(text)),
                Region::Text(text) => {
                    self.units = Segments::new(text).collect();
                    self.pos = 0;
                }
            }
        }
    }
}

/// Script converter over a loaded dictionary.
#[derive(Debug, Clone)]
pub struct Converter {
    dict: Dictionary,
}

impl Converter {
    /// Wraps an in-memory dictionary.
    pub fn new(dict: impl Into<Dictionary>) -> Self {
        Converter { dict: dict.into() }
    }

    /// Loads a dictionary file, choosing the store by its format.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Converter {
            dict: serial::load_dict(path)?,
        })
    }

    /// The backing dictionary.
    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    /// Lazily converts `text`, skipping spans matched by `exclude`.
    pub fn convert<'a>(&'a self, text: &'a str, exclude: Option<&Regex>) -> Convert<'a> {
        Convert {
            dict: &self.dict,
            regions: split_regions(text, exclude).into_iter(),
            units: Vec::new(),
            pos: 0,
        }
    }

    /// Converts to plain text, taking the first candidate of every match.
    pub fn convert_text(&self, text: &str, exclude: Option<&Regex>) -> String {
        let mut out = String::with_capacity(text.len());
        for item in self.convert(text, exclude) {
            match item {
                ConvItem::Literal(s) | ConvItem::Excluded(s) => out.push_str(&s),
                ConvItem::Match { values, .. } => out.push_str(&values[0]),
            }
        }
        out
    }

    /// Converts and renders in the requested format.
    pub fn convert_formatted(
        &self,
        text: &str,
        format: OutputFormat,
        exclude: Option<&Regex>,
    ) -> String {
        match format {
            OutputFormat::Txt => self.convert_text(text, exclude),
            OutputFormat::Txtm => {
                let mut out = String::new();
                for item in self.convert(text, exclude) {
                    match item {
                        ConvItem::Literal(s) | ConvItem::Excluded(s) => out.push_str(&s),
                        ConvItem::Match { key, values } => {
                            let key = key.concat();
                            if values.len() == 1 && values[0] == key {
                                out.push_str(&format!("{{{{{key}}}}}"));
                            } else {
                                out.push_str(&format!("{{{{{key}->{}}}}}", values.join("|")));
                            }
                        }
                    }
                }
                out
            }
            OutputFormat::Json => {
                let items: Vec<Value> = self
                    .convert(text, exclude)
                    .map(|item| match item {
                        ConvItem::Literal(s) => json!(s),
                        ConvItem::Excluded(s) => json!([s]),
                        ConvItem::Match { key, values } => json!([key, values]),
                    })
                    .collect();
                // in-memory values always serialize
                serde_json::to_string(&items).unwrap_or_default()
            }
        }
    }
}
