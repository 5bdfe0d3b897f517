//! Dictionary composition pipeline
//!
//! A maker config declares how conversion dictionaries are produced from
//! source files: merged, inverted, chained, expanded, or filtered, with
//! schemes nesting arbitrarily. Outputs are rebuilt only when missing or
//! older than one of their transitive sources.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Deserialize;

use crate::convert::compile_exclusion;
use crate::dict::{expand, filter, join, load, serial, swap, Dictionary, FilterMethod, Table};
use crate::error::{Error, Result};

/// A maker configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Human-readable scheme name.
    pub name: Option<String>,
    /// Other configs that must be built first.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Dictionaries to build, in order. The last one is the product.
    pub dicts: Vec<DictScheme>,
}

/// One dictionary in a config: either a plain file reference or a build
/// recipe.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DictScheme {
    /// An existing dictionary file.
    File(String),
    /// A composition recipe.
    Node(Box<DictNode>),
}

/// Composition recipe for one dictionary.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DictNode {
    /// Output file. Required at the top level; nested recipes without a
    /// file are built in memory.
    pub file: Option<String>,
    /// Composition mode.
    #[serde(default)]
    pub mode: Mode,
    /// Source dictionaries.
    #[serde(default)]
    pub src: Vec<DictScheme>,
    /// Sort entries by key before writing.
    #[serde(default)]
    pub sort: bool,
    /// Validate entries against the plain format before writing.
    #[serde(default)]
    pub check: bool,
    /// Placeholder strings for `expand`, paired with `src[1..]`.
    #[serde(default)]
    pub placeholders: Vec<String>,
    /// Removal method for `filter`.
    pub method: Option<String>,
    /// Value regex to retain for `filter`.
    pub include: Option<String>,
    /// Value regex to drop for `filter`.
    pub exclude: Option<String>,
}

/// Dictionary composition mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Union of the sources.
    #[default]
    Load,
    /// Inversion of the single source.
    Swap,
    /// Chaining of exactly two sources.
    Join,
    /// Placeholder expansion of the first source by the rest.
    Expand,
    /// Filtering of the first source by the rest.
    Filter,
}

/// Builds dictionaries from config files, memoizing finished configs.
#[derive(Debug, Default)]
pub struct Maker {
    config_dirs: Vec<PathBuf>,
    made: HashMap<PathBuf, PathBuf>,
    making: HashSet<PathBuf>,
}

impl Maker {
    /// Creates a maker with no extra config search directories.
    pub fn new() -> Self {
        Maker::default()
    }

    /// Adds a directory searched when resolving config names.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dirs.push(dir.into());
        self
    }

    /// Builds every dictionary of `config` and returns the path of the
    /// last one.
    pub fn make(&mut self, config: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.resolve_config(config.as_ref(), None)?;
        self.make_config(&path)
    }

    fn make_config(&mut self, path: &Path) -> Result<PathBuf> {
        let canonical = fs::canonicalize(path).map_err(|e| Error::io(path, e))?;
        if let Some(out) = self.made.get(&canonical) {
            return Ok(out.clone());
        }
        if !self.making.insert(canonical.clone()) {
            return Err(Error::CircularRequirement(canonical));
        }
        let result = self.make_config_inner(path);
        self.making.remove(&canonical);
        let out = result?;
        self.made.insert(canonical, out.clone());
        Ok(out)
    }

    fn make_config_inner(&mut self, path: &Path) -> Result<PathBuf> {
        let config = parse_config(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        match &config.name {
            Some(name) => log::info!("making {name}"),
            None => log::info!("making {}", path.display()),
        }
        for req in &config.requires {
            let req_path = self.resolve_config(Path::new(req), Some(&base))?;
            self.make_config(&req_path)?;
        }
        let mut last = None;
        for scheme in &config.dicts {
            last = Some(self.make_scheme(scheme, &base)?);
        }
        last.ok_or_else(|| Error::Config(format!("config has no dicts: {}", path.display())))
    }

    /// Builds one top-level scheme and returns its file path.
    fn make_scheme(&mut self, scheme: &DictScheme, base: &Path) -> Result<PathBuf> {
        match scheme {
            DictScheme::File(name) => {
                let path = resolve(name, base);
                if !path.is_file() {
                    return Err(Error::MissingSource(path));
                }
                Ok(path)
            }
            DictScheme::Node(node) => self.make_node(node, base),
        }
    }

    fn make_node(&mut self, node: &DictNode, base: &Path) -> Result<PathBuf> {
        let file = node
            .file
            .as_deref()
            .ok_or_else(|| Error::Config("dict scheme with src requires a file".into()))?;
        let out = resolve(file, base);
        if node.src.is_empty() {
            // a file-only scheme is a plain reference
            if !out.is_file() {
                return Err(Error::MissingSource(out));
            }
            return Ok(out);
        }
        if !self.is_stale(node, base)? {
            log::debug!("up-to-date: {}", out.display());
            return Ok(out);
        }
        // compose already applied node.sort
        let table = self.compose(node, base)?;
        serial::save_table(&table, &out, false, node.check)?;
        log::info!("built {}", out.display());
        Ok(out)
    }

    /// Loads a source scheme as a dictionary, building it first if it is a
    /// recipe with an output file.
    fn build_source(&mut self, scheme: &DictScheme, base: &Path) -> Result<Dictionary> {
        match scheme {
            DictScheme::File(name) => {
                let path = resolve(name, base);
                if !path.is_file() {
                    return Err(Error::MissingSource(path));
                }
                serial::load_dict(&path)
            }
            DictScheme::Node(node) => {
                if node.file.is_some() {
                    let path = self.make_node(node, base)?;
                    serial::load_dict(&path)
                } else {
                    Ok(Dictionary::Table(self.compose(node, base)?))
                }
            }
        }
    }

    /// Runs a recipe's composition mode over its sources.
    fn compose(&mut self, node: &DictNode, base: &Path) -> Result<Table> {
        let sources: Vec<Dictionary> = node
            .src
            .iter()
            .map(|s| self.build_source(s, base))
            .collect::<Result<_>>()?;
        let mut table = match node.mode {
            Mode::Load => load(sources),
            Mode::Swap => {
                let [source] = &sources[..] else {
                    return Err(Error::Config("swap takes exactly one src".into()));
                };
                swap(source)
            }
            Mode::Join => {
                let [first, second] = &sources[..] else {
                    return Err(Error::Config("join takes exactly two src".into()));
                };
                join(first, second)
            }
            Mode::Expand => {
                let (template, rest) = sources
                    .split_first()
                    .ok_or_else(|| Error::Config("expand requires a template src".into()))?;
                if rest.len() != node.placeholders.len() {
                    return Err(Error::Config(
                        "expand requires one src per placeholder after the template".into(),
                    ));
                }
                let paired: Vec<(String, Dictionary)> = node
                    .placeholders
                    .iter()
                    .cloned()
                    .zip(rest.iter().cloned())
                    .collect();
                expand(template, &paired)
            }
            Mode::Filter => {
                let (subject, removals) = sources
                    .split_first()
                    .ok_or_else(|| Error::Config("filter requires a src".into()))?;
                let method = match node.method.as_deref() {
                    Some(name) => FilterMethod::parse(name)?,
                    None => FilterMethod::default(),
                };
                let include = node
                    .include
                    .as_deref()
                    .map(compile_exclusion)
                    .transpose()?;
                let exclude = node
                    .exclude
                    .as_deref()
                    .map(compile_exclusion)
                    .transpose()?;
                filter(subject, removals, method, include.as_ref(), exclude.as_ref())
            }
        };
        if node.sort {
            table.sort_keys();
        }
        Ok(table)
    }

    /// True when the recipe's output is missing or older than any
    /// transitive source.
    fn is_stale(&self, node: &DictNode, base: &Path) -> Result<bool> {
        let Some(file) = node.file.as_deref() else {
            return Ok(true);
        };
        let out = resolve(file, base);
        let Some(out_mtime) = mtime(&out) else {
            return Ok(true);
        };
        for src in &node.src {
            if self.source_is_newer(src, base, out_mtime)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn source_is_newer(
        &self,
        scheme: &DictScheme,
        base: &Path,
        out_mtime: SystemTime,
    ) -> Result<bool> {
        match scheme {
            DictScheme::File(name) => {
                let path = resolve(name, base);
                match mtime(&path) {
                    Some(m) => Ok(m > out_mtime),
                    None => Err(Error::MissingSource(path)),
                }
            }
            DictScheme::Node(node) => {
                if self.is_stale(node, base)? {
                    return Ok(true);
                }
                match node.file.as_deref() {
                    Some(file) => {
                        let path = resolve(file, base);
                        Ok(mtime(&path).is_some_and(|m| m > out_mtime))
                    }
                    None => Ok(false),
                }
            }
        }
    }

    /// Resolves a config reference: as given, then relative to the
    /// referencing config, then in the search directories, each with
    /// `.json`/`.toml` autocompletion.
    fn resolve_config(&self, name: &Path, base: Option<&Path>) -> Result<PathBuf> {
        let mut roots: Vec<Option<&Path>> = vec![None];
        if let Some(base) = base {
            roots.push(Some(base));
        }
        for dir in &self.config_dirs {
            roots.push(Some(dir));
        }
        for root in roots {
            let candidate = match root {
                Some(root) if name.is_relative() => root.join(name),
                _ => name.to_path_buf(),
            };
            if candidate.is_file() {
                return Ok(candidate);
            }
            for ext in ["json", "toml"] {
                // append rather than with_extension, a dotted config name
                // like scheme.v2 must not collapse onto scheme.json
                let mut with_ext = candidate.clone().into_os_string();
                with_ext.push(format!(".{ext}"));
                let with_ext = PathBuf::from(with_ext);
                if with_ext.is_file() {
                    return Ok(with_ext);
                }
            }
        }
        Err(Error::MissingSource(name.to_path_buf()))
    }
}

/// Parses a config file, JSON or TOML by extension.
pub fn parse_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(toml::from_str(&text)?),
        _ => Ok(serde_json::from_str(&text)?),
    }
}

fn resolve(name: &str, base: &Path) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
