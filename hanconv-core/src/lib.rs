//! Simplified/Traditional Chinese script conversion
//!
//! This crate converts text between Chinese scripts with composable
//! dictionaries. It has three parts:
//!
//! - a segmenter that walks text in *composite units*, keeping ideographic
//!   description sequences and combining marks together
//!   ([`unicode`](crate::unicode)),
//! - a greedy longest-match conversion engine with regex-based exclusion
//!   regions ([`Converter`]),
//! - a declarative pipeline that builds conversion dictionaries from
//!   sources by merging, inverting, chaining, expanding, and filtering
//!   them, rebuilding only what is out of date ([`Maker`]).
//!
//! # Example
//!
//! ```rust
//! use hanconv_core::{Converter, Table};
//!
//! let table = Table::from_pairs([
//!     ("干", vec!["幹", "乾", "干"]),
//!     ("干姜", vec!["乾薑"]),
//! ]);
//! let converter = Converter::new(table);
//! assert_eq!(converter.convert_text("干姜", None), "乾薑");
//! ```

#![warn(missing_docs)]

pub mod convert;
pub mod dict;
pub mod error;
pub mod maker;
pub mod unicode;

pub use convert::{compile_exclusion, ConvItem, Convert, Converter, OutputFormat};
pub use dict::{Dict, DictMatch, Dictionary, Table, Trie};
pub use error::{Error, Result};
pub use maker::{Config, DictNode, DictScheme, Maker, Mode};
