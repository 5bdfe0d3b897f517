//! hanconv CLI library
//!
//! Command-line frontend over the conversion engine and the dictionary
//! pipeline in `hanconv-core`.

pub mod commands;
