//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod convert;
pub mod dictutil;
pub mod make;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert text using a config or dictionary files
    Convert(convert::ConvertArgs),

    /// Build dictionaries from config files
    Make(make::MakeArgs),

    /// Sort a dictionary file by key
    Sort(dictutil::SortArgs),

    /// Swap the keys and values of a dictionary file
    Swap(dictutil::SwapArgs),

    /// Merge dictionary files into one
    Merge(dictutil::MergeArgs),

    /// Find a keyword in a dictionary file
    Find(dictutil::FindArgs),
}

impl Commands {
    /// Runs the selected command.
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Convert(args) => args.execute(),
            Commands::Make(args) => args.execute(),
            Commands::Sort(args) => args.execute(),
            Commands::Swap(args) => args.execute(),
            Commands::Merge(args) => args.execute(),
            Commands::Find(args) => args.execute(),
        }
    }
}
