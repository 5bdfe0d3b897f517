//! Dictionary maintenance commands: sort, swap, merge, find

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hanconv_core::dict::{self, serial};

/// Arguments for the sort command
#[derive(Debug, Args)]
pub struct SortArgs {
    /// Dictionary file to sort
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output path (defaults to rewriting the input)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl SortArgs {
    /// Execute the sort command
    pub fn execute(&self) -> Result<()> {
        let table = serial::load_table(&self.file)
            .with_context(|| format!("failed to load {}", self.file.display()))?;
        let output = self.output.as_ref().unwrap_or(&self.file);
        serial::save_table(&table, output, true, true)
            .with_context(|| format!("failed to write {}", output.display()))?;
        Ok(())
    }
}

/// Arguments for the swap command
#[derive(Debug, Args)]
pub struct SwapArgs {
    /// Dictionary file to invert
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl SwapArgs {
    /// Execute the swap command
    pub fn execute(&self) -> Result<()> {
        let source = serial::load_dict(&self.file)
            .with_context(|| format!("failed to load {}", self.file.display()))?;
        let swapped = dict::swap(&source);
        serial::save_table(&swapped, &self.output, true, true)
            .with_context(|| format!("failed to write {}", self.output.display()))?;
        Ok(())
    }
}

/// Arguments for the merge command
#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Dictionary files to merge, earlier entries taking precedence
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Output path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl MergeArgs {
    /// Execute the merge command
    pub fn execute(&self) -> Result<()> {
        let mut sources = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let source = serial::load_dict(file)
                .with_context(|| format!("failed to load {}", file.display()))?;
            sources.push(source);
        }
        let merged = dict::load(sources);
        serial::save_table(&merged, &self.output, false, true)
            .with_context(|| format!("failed to write {}", self.output.display()))?;
        Ok(())
    }
}

/// Arguments for the find command
#[derive(Debug, Args)]
pub struct FindArgs {
    /// Substring to look for in keys and values
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Dictionary file to search
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl FindArgs {
    /// Execute the find command
    pub fn execute(&self) -> Result<()> {
        let table = serial::load_table(&self.file)
            .with_context(|| format!("failed to load {}", self.file.display()))?;
        for (key, values) in table.iter() {
            if key.contains(&self.keyword) || values.iter().any(|v| v.contains(&self.keyword)) {
                println!("{} => {}", key, values.join(" "));
            }
        }
        Ok(())
    }
}
