//! Make command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hanconv_core::Maker;

/// Arguments for the make command
#[derive(Debug, Args)]
pub struct MakeArgs {
    /// Config files or names to build
    #[arg(value_name = "CONFIG", required = true)]
    pub configs: Vec<String>,

    /// Extra directory searched for config names
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl MakeArgs {
    /// Execute the make command
    pub fn execute(&self) -> Result<()> {
        let mut maker = Maker::new();
        if let Some(dir) = &self.config_dir {
            maker = maker.with_config_dir(dir);
        }
        for config in &self.configs {
            let out = maker
                .make(config)
                .with_context(|| format!("failed to build {config}"))?;
            println!("{}", out.display());
        }
        Ok(())
    }
}
