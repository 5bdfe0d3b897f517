//! Convert command implementation

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use hanconv_core::dict::{load, serial};
use hanconv_core::{compile_exclusion, Converter, Maker, OutputFormat};

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input files (default: stdin)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Config whose final dictionary drives the conversion
    #[arg(short, long, value_name = "CONFIG", conflicts_with = "dicts")]
    pub config: Option<String>,

    /// Dictionary file(s), merged in order
    #[arg(short = 'd', long = "dict", value_name = "FILE")]
    pub dicts: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "txt")]
    pub format: Format,

    /// Regex for text spans to leave unconverted
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Rewrite each input file with its converted content
    #[arg(long, conflicts_with = "output")]
    pub in_place: bool,
}

/// Rendering styles accepted on the command line
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Format {
    /// Plain converted text
    Txt,
    /// Text with conversion markers
    Txtm,
    /// JSON array of conversion items
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Txt => OutputFormat::Txt,
            Format::Txtm => OutputFormat::Txtm,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> Result<()> {
        let converter = self.build_converter()?;
        let exclude = self
            .exclude
            .as_deref()
            .map(compile_exclusion)
            .transpose()
            .context("invalid exclusion pattern")?;
        let format = OutputFormat::from(self.format);

        if self.files.is_empty() {
            if self.in_place {
                bail!("--in-place requires input files");
            }
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            let converted = converter.convert_formatted(&text, format, exclude.as_ref());
            return self.emit(&converted, None);
        }

        for file in &self.files {
            let text = fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let converted = converter.convert_formatted(&text, format, exclude.as_ref());
            self.emit(&converted, Some(file))?;
        }
        Ok(())
    }

    fn build_converter(&self) -> Result<Converter> {
        if let Some(config) = &self.config {
            let dict = Maker::new()
                .make(config)
                .with_context(|| format!("failed to build dictionaries for {config}"))?;
            log::debug!("using dictionary {}", dict.display());
            return Converter::from_file(&dict)
                .with_context(|| format!("failed to load {}", dict.display()));
        }
        if self.dicts.is_empty() {
            bail!("either --config or --dict is required");
        }
        let sources = self
            .dicts
            .iter()
            .map(|path| {
                serial::load_dict(path)
                    .with_context(|| format!("failed to load {}", path.display()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Converter::new(load(sources)))
    }

    fn emit(&self, converted: &str, source: Option<&std::path::Path>) -> Result<()> {
        match (&self.output, self.in_place, source) {
            (Some(output), _, _) => fs::write(output, converted)
                .with_context(|| format!("failed to write {}", output.display())),
            (None, true, Some(source)) => fs::write(source, converted)
                .with_context(|| format!("failed to write {}", source.display())),
            _ => {
                io::stdout()
                    .write_all(converted.as_bytes())
                    .context("failed to write stdout")
            }
        }
    }
}
