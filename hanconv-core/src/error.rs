//! Crate-wide error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by dictionary loading, composition, and conversion
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error with the file it occurred on
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file being read or written
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Malformed JSON dictionary or config
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid regular expression
    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Config files require each other in a cycle
    #[error("circular requirement on {}", .0.display())]
    CircularRequirement(PathBuf),

    /// A referenced dictionary file does not exist
    #[error("missing source dictionary: {}", .0.display())]
    MissingSource(PathBuf),

    /// A dictionary entry failed the `check` validation
    #[error("malformed entry: key {key:?}, value {value:?}")]
    Validation {
        /// The offending key
        key: String,
        /// The offending value, if the key itself was valid
        value: Option<String>,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
