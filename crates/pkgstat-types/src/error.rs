//! Error types for input validation and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Error for invalid architecture tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArchitectureError {
    /// The token was empty.
    #[error("Architecture must not be empty")]
    Empty,

    /// The token contains a character that cannot appear in a URL path segment.
    #[error("Invalid character {ch:?} in architecture {token:?}")]
    InvalidChar {
        /// The rejected token.
        token: String,
        /// The offending character.
        ch: char,
    },
}

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid YAML for this schema.
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A value is out of range.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted key of the field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
