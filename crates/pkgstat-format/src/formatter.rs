//! Output format abstraction.

use pkgstat_types::PackageCount;
use std::io::Write;
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Fixed-width console table.
    #[default]
    Table,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
    /// CSV format.
    Csv,
}

impl OutputFormat {
    /// Returns the canonical name of this format.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Csv => "csv",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Table, Self::Json, Self::Ndjson, Self::Csv]
    }

    /// Writes a ranking in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write<W: Write + Send>(
        &self,
        ranking: &[PackageCount],
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Table => crate::TableFormatter::new().write_ranking(ranking, writer),
            Self::Json => crate::JsonFormatter::new().write_ranking(ranking, writer),
            Self::Ndjson => crate::JsonFormatter::ndjson().write_ranking(ranking, writer),
            Self::Csv => crate::CsvFormatter::new().write_ranking(ranking, writer),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "csv" => Ok(Self::Csv),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for ranking formatters.
pub trait Formatter: Send + Sync {
    /// Writes a ranking, first entry ranked 1.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_ranking<W: Write + Send>(
        &self,
        ranking: &[PackageCount],
        writer: W,
    ) -> Result<(), FormatError>;
}
