//! JSON output format.

use pkgstat_types::PackageCount;
use serde::Serialize;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum JsonStyle {
    /// Pretty-printed JSON array.
    #[default]
    Array,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    style: JsonStyle,
}

/// Serialized row.
#[derive(Serialize)]
struct RankedRow<'a> {
    rank: usize,
    package: &'a str,
    files: u64,
}

impl JsonFormatter {
    /// Creates a JSON array formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
        }
    }

    /// Creates an NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
        }
    }
}

fn ranked_rows(ranking: &[PackageCount]) -> impl Iterator<Item = RankedRow<'_>> {
    ranking.iter().enumerate().map(|(i, entry)| RankedRow {
        rank: i + 1,
        package: &entry.name,
        files: entry.count,
    })
}

impl Formatter for JsonFormatter {
    fn write_ranking<W: Write + Send>(
        &self,
        ranking: &[PackageCount],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                let rows: Vec<_> = ranked_rows(ranking).collect();
                serde_json::to_writer_pretty(&mut writer, &rows)?;
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for row in ranked_rows(ranking) {
                    serde_json::to_writer(&mut writer, &row)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}
