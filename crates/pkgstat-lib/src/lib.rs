//! Debian Contents file package statistics.
//!
//! This is a facade crate that re-exports functionality from the pkgstat
//! workspace crates and provides the [`PackageAnalyzer`] that wires them
//! together: fetch, stream, parse, count, rank.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pkgstat/pkgstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analyzer;
mod error;

pub use analyzer::{Analysis, AnalyzerOptions, PackageAnalyzer, ParseSummary, count_packages, run};
pub use error::{PkgstatError, Result, Stage};

// Re-export core types
pub use pkgstat_types::*;

// Re-export fetch functionality
pub use pkgstat_fetch::{
    ClientConfig, ContentLines, ContentsFile, DecompressError, DownloadClient, DownloadError,
    NoProgress, ParseError, ProgressSink, extract_package_names, is_valid_line, open_lines,
    parse_line,
};

// Re-export aggregation
pub use pkgstat_aggregate::PackageCounter;

// Re-export formatters
#[cfg(feature = "format")]
pub use pkgstat_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat, TableFormatter,
};

/// Prelude module for convenient imports.
///
/// ```
/// use pkgstat_lib::prelude::*;
/// ```
pub mod prelude {
    pub use pkgstat_types::{Architecture, Config, MirrorTemplate, PackageCount, RetryPolicy};

    pub use pkgstat_fetch::{NoProgress, ProgressSink};

    pub use pkgstat_aggregate::PackageCounter;

    pub use crate::{Analysis, AnalyzerOptions, PackageAnalyzer, PkgstatError, Stage};

    #[cfg(feature = "format")]
    pub use pkgstat_format::{Formatter, OutputFormat};
}
