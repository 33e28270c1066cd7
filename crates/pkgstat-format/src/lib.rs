//! Output formatters for pkgstat package rankings.
//!
//! - [`TableFormatter`] - Fixed-width console table
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`CsvFormatter`] - CSV format

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pkgstat/pkgstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod table;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::JsonFormatter;
pub use table::TableFormatter;
