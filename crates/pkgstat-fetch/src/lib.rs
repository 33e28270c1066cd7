//! Contents file download, decompression and line parsing for pkgstat.
//!
//! This crate provides the fetch-and-stream half of the pipeline:
//!
//! - [`url::contents_url`] - Resolves a mirror template for an architecture
//! - [`DownloadClient`] - HTTP client with fixed-delay retries
//! - [`ContentsFile`] - Temporary file holding the downloaded bytes
//! - [`ContentLines`] - Lazy line iterator over a gzip stream
//! - [`parse::extract_package_names`] - Package names referenced by a line

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pkgstat/pkgstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod decompress;
pub mod parse;
mod progress;
mod resource;
mod retry;
pub mod url;

pub use client::{ClientConfig, DownloadClient, DownloadError};
pub use decompress::{ContentLines, DecompressError, open_lines};
pub use parse::{ParseError, extract_package_names, is_valid_line, parse_line};
pub use progress::{NoProgress, ProgressSink};
pub use resource::ContentsFile;
pub use retry::{RetryError, retry_fixed};
