//! Package file-count aggregation for pkgstat.
//!
//! This crate provides the counting half of the pipeline:
//!
//! - [`PackageCounter`] - Streaming per-package file counter with top-N ranking

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pkgstat/pkgstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod counter;

pub use counter::PackageCounter;
