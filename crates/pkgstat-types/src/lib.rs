//! Core types for the pkgstat Contents file analyzer.
//!
//! This crate provides the value types shared across the pkgstat workspace:
//!
//! - [`Architecture`] - Validated architecture token (e.g. `amd64`)
//! - [`MirrorTemplate`] - Mirror URL template with an architecture placeholder
//! - [`RetryPolicy`] - Fixed-delay retry policy for downloads
//! - [`PackageCount`] - A ranked `(package, file count)` pair
//! - [`Config`] - YAML configuration document

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/pkgstat/pkgstat/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod architecture;
mod config;
mod error;
mod mirror;
mod package;
mod retry;

pub use architecture::Architecture;
pub use config::{
    Config, DEFAULT_CONFIG_FILE, DownloadSettings, LoggingSettings, ParseSettings,
};
pub use error::{ArchitectureError, ConfigError};
pub use mirror::{DEFAULT_MIRROR_URL, MirrorTemplate};
pub use package::PackageCount;
pub use retry::RetryPolicy;
