//! Terminal errors for a pkgstat run.

use pkgstat_fetch::{DecompressError, DownloadError};
use pkgstat_types::{ArchitectureError, ConfigError};
use thiserror::Error;

/// Result type alias for pkgstat operations.
pub type Result<T> = std::result::Result<T, PkgstatError>;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Input validation and client construction.
    Setup,
    /// Resolving and downloading the Contents file.
    Fetch,
    /// Decompressing and counting.
    Parse,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Fetch => "fetch",
            Self::Parse => "parse",
        })
    }
}

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum PkgstatError {
    /// The Contents file could not be downloaded.
    #[error("Could not download Contents file")]
    Download(#[from] DownloadError),

    /// The downloaded Contents file is not a valid gzip stream.
    #[error("Downloaded Contents file is corrupt")]
    Decompress(#[from] DecompressError),

    /// The HTTP client could not be created.
    #[error("Could not create HTTP client")]
    Client(#[source] DownloadError),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The architecture token is invalid.
    #[error(transparent)]
    Architecture(#[from] ArchitectureError),

    /// The blocking parse task panicked or was cancelled.
    #[error("Parse task failed: {0}")]
    Task(String),
}

impl PkgstatError {
    /// Returns the stage the error originated from.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Download(_) => Stage::Fetch,
            Self::Decompress(_) | Self::Task(_) => Stage::Parse,
            Self::Client(_) | Self::Config(_) | Self::Architecture(_) => Stage::Setup,
        }
    }
}
