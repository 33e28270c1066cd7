//! Transient storage for a downloaded Contents file.

use std::fs::File;
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::url::file_name;

/// A downloaded Contents file held in a uniquely named temporary file.
///
/// The file name is derived from the final segment of the source URL plus
/// a random suffix, so concurrent runs never share storage. The file is
/// removed by [`ContentsFile::release`]; if the handle is dropped instead
/// (for example while unwinding) the file is still deleted.
#[derive(Debug)]
pub struct ContentsFile {
    file: NamedTempFile,
    url: String,
    size: u64,
}

impl ContentsFile {
    /// Creates an empty temporary file for the given source URL.
    pub(crate) fn create(url: &str) -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(&format!("{}.", file_name(url)))
            .tempfile()?;
        Ok(Self {
            file,
            url: url.to_string(),
            size: 0,
        })
    }

    /// Wraps an existing temporary file, e.g. one produced outside the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the file metadata cannot be read.
    pub fn from_temp_file(file: NamedTempFile, url: impl Into<String>) -> io::Result<Self> {
        let size = file.as_file().metadata()?.len();
        Ok(Self {
            file,
            url: url.into(),
            size,
        })
    }

    /// Opens a fresh write handle that truncates any previous attempt's bytes.
    pub(crate) fn truncate_for_write(&self) -> io::Result<File> {
        let handle = self.file.reopen()?;
        handle.set_len(0)?;
        Ok(handle)
    }

    pub(crate) const fn set_size(&mut self, size: u64) {
        self.size = size;
    }

    /// Returns the local path of the downloaded file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Returns the URL the file was downloaded from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the number of compressed bytes stored.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Opens the file for reading from the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be reopened.
    pub fn open(&self) -> io::Result<File> {
        self.file.reopen()
    }

    /// Deletes the file. Failures are logged and otherwise ignored.
    pub fn release(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => info!(path = %path.display(), "Removed downloaded Contents file"),
            Err(e) => warn!(path = %path.display(), "Failed to remove downloaded Contents file: {e}"),
        }
    }
}
