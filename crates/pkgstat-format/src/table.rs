//! Fixed-width console table.

use pkgstat_types::PackageCount;
use std::io::Write;

use crate::{FormatError, Formatter};

/// Console table formatter.
///
/// ```text
/// #     | Package                            | File Count
/// -----------------------------------------------------
/// 1     | fonts-noto-cjk-extra               | 4012
/// ```
#[derive(Debug, Clone)]
pub struct TableFormatter {
    rank_width: usize,
    name_width: usize,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    /// Creates a formatter with the default column widths.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rank_width: 6,
            name_width: 35,
        }
    }

    /// Sets the package column width. Longer names are not truncated.
    #[must_use]
    pub const fn with_name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }
}

impl Formatter for TableFormatter {
    fn write_ranking<W: Write + Send>(
        &self,
        ranking: &[PackageCount],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let (rw, nw) = (self.rank_width, self.name_width);
        let header = format!("{:<rw$}| {:<nw$}| File Count", "#", "Package");
        writeln!(writer, "{header}")?;
        writeln!(writer, "{}", "-".repeat(header.len()))?;

        for (rank, entry) in ranking.iter().enumerate() {
            writeln!(
                writer,
                "{:<rw$}| {:<nw$}| {}",
                rank + 1,
                entry.name,
                entry.count
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}
