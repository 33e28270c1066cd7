//! Display utilities and output formatting for the pkgstat CLI.

use anyhow::Result;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use pkgstat_lib::prelude::*;
use std::io::BufWriter;

/// Output format for the ranking.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Table,
    Json,
    Ndjson,
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => Self::Table,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
            Format::Csv => Self::Csv,
        }
    }
}

/// Write the ranking to stdout.
pub(crate) fn print_ranking(ranking: &[PackageCount], format: Format) -> Result<()> {
    let stdout = BufWriter::new(std::io::stdout());
    OutputFormat::from(format).write(ranking, stdout)?;
    Ok(())
}

/// Download progress bar. Cleared on drop, so a failed run leaves no bar
/// behind the error message.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub(crate) fn new(arch: &Architecture, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_message(format!("Downloading Contents file for {arch}"));
            bar
        };
        Self { bar }
    }
}

impl ProgressSink for BarProgress {
    fn start(&self, total: Option<u64>) {
        self.bar.reset();
        let style = match total {
            Some(total) => {
                self.bar.set_length(total);
                ProgressStyle::default_bar()
                    .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
                    .expect("Invalid progress template")
                    .progress_chars("=>-")
            }
            None => ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {bytes} ({bytes_per_sec})")
                .expect("Invalid progress template"),
        };
        self.bar.set_style(style);
    }

    fn advance(&self, transferred: u64, _total: Option<u64>) {
        self.bar.set_position(transferred);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for BarProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
