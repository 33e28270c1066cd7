//! Analyze command implementation.
//!
//! Downloads the Contents file for one architecture, ranks its packages by
//! file count and prints the result.

use crate::display::{BarProgress, Format, print_ranking};
use anyhow::{Context, Result};
use pkgstat_lib::prelude::*;
use tracing::warn;

/// Download, count and print the top packages for an architecture.
pub(crate) async fn analyze(
    architecture: &str,
    config: &Config,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let arch: Architecture = architecture
        .parse()
        .with_context(|| format!("Invalid architecture: {architecture}"))?;

    let analyzer = PackageAnalyzer::new(AnalyzerOptions::from(config))?;
    let progress = BarProgress::new(&arch, quiet);

    let analysis = analyzer
        .run(&arch, &progress)
        .await
        .with_context(|| format!("Failed to analyze Contents file for {arch}"))?;

    if analysis.summary.skipped > 0 {
        warn!(
            skipped = analysis.summary.skipped,
            "Skipped lines with an invalid format"
        );
    }

    print_ranking(&analysis.ranking, format)
}
