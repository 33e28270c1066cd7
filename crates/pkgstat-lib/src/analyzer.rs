//! Fetch, stream, count and rank a Contents file.

use pkgstat_aggregate::PackageCounter;
use pkgstat_fetch::{
    ClientConfig, DecompressError, DownloadClient, DownloadError, ProgressSink, open_lines,
    parse_line,
};
use pkgstat_types::{Architecture, Config, MirrorTemplate, PackageCount, RetryPolicy};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{PkgstatError, Result};

/// Everything a run needs besides the architecture.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Mirror URL template.
    pub mirror: MirrorTemplate,
    /// Download retry policy.
    pub retry: RetryPolicy,
    /// Number of packages to report.
    pub top_n: usize,
    /// Skip lines that do not look like `<path> <packages>`.
    pub validate_lines: bool,
    /// Idle read timeout for the download.
    pub timeout: Option<Duration>,
    /// Honour proxy settings from the environment.
    pub system_proxy: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AnalyzerOptions {
    fn from(config: &Config) -> Self {
        Self {
            mirror: config.download.mirror_url.clone(),
            retry: config.download.retry_policy(),
            top_n: config.parse.top_n(),
            validate_lines: config.parse.validate_lines,
            timeout: config.download.timeout(),
            system_proxy: true,
        }
    }
}

/// Counters gathered while streaming a Contents file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Lines decoded.
    pub lines: u64,
    /// Lines skipped by validation.
    pub skipped: u64,
    /// Distinct packages seen.
    pub packages: usize,
    /// Sum of all per-package counts.
    pub files: u64,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Architecture analysed.
    pub architecture: Architecture,
    /// URL the Contents file was downloaded from.
    pub url: String,
    /// Compressed size of the download.
    pub downloaded_bytes: u64,
    /// Top packages by file count.
    pub ranking: Vec<PackageCount>,
    /// Parse counters.
    pub summary: ParseSummary,
}

/// Streams lines into a [`PackageCounter`].
///
/// With `validate` set, lines failing [`pkgstat_fetch::is_valid_line`] are
/// logged and skipped. Without it every line is parsed best-effort.
///
/// # Errors
///
/// Returns the first decompression error; counts gathered so far are lost.
pub fn count_packages<I>(
    lines: I,
    validate: bool,
) -> std::result::Result<(PackageCounter, ParseSummary), DecompressError>
where
    I: IntoIterator<Item = std::result::Result<String, DecompressError>>,
{
    let mut counter = PackageCounter::new();
    let mut summary = ParseSummary::default();

    for line in lines {
        let line = line?;
        summary.lines += 1;
        match parse_line(&line, validate) {
            Ok(packages) => counter.extend(packages),
            Err(e) => {
                summary.skipped += 1;
                warn!(line = summary.lines, "{e}");
            }
        }
    }

    summary.packages = counter.len();
    summary.files = counter.total_files();
    Ok((counter, summary))
}

/// Downloads, parses and ranks Contents files.
#[derive(Debug, Clone)]
pub struct PackageAnalyzer {
    client: DownloadClient,
    options: AnalyzerOptions,
}

impl PackageAnalyzer {
    /// Creates an analyzer and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`PkgstatError::Client`] if the HTTP client cannot be created.
    pub fn new(options: AnalyzerOptions) -> Result<Self> {
        let client = http_client(ClientConfig {
            retry: options.retry,
            timeout: options.timeout,
            system_proxy: options.system_proxy,
            ..Default::default()
        })?;
        Ok(Self { client, options })
    }

    /// Runs the full pipeline for one architecture.
    ///
    /// The downloaded file is removed once parsing finishes, whether parsing
    /// succeeded or not. Nothing is ranked unless the whole stream decodes.
    ///
    /// # Errors
    ///
    /// Returns [`PkgstatError::Download`] if the file could not be fetched
    /// and [`PkgstatError::Decompress`] if it is not a valid gzip stream.
    pub async fn run(&self, arch: &Architecture, progress: &dyn ProgressSink) -> Result<Analysis> {
        let file = self
            .client
            .fetch_contents(&self.options.mirror, arch, progress)
            .await?;
        let url = file.url().to_string();
        let downloaded_bytes = file.size();
        let validate = self.options.validate_lines;

        debug!(%arch, validate, "Parsing Contents file");
        // Decompression is CPU-bound; keep it off the async executor
        let (counter, summary) = tokio::task::spawn_blocking(move || {
            let counted = open_lines(&file).and_then(|lines| count_packages(lines, validate));
            file.release();
            counted
        })
        .await
        .map_err(|e| PkgstatError::Task(e.to_string()))??;

        info!(
            %arch,
            lines = summary.lines,
            skipped = summary.skipped,
            packages = summary.packages,
            files = summary.files,
            "Parsed Contents file"
        );

        Ok(Analysis {
            architecture: arch.clone(),
            url,
            downloaded_bytes,
            ranking: counter.top_n(self.options.top_n),
            summary,
        })
    }
}

fn http_client(config: ClientConfig) -> Result<DownloadClient> {
    DownloadClient::new(config).map_err(|e| PkgstatError::Client(DownloadError::from(e)))
}

/// Runs the pipeline once with a fresh [`PackageAnalyzer`].
///
/// # Errors
///
/// See [`PackageAnalyzer::run`].
pub async fn run(
    arch: &Architecture,
    options: AnalyzerOptions,
    progress: &dyn ProgressSink,
) -> Result<Analysis> {
    PackageAnalyzer::new(options)?.run(arch, progress).await
}
