//! HTTP client for downloading Contents files.

use futures::StreamExt;
use pkgstat_types::{Architecture, MirrorTemplate, RetryPolicy};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::{ContentsFile, ProgressSink, RetryError, retry_fixed, url::contents_url};

/// Configuration for the download client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Retry policy applied to each download.
    pub retry: RetryPolicy,
    /// Longest gap allowed between reads of the response. `None` waits
    /// indefinitely. A slow transfer that keeps delivering bytes never trips it.
    pub timeout: Option<Duration>,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            // Contents files for the large architectures are tens of megabytes
            timeout: Some(Duration::from_secs(300)),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("pkgstat/{}", env!("CARGO_PKG_VERSION")),
            system_proxy: true,
        }
    }
}

/// Errors that can occur during downloads.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP transport failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status.
    #[error("Server returned {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The body ended before the announced length was received.
    #[error("Transfer incomplete: received {received} of {expected} bytes")]
    Incomplete {
        /// Bytes announced by `Content-Length`.
        expected: u64,
        /// Bytes actually received.
        received: u64,
    },

    /// The resolved URL cannot be requested.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Writing the temporary file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Every attempt failed.
    #[error("Failed to download Contents file after {attempts} attempts")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Error from the final attempt.
        #[source]
        last: Box<DownloadError>,
    },
}

impl DownloadError {
    /// Returns true if another attempt may succeed.
    ///
    /// Transport failures, non-success statuses and short bodies are retried.
    /// Local I/O and URL errors are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_builder(),
            Self::Status { .. } | Self::Incomplete { .. } => true,
            Self::InvalidUrl { .. } | Self::Io(_) | Self::RetriesExhausted { .. } => false,
        }
    }
}

impl From<RetryError<Self>> for DownloadError {
    fn from(err: RetryError<Self>) -> Self {
        match err {
            RetryError::Exhausted { attempts, last } => Self::RetriesExhausted {
                attempts,
                last: Box::new(last),
            },
            RetryError::Fatal(e) => e,
        }
    }
}

/// HTTP client that downloads Contents files into temporary storage.
#[derive(Debug, Clone)]
pub struct DownloadClient {
    client: Client,
    config: ClientConfig,
}

impl DownloadClient {
    /// Creates a new download client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .tcp_nodelay(true)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.read_timeout(timeout);
        }
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Resolves the mirror template for `arch` and downloads the result.
    ///
    /// # Errors
    ///
    /// See [`DownloadClient::fetch`].
    pub async fn fetch_contents(
        &self,
        template: &MirrorTemplate,
        arch: &Architecture,
        progress: &dyn ProgressSink,
    ) -> Result<ContentsFile, DownloadError> {
        let url = contents_url(template, arch);
        info!(%arch, %url, "Resolved Contents file URL");
        self.fetch(&url, progress).await
    }

    /// Downloads `url` into a new temporary file, retrying per the policy.
    ///
    /// Every attempt truncates the temporary file before writing, so bytes
    /// from a failed attempt never leak into a later one.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::RetriesExhausted`] carrying the last failure
    /// once all attempts are used, or the first non-retryable error.
    pub async fn fetch(
        &self,
        url: &str,
        progress: &dyn ProgressSink,
    ) -> Result<ContentsFile, DownloadError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DownloadError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }

        let mut file = ContentsFile::create(url)?;
        debug!(path = %file.path().display(), "Created temporary file");

        let size = retry_fixed(&self.config.retry, DownloadError::is_retryable, |attempt| {
            let file = &file;
            async move {
                debug!(attempt, url, "Starting download attempt");
                self.download_once(url, file, progress).await
            }
        })
        .await?;

        file.set_size(size);
        progress.finish();
        info!(url, bytes = size, path = %file.path().display(), "Download completed");
        Ok(file)
    }

    /// Performs a single download attempt, returning the bytes written.
    async fn download_once(
        &self,
        url: &str,
        file: &ContentsFile,
        progress: &dyn ProgressSink,
    ) -> Result<u64, DownloadError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let total = response.content_length();
        progress.start(total);

        let mut writer = tokio::fs::File::from_std(file.truncate_for_write()?);
        let mut body = response.bytes_stream();
        let mut transferred = 0u64;

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            transferred += chunk.len() as u64;
            progress.advance(transferred, total);
        }
        writer.flush().await?;

        match total {
            Some(expected) if expected != transferred => Err(DownloadError::Incomplete {
                expected,
                received: transferred,
            }),
            _ => Ok(transferred),
        }
    }
}
