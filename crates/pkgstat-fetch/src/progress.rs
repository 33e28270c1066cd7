//! Download progress reporting.

/// Receives byte-level progress while a Contents file is transferred.
///
/// Updates within one attempt are monotonically increasing. A retry calls
/// [`ProgressSink::start`] again, which restarts the count from zero.
pub trait ProgressSink: Send + Sync {
    /// Called when an attempt begins receiving its body.
    ///
    /// `total` is the size announced by the server, if any.
    fn start(&self, total: Option<u64>) {
        let _ = total;
    }

    /// Called after each received chunk with the bytes transferred so far.
    fn advance(&self, transferred: u64, total: Option<u64>);

    /// Called once the transfer has completed successfully.
    fn finish(&self) {}
}

/// A sink that discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&self, _transferred: u64, _total: Option<u64>) {}
}
