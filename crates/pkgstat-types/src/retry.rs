//! Download retry policy.

use std::time::Duration;

/// Fixed-delay retry policy.
///
/// A download is attempted at most `max_attempts` times with a constant
/// `wait` between consecutive attempts. There is no wait after the final
/// attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    wait: Duration,
}

impl RetryPolicy {
    /// Default number of attempts.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Default wait between attempts.
    pub const DEFAULT_WAIT: Duration = Duration::from_secs(5);

    /// Creates a new policy. `max_attempts` is raised to at least one.
    #[must_use]
    pub fn new(max_attempts: u32, wait: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            wait,
        }
    }

    /// A policy that tries exactly once.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            wait: Duration::ZERO,
        }
    }

    /// Returns the maximum number of attempts.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the wait between attempts.
    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    /// Returns the longest total time spent waiting if every attempt fails.
    #[must_use]
    pub fn worst_case_wait(&self) -> Duration {
        self.wait.saturating_mul(self.max_attempts - 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_WAIT)
    }
}
