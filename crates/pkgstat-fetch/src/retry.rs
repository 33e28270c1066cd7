//! Fixed-delay retry loop.

use pkgstat_types::RetryPolicy;
use std::future::Future;
use thiserror::Error;
use tracing::warn;

/// Failure of a retried operation.
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// Every attempt failed with a retryable error.
    #[error("gave up after {attempts} attempts")]
    Exhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Error from the final attempt.
        #[source]
        last: E,
    },

    /// An attempt failed with an error that must not be retried.
    #[error(transparent)]
    Fatal(E),
}

/// Runs `operation` until it succeeds or the policy is exhausted.
///
/// The closure receives the 1-based attempt number. Errors for which
/// `is_retryable` returns false end the loop immediately. Between attempts the
/// task sleeps for [`RetryPolicy::wait`]; there is no sleep after the final
/// attempt.
///
/// # Errors
///
/// Returns [`RetryError::Exhausted`] with the last error once all attempts
/// fail, or [`RetryError::Fatal`] for a non-retryable error.
pub async fn retry_fixed<T, E, F, Fut, R>(
    policy: &RetryPolicy,
    is_retryable: R,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if !is_retryable(&e) => return Err(RetryError::Fatal(e)),
            Err(e) if attempt >= max_attempts => {
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last: e,
                });
            }
            Err(e) => {
                warn!(
                    attempt,
                    max_attempts,
                    wait_secs = policy.wait().as_secs_f64(),
                    "Attempt failed, retrying: {e}"
                );
                tokio::time::sleep(policy.wait()).await;
                attempt += 1;
            }
        }
    }
}
