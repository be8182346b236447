//! Retry logic with exponential backoff for transient remote failures.
//!
//! The storefront talks to a hosted backend over the network. Idempotent
//! reads (product listings, order lookups) are retried under a
//! [`RetryPolicy`]; writes (order creation, status updates) are always
//! single-attempt so a failure can never double-submit.
//!
//! # Example
//!
//! ```rust
//! use barwaqo_runtime::retry::{RetryPolicy, retry_if};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), String> {
//! let policy = RetryPolicy::default().with_initial_delay(Duration::from_millis(50));
//!
//! let value = retry_if(
//!     &policy,
//!     || async { Ok::<_, String>(42) },
//!     |err: &String| err.contains("transient"),
//! )
//! .await?;
//! assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;
use tokio::time::sleep;

/// Retry policy: exponential backoff with jitter.
///
/// # Default Values
///
/// - `max_retries`: 3
/// - `initial_delay`: 100ms
/// - `max_delay`: 10 seconds
/// - `multiplier`: 2.0 (delay doubles each retry)
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (not counting the initial try)
    pub max_retries: u32,
    /// Initial delay before the first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries (cap for exponential backoff)
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries - used for remote writes.
    #[must_use]
    pub const fn no_retries() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }

    /// Set the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial delay before the first retry.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier.
    #[must_use]
    pub const fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Calculate the base delay for a given attempt number (0-indexed).
    ///
    /// Uses exponential backoff: `delay = initial_delay * multiplier^attempt`,
    /// capped at `max_delay`. Jitter is applied separately in the retry loop
    /// so this stays deterministic for tests.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        // Attempt counts stay tiny, the f64 round-trip cannot overflow.
        #[allow(clippy::cast_possible_wrap)]
        let factor = self.multiplier.powi(attempt as i32);
        let delay = self.initial_delay.mul_f64(factor.max(1.0));

        delay.min(self.max_delay)
    }

    /// Check whether another attempt is allowed.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Delay for an attempt with jitter applied.
    ///
    /// The base delay is scaled by a random factor in `0.5..=1.0` to spread
    /// out retries from concurrent callers.
    #[must_use]
    pub fn jittered_delay(&self, attempt: u32) -> Duration {
        use rand::Rng;

        let jitter = rand::thread_rng().gen_range(0.5..=1.0);
        self.delay_for_attempt(attempt).mul_f64(jitter)
    }
}

/// Retry an async operation, consulting a predicate for retryability.
///
/// Only errors for which `is_retryable` returns `true` trigger a retry;
/// anything else fails immediately. This is how the remote layer
/// distinguishes transient transport failures from, say, a 404.
///
/// # Errors
///
/// Returns the last error once retries are exhausted, or the first
/// non-retryable error.
pub async fn retry_if<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    mut operation: F,
    is_retryable: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    tracing::info!(attempt, "operation succeeded after retry");
                }
                return Ok(result);
            },
            Err(err) => {
                if !is_retryable(&err) {
                    tracing::debug!(error = %err, "error is not retryable, failing immediately");
                    return Err(err);
                }

                if !policy.should_retry(attempt) {
                    tracing::error!(attempt, error = %err, "operation failed after max retries");
                    return Err(err);
                }

                let delay = policy.jittered_delay(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis(),
                    error = %err,
                    "operation failed, retrying"
                );

                sleep(delay).await;
                attempt += 1;
            },
        }
    }
}
