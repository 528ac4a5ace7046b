//! Retry policy for backend requests.
//!
//! Controls how many times a transient failure (network error, timeout, 5xx)
//! is retried and how long to wait between attempts.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use nearby_photos::service::RetryPolicy;
//!
//! // Initial attempt plus 3 retries, 1 second apart
//! let policy = RetryPolicy::fixed(4, Duration::from_millis(1000));
//! assert_eq!(policy.retries(), 3);
//! ```

use std::time::Duration;

/// Default number of retries after the initial attempt.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default delay between attempts (1 second).
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// How a request handles transient failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetryPolicy {
    /// No retries - fail immediately on error.
    None,

    /// Fixed number of attempts with constant delay between them.
    Fixed {
        /// Maximum number of attempts (including the initial attempt).
        max_attempts: u32,
        /// Delay between retry attempts.
        delay: Duration,
    },
}

impl Default for RetryPolicy {
    /// Initial attempt plus 3 retries, 1 second apart.
    fn default() -> Self {
        Self::fixed(
            DEFAULT_RETRY_ATTEMPTS + 1,
            Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        )
    }
}

impl RetryPolicy {
    /// Creates a fixed retry policy.
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Maximum number of attempts (including initial)
    /// * `delay` - Fixed delay between attempts
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::Fixed {
            max_attempts,
            delay,
        }
    }

    /// Calculates the delay before the next attempt.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The attempt that just failed (1-based)
    ///
    /// # Returns
    ///
    /// The delay to wait before retrying, or `None` if no more retries are allowed.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::Fixed {
                max_attempts,
                delay,
            } => {
                if attempt < *max_attempts {
                    Some(*delay)
                } else {
                    None
                }
            }
        }
    }

    /// Returns the maximum number of attempts for this policy.
    pub fn max_attempts(&self) -> u32 {
        match self {
            Self::None => 1,
            Self::Fixed { max_attempts, .. } => *max_attempts,
        }
    }

    /// Returns the number of retries after the initial attempt.
    pub fn retries(&self) -> u32 {
        self.max_attempts().saturating_sub(1)
    }
}
