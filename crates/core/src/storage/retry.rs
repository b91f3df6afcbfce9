//! Bounded retry policy for transient backend failures.
//!
//! The policy is pure: it decides whether another attempt is allowed and how
//! long to wait before it. Sleeping is left to the caller.

use std::time::Duration;

use super::RepositoryError;

/// Exponential backoff with a cap and a bounded number of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts per call, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Returns true if `error`, raised by attempt number `attempt` (1-based),
    /// should be followed by another attempt.
    pub fn should_retry(&self, error: &RepositoryError, attempt: u32) -> bool {
        error.is_transient() && attempt < self.max_attempts.max(1)
    }

    /// Delay to wait after attempt number `attempt` (1-based) failed.
    ///
    /// `base_delay * 2^(attempt - 1)`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(exponent).min(self.max_delay)
    }
}
