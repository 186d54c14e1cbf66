//! Retry policy with exponential backoff
//!
//! The client retries transient failures with an explicit loop (local
//! attempts-remaining and delay state, no recursion); this module only
//! defines the policy and the delay schedule.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Number of retries after the first attempt
    pub retries: u32,
    /// Delay before the first retry; doubles on each subsequent retry
    pub initial_delay: Duration,
    /// Cap on the per-retry delay
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            retries: 2,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryConfig {
    /// Create a config for quick retries (development)
    #[must_use]
    pub fn quick() -> Self {
        Self {
            retries: 2,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
        }
    }

    /// Create a config with no retries
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            retries: 0,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Total tries a call may make, including the first attempt
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.retries + 1
    }

    /// Calculate the delay preceding a given retry (1-based)
    ///
    /// Doubles from `initial_delay`: retry 1 waits `initial_delay`,
    /// retry 2 waits twice that, and so on, capped at `max_delay`.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let factor = 2u32.saturating_pow(retry - 1);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.retries, 2);
        assert_eq!(config.initial_delay, Duration::from_millis(1000));
        assert_eq!(config.max_attempts(), 3);
    }

    #[test]
    fn test_delay_doubles_from_initial() {
        let config = RetryConfig {
            retries: 3,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(60),
        };

        assert_eq!(config.delay_for_retry(0), Duration::ZERO);
        assert_eq!(config.delay_for_retry(1), Duration::from_millis(1000));
        assert_eq!(config.delay_for_retry(2), Duration::from_millis(2000));
        assert_eq!(config.delay_for_retry(3), Duration::from_millis(4000));
    }

    #[test]
    fn test_delay_is_capped() {
        let config = RetryConfig {
            retries: 10,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(4),
        };

        assert_eq!(config.delay_for_retry(3), Duration::from_secs(4));
        assert_eq!(config.delay_for_retry(10), Duration::from_secs(4));
    }

    #[test]
    fn test_no_retry_preset() {
        let config = RetryConfig::no_retry();
        assert_eq!(config.max_attempts(), 1);
    }
}
