use std::{env, time::Duration};

use dentalcloud_core::storage::RetryPolicy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding patients and their search entries
    /// (default: "dentalcloud").
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[cfg_attr(not(feature = "dynamodb"), allow(dead_code))]
    pub table_name: String,
    /// Maximum attempts per backend call, including the first (default: 3)
    pub retry_max_attempts: u32,
    /// Delay before the first retry in milliseconds (default: 50)
    pub retry_base_delay_ms: u64,
    /// Upper bound for a single retry delay in milliseconds (default: 1,000)
    pub retry_max_delay_ms: u64,
    /// Per-request timeout in seconds (default: 15)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Table name (default: "dentalcloud")
    /// - `RETRY_MAX_ATTEMPTS` - Attempts per backend call (default: 3)
    /// - `RETRY_BASE_DELAY_MS` - First retry delay (default: 50)
    /// - `RETRY_MAX_DELAY_MS` - Retry delay cap (default: 1,000)
    /// - `REQUEST_TIMEOUT_SECONDS` - HTTP request timeout (default: 15)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("DYNAMODB_TABLE_NAME")
                .unwrap_or_else(|_| "dentalcloud".to_string()),
            retry_max_attempts: env::var("RETRY_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            retry_base_delay_ms: env::var("RETRY_BASE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            retry_max_delay_ms: env::var("RETRY_MAX_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1_000),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
        }
    }

    /// Retry policy applied to each backend call.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_max_attempts.max(1),
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            max_delay: Duration::from_millis(self.retry_max_delay_ms),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            table_name: "patients-test".to_string(),
            retry_max_attempts: 5,
            retry_base_delay_ms: 20,
            retry_max_delay_ms: 400,
            request_timeout_seconds: 30,
        }
    }

    #[test]
    fn test_retry_policy_conversion() {
        let policy = config().retry_policy();

        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(20));
        assert_eq!(policy.max_delay, Duration::from_millis(400));
    }

    #[test]
    fn test_retry_policy_keeps_at_least_one_attempt() {
        let config = Config {
            retry_max_attempts: 0,
            ..config()
        };

        assert_eq!(config.retry_policy().max_attempts, 1);
    }

    #[test]
    fn test_request_timeout_conversion() {
        assert_eq!(config().request_timeout(), Duration::from_secs(30));
    }
}
