use std::time::Duration;

use crate::error::{Error, Result};

/// Shortest wait between two attempts.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(1);
/// Longest wait between two attempts.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(3);
/// Number of attempts, the first one included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
/// Timeout applied to every single attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Immutable settings driving a [`RetryEngine`](crate::RetryEngine).
///
/// Always satisfies `min_delay <= max_delay` and `max_attempts >= 1`; use
/// [`RetryConfig::builder`] to construct a non-default one.
///
/// ```
/// use std::time::Duration;
/// use fetch_retry::RetryConfig;
///
/// let config = RetryConfig::builder()
///     .min_delay(Duration::from_millis(100))
///     .max_delay(Duration::from_secs(1))
///     .max_attempts(4)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_attempts(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    min_delay: Duration,
    max_delay: Duration,
    max_attempts: u32,
    timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RetryConfig {
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder {
            config: RetryConfig::default(),
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Builder for [`RetryConfig`]; unset fields keep their defaults.
#[derive(Debug, Clone)]
#[must_use = "RetryConfigBuilder does nothing until you 'build' it"]
pub struct RetryConfigBuilder {
    config: RetryConfig,
}

impl RetryConfigBuilder {
    pub fn min_delay(mut self, min_delay: Duration) -> Self {
        self.config.min_delay = min_delay;
        self
    }

    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.config.max_delay = max_delay;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Config`] when `min_delay > max_delay` or
    /// `max_attempts == 0`.
    pub fn build(self) -> Result<RetryConfig> {
        let config = self.config;
        if config.min_delay > config.max_delay {
            return Err(Error::Config(format!(
                "min delay {:?} exceeds max delay {:?}",
                config.min_delay, config.max_delay
            )));
        }
        if config.max_attempts == 0 {
            return Err(Error::Config(
                "at least one attempt must be allowed".to_string(),
            ));
        }
        Ok(config)
    }
}
