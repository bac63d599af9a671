mod raw_server;

pub use raw_server::RawServer;

use std::time::Duration;

use fetch_client::RetryConfig;

/// Retry settings that keep tests fast: 1ms to 5ms between attempts.
pub fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig::builder()
        .min_delay(Duration::from_millis(1))
        .max_delay(Duration::from_millis(5))
        .max_attempts(max_attempts)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
