//! Policies computing how long to wait between two attempts.

use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::Response;

/// A strategy computing the wait before the next attempt.
///
/// `attempt` is the zero-based index of the attempt that just failed and
/// `last_response` is the response it produced, if any. Implementations
/// must return a value no larger than `max`.
///
/// Any `Fn(Duration, Duration, u32, Option<&Response>) -> Duration` is a
/// [`Backoff`]:
///
/// ```
/// use std::time::Duration;
/// use fetch_retry::{RetryConfig, RetryEngine};
///
/// let constant = |min: Duration, _max: Duration, _attempt: u32, _: Option<&reqwest::Response>| min;
/// let engine = RetryEngine::new(reqwest::Client::new(), RetryConfig::default())
///     .with_backoff(constant);
/// ```
pub trait Backoff: Send + Sync {
    fn delay(
        &self,
        min: Duration,
        max: Duration,
        attempt: u32,
        last_response: Option<&Response>,
    ) -> Duration;
}

impl<F> Backoff for F
where
    F: Fn(Duration, Duration, u32, Option<&Response>) -> Duration + Send + Sync,
{
    fn delay(
        &self,
        min: Duration,
        max: Duration,
        attempt: u32,
        last_response: Option<&Response>,
    ) -> Duration {
        (self)(min, max, attempt, last_response)
    }
}

/// The default [`Backoff`] for [`RetryEngine`](crate::RetryEngine):
/// `min * 2^attempt`, capped at `max`.
///
/// A product that does not fit in a [`Duration`] is clamped to `max`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialBackoff;

impl Backoff for ExponentialBackoff {
    fn delay(&self, min: Duration, max: Duration, attempt: u32, _: Option<&Response>) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| min.checked_mul(factor))
            .map_or(max, |delay| delay.min(max))
    }
}

/// Honours a `Retry-After` header expressed in whole seconds, clamped to
/// `max`, and defers to the wrapped [`Backoff`] otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryAfterBackoff<B = ExponentialBackoff> {
    inner: B,
}

impl<B: Backoff> RetryAfterBackoff<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

impl<B: Backoff> Backoff for RetryAfterBackoff<B> {
    fn delay(
        &self,
        min: Duration,
        max: Duration,
        attempt: u32,
        last_response: Option<&Response>,
    ) -> Duration {
        last_response
            .and_then(retry_after)
            .map(|hint| hint.min(max))
            .unwrap_or_else(|| self.inner.delay(min, max, attempt, last_response))
    }
}

fn retry_after(response: &Response) -> Option<Duration> {
    let value = response.headers().get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
