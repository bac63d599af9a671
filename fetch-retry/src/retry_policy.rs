use crate::error::{Error, Result};
use crate::retryable::Retryable;

/// Classifies the outcome of an attempt.
///
/// The outcome of an attempt is either:
/// - a [`reqwest::Response`]: the request went through, although the server
///   may still have answered with an erroneous status such as 500;
/// - an [`Error`]: no response was obtained, e.g. the connection was refused
///   or timed out.
///
/// Returning `None` hands the outcome back to the caller untouched. The
/// engine obeys the verdict unconditionally.
///
/// Any `Fn(&Result<Response>) -> Option<Retryable>` is a [`RetryPolicy`].
/// For instance, a policy that never retries client errors:
///
/// ```
/// use fetch_retry::{default_on_request_failure, Result, RetryConfig, RetryEngine, Retryable};
///
/// let no_4xx = |outcome: &Result<reqwest::Response>| match outcome {
///     Ok(response) if response.status().is_success() => None,
///     Ok(response) if response.status().is_client_error() => None,
///     Ok(_) => Some(Retryable::Transient),
///     Err(error) => default_on_request_failure(error),
/// };
///
/// let engine = RetryEngine::new(reqwest::Client::new(), RetryConfig::default())
///     .with_policy(no_4xx);
/// ```
pub trait RetryPolicy: Send + Sync {
    fn check(&self, outcome: &Result<reqwest::Response>) -> Option<Retryable>;
}

impl<F> RetryPolicy for F
where
    F: Fn(&Result<reqwest::Response>) -> Option<Retryable> + Send + Sync,
{
    fn check(&self, outcome: &Result<reqwest::Response>) -> Option<Retryable> {
        (self)(outcome)
    }
}

/// The default [`RetryPolicy`] for [`RetryEngine`](crate::RetryEngine).
///
/// Retries every transport failure and every status outside `200..300`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRetryPolicy;

impl RetryPolicy for DefaultRetryPolicy {
    fn check(&self, outcome: &Result<reqwest::Response>) -> Option<Retryable> {
        match outcome {
            Ok(success) => default_on_request_success(success),
            Err(error) => default_on_request_failure(error),
        }
    }
}

/// Default retry strategy for a response.
///
/// Retries anything that is not a 2XX. Note that success here means that the
/// request finished without interruption, not that it was logically OK.
pub fn default_on_request_success(success: &reqwest::Response) -> Option<Retryable> {
    if success.status().is_success() {
        None
    } else {
        Some(Retryable::Transient)
    }
}

/// Default retry strategy for an attempt that produced no response.
///
/// Retries and keeps the failure itself as the cause to report once the
/// attempts run out.
pub fn default_on_request_failure(_error: &Error) -> Option<Retryable> {
    Some(Retryable::Transient)
}
