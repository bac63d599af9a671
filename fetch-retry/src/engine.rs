//! `RetryEngine` runs a request until a policy accepts an attempt, rejects it
//! for good, or the attempts run out.

use reqwest::Response;
#[cfg(feature = "tracing")]
use tracing::Instrument;

use crate::backoff::{Backoff, ExponentialBackoff};
use crate::config::RetryConfig;
use crate::error::{Error, Result};
use crate::request::RequestEnvelope;
use crate::retry_policy::{DefaultRetryPolicy, RetryPolicy};
use crate::retryable::Retryable;
use crate::transport::Transport;

/// Upper bound on the bytes read from a discarded response before its
/// connection is handed back to the transport.
pub const MAX_DRAIN_BYTES: usize = 1024;

/// `RetryEngine` absorbs transient failures of a request before surfacing
/// them to the caller.
///
/// Every attempt rewinds the body of the [`RequestEnvelope`], sends it
/// through the [`Transport`] and asks the [`RetryPolicy`] what to do with
/// the outcome. Between two attempts the engine sleeps for as long as the
/// [`Backoff`] says. At most [`RetryConfig::max_attempts`] attempts are made.
///
///```rust
///     use std::time::Duration;
///     use fetch_retry::{RequestEnvelope, RetryConfig, RetryEngine};
///
///     # async fn run() -> fetch_retry::Result<()> {
///     let config = RetryConfig::builder()
///         .min_delay(Duration::from_millis(100))
///         .max_delay(Duration::from_secs(1))
///         .max_attempts(3)
///         .build()?;
///
///     let engine = RetryEngine::new(reqwest::Client::new(), config);
///     let mut envelope = RequestEnvelope::new(reqwest::Method::GET, "https://example.com")?;
///     let response = engine.execute(&mut envelope).await?;
///     # Ok(())
///     # }
///```
#[derive(Debug, Clone)]
pub struct RetryEngine<T, B = ExponentialBackoff, P = DefaultRetryPolicy> {
    transport: T,
    backoff: B,
    policy: P,
    config: RetryConfig,
}

impl<T: Transport> RetryEngine<T> {
    /// Construct `RetryEngine` with the default backoff and retry policy.
    pub fn new(transport: T, config: RetryConfig) -> Self {
        Self {
            transport,
            backoff: ExponentialBackoff,
            policy: DefaultRetryPolicy,
            config,
        }
    }
}

impl<T, B, P> RetryEngine<T, B, P> {
    /// Replaces the [`Backoff`] computing the wait between attempts.
    pub fn with_backoff<B2: Backoff>(self, backoff: B2) -> RetryEngine<T, B2, P> {
        RetryEngine {
            transport: self.transport,
            backoff,
            policy: self.policy,
            config: self.config,
        }
    }

    /// Replaces the [`RetryPolicy`] classifying each attempt.
    pub fn with_policy<P2: RetryPolicy>(self, policy: P2) -> RetryEngine<T, B, P2> {
        RetryEngine {
            transport: self.transport,
            backoff: self.backoff,
            policy,
            config: self.config,
        }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl<T, B, P> RetryEngine<T, B, P>
where
    T: Transport,
    B: Backoff,
    P: RetryPolicy,
{
    /// Executes the request described by `envelope`.
    ///
    /// Returns the outcome of the first attempt the policy does not want to
    /// retry, the error of a [`Retryable::Fatal`] verdict, or
    /// [`Error::Exhausted`] once every attempt asked for a retry.
    ///
    /// # Errors
    ///
    /// Fails immediately, without further attempts, if the body cannot be
    /// rewound ([`Error::Rewind`]) or read ([`Error::RequestBody`]).
    pub async fn execute(&self, envelope: &mut RequestEnvelope) -> Result<Response> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "retry_request",
            http.method = %envelope.method(),
            http.url = %envelope.url(),
        );
        let attempts = self.execute_attempts(envelope);
        #[cfg(feature = "tracing")]
        let attempts = attempts.instrument(span);
        attempts.await
    }

    async fn execute_attempts(&self, envelope: &mut RequestEnvelope) -> Result<Response> {
        let max_attempts = self.config.max_attempts();
        let mut last_status = None;
        let mut last_error = None;

        for attempt in 0..max_attempts {
            envelope.rewind()?;
            let request = envelope.to_attempt(self.config.timeout())?;

            #[cfg(feature = "tracing")]
            tracing::debug!("Attempt #{} of {}", attempt + 1, max_attempts);
            let outcome = self.transport.send(request).await;

            let verdict = match self.policy.check(&outcome) {
                None => return outcome,
                Some(Retryable::Fatal(err)) => return Err(err),
                Some(verdict) => verdict,
            };

            let (mut response, own_error) = match outcome {
                Ok(response) => (Some(response), None),
                Err(err) => (None, Some(err)),
            };
            if let Some(response) = response.as_mut() {
                drain(response).await;
            }
            last_status = response.as_ref().map(Response::status);
            last_error = verdict.into_error().or(own_error);

            let remaining = max_attempts - attempt - 1;
            if remaining == 0 {
                break;
            }

            let delay = self.backoff.delay(
                self.config.min_delay(),
                self.config.max_delay(),
                attempt,
                response.as_ref(),
            );
            drop(response);

            #[cfg(feature = "tracing")]
            tracing::warn!(
                status = ?last_status,
                error = ?last_error,
                "Retry attempt #{}. Sleeping {:?} before the next attempt",
                attempt + 1,
                delay
            );
            tokio::time::sleep(delay).await;
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            status = ?last_status,
            error = ?last_error,
            "Giving up after {} attempts",
            max_attempts
        );
        Err(Error::Exhausted {
            method: envelope.method().clone(),
            url: envelope.url().clone(),
            attempts: max_attempts,
            last_status,
            source: last_error.map(Into::into),
        })
    }
}

/// Reads and discards at most [`MAX_DRAIN_BYTES`] of the body so the
/// connection can be released.
async fn drain(response: &mut Response) {
    let mut drained = 0;
    while drained < MAX_DRAIN_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => drained += chunk.len(),
            Ok(None) | Err(_) => break,
        }
    }
}
