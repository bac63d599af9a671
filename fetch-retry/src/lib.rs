//! Bounded retry/backoff execution for [`reqwest`] requests.
//!
//! A [`RetryEngine`] sends a [`RequestEnvelope`] through a [`Transport`],
//! asks a [`RetryPolicy`] whether the outcome deserves another attempt and
//! waits for as long as a [`Backoff`] says before trying again, rewinding the
//! request body in place every time.
//!
//! ```
//! use std::io::Cursor;
//! use fetch_retry::{RequestEnvelope, RetryAfterBackoff, RetryConfig, RetryEngine};
//!
//! async fn run() -> fetch_retry::Result<()> {
//!     let engine = RetryEngine::new(reqwest::Client::new(), RetryConfig::default())
//!         .with_backoff(<RetryAfterBackoff>::default());
//!
//!     let mut envelope = RequestEnvelope::new(reqwest::Method::POST, "https://example.com/upload")?
//!         .with_body(Cursor::new(b"hello".to_vec()));
//!     let response = engine.execute(&mut envelope).await?;
//!     println!("status: {}", response.status());
//!     Ok(())
//! }
//! ```
mod backoff;
mod config;
mod engine;
mod error;
mod request;
mod retry_policy;
mod retryable;
mod transport;

pub use backoff::{Backoff, ExponentialBackoff, RetryAfterBackoff};
pub use config::{
    RetryConfig, RetryConfigBuilder, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY,
    DEFAULT_TIMEOUT,
};
pub use engine::{RetryEngine, MAX_DRAIN_BYTES};
pub use error::{Error, Result};
pub use request::{RequestEnvelope, RewindableBody};
pub use retry_policy::{
    default_on_request_failure, default_on_request_success, DefaultRetryPolicy, RetryPolicy,
};
pub use retryable::Retryable;
pub use transport::{BoxFuture, Transport};
