use reqwest::{Client, Request, Response};

use crate::error::{Error, Result};

/// Sends a single attempt over the wire.
///
/// The per-attempt timeout is set on the request itself
/// ([`Request::timeout`]); implementations must honour it. Connection
/// handling, TLS and proxies are the transport's business.
///
/// Implemented for [`reqwest::Client`] and for any closure returning a boxed
/// future, which is handy for stubbing the network out:
///
/// ```
/// use fetch_retry::{BoxFuture, Result, RetryConfig, RetryEngine};
/// use reqwest::{Request, Response};
///
/// let always_ok = |_req: Request| -> BoxFuture<'static, Result<Response>> {
///     Box::pin(async {
///         let response: Result<Response> = Ok(http::Response::new("ok").into());
///         response
///     })
/// };
/// let engine = RetryEngine::new(always_ok, RetryConfig::default());
/// ```
#[async_trait::async_trait]
pub trait Transport: 'static + Send + Sync {
    async fn send(&self, req: Request) -> Result<Response>;
}

#[async_trait::async_trait]
impl Transport for Client {
    async fn send(&self, req: Request) -> Result<Response> {
        self.execute(req).await.map_err(Error::from)
    }
}

#[async_trait::async_trait]
impl<F> Transport for F
where
    F: Send + Sync + 'static + Fn(Request) -> BoxFuture<'static, Result<Response>>,
{
    async fn send(&self, req: Request) -> Result<Response> {
        (self)(req).await
    }
}

pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;
