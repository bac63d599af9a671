use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::path::Path;

use fetch_retry::{RequestEnvelope, RetryConfig, RetryEngine};
use reqwest::{Client, Method, Proxy, Response};

use crate::error::{ClientError, Result};
use crate::proxy::ProxySelector;

/// Retry settings and proxy pool of a [`DataClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub retry: RetryConfig,
    /// Candidate proxy URLs; one is picked when the client is built.
    pub proxies: Vec<String>,
}

impl ClientConfig {
    pub fn new(retry: RetryConfig) -> Self {
        Self {
            retry,
            proxies: Vec::new(),
        }
    }

    pub fn with_proxies<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.proxies = proxies.into_iter().map(Into::into).collect();
        self
    }
}

/// A `DataClientBuilder` is used to build a [`DataClient`].
#[must_use]
pub struct DataClientBuilder {
    config: ClientConfig,
    selector: Option<Box<dyn ProxySelector + Send>>,
    base: Option<reqwest::ClientBuilder>,
}

impl DataClientBuilder {
    fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            selector: None,
            base: None,
        }
    }

    /// Replaces the whole configuration, proxy list included.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    pub fn proxies<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_proxies(proxies);
        self
    }

    /// Chooses the proxy out of the configured list. Defaults to
    /// `rand::thread_rng()`.
    pub fn selector<S>(mut self, selector: S) -> Self
    where
        S: ProxySelector + Send + 'static,
    {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Starts from a preconfigured [`reqwest::ClientBuilder`] instead of the
    /// default one. Timeouts set on it still apply alongside the retry
    /// timeout of every attempt.
    pub fn reqwest_builder(mut self, base: reqwest::ClientBuilder) -> Self {
        self.base = Some(base);
        self
    }

    /// Returns a `DataClient` using this builder configuration.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::InvalidProxy`] if the selected proxy is not
    /// a valid URL and with [`ClientError::Client`] if reqwest cannot build
    /// its client.
    pub fn build(self) -> Result<DataClient> {
        let Self {
            config,
            selector,
            base,
        } = self;

        let proxy = match selector {
            Some(mut selector) => selector.select_proxy(&config.proxies),
            None => rand::thread_rng().select_proxy(&config.proxies),
        }
        .map(String::from);

        let mut builder = base.unwrap_or_else(Client::builder);
        if let Some(proxy) = &proxy {
            tracing::debug!(proxy = %proxy, "Routing requests through proxy");
            let all = Proxy::all(proxy.as_str()).map_err(|source| ClientError::InvalidProxy {
                proxy: proxy.clone(),
                source,
            })?;
            builder = builder.proxy(all);
        }
        let client = builder.build().map_err(ClientError::Client)?;

        Ok(DataClient {
            engine: RetryEngine::new(client, config.retry),
            proxy,
        })
    }
}

impl fmt::Debug for DataClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DataClientBuilder")
            .field("config", &self.config)
            .field("custom_selector", &self.selector.is_some())
            .field("base", &self.base)
            .finish()
    }
}

/// Fetches text over HTTP, retrying transient failures.
///
/// Every request goes through a [`RetryEngine`] using exponential backoff and
/// the default retry policy: only a 2xx response is handed back, anything
/// else is retried until the attempts run out.
///
/// ```no_run
/// use fetch_client::DataClient;
///
/// # async fn run() -> fetch_client::Result<()> {
/// let client = DataClient::new(["http://proxy-a:3128", "http://proxy-b:3128"])?;
/// let body = client.get("https://example.com/data.json").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DataClient {
    engine: RetryEngine<Client>,
    proxy: Option<String>,
}

impl DataClient {
    /// Builds a client with the default settings, routed through a randomly
    /// chosen entry of `proxies` (or directly, if the list is empty).
    ///
    /// # Errors
    ///
    /// See [`DataClientBuilder::build`].
    pub fn new<I, S>(proxies: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder().proxies(proxies).build()
    }

    pub fn builder() -> DataClientBuilder {
        DataClientBuilder::new()
    }

    /// The proxy every request is routed through, if any.
    pub fn selected_proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub fn retry_config(&self) -> &RetryConfig {
        self.engine.config()
    }

    /// Sends a `GET` request and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::Request`] if the URL does not parse or the
    /// request does not succeed within the configured attempts, and with
    /// [`ClientError::Body`] if the body cannot be read.
    pub async fn get(&self, url: &str) -> Result<String> {
        let mut envelope = RequestEnvelope::new(Method::GET, url)?;
        let response = self.engine.execute(&mut envelope).await?;
        read_text(response).await
    }

    /// Sends `payload` in a `POST` request with the given extra headers and
    /// returns the response body as text. The payload is resent unchanged on
    /// every attempt.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get); an invalid header name or value is reported as
    /// [`ClientError::Request`] before anything is sent.
    pub async fn post(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        payload: impl Into<Vec<u8>>,
    ) -> Result<String> {
        let mut envelope =
            RequestEnvelope::new(Method::POST, url)?.with_body(Cursor::new(payload.into()));
        for (name, value) in headers {
            envelope.insert_header(name, value)?;
        }
        let response = self.engine.execute(&mut envelope).await?;
        read_text(response).await
    }

    /// Reads a local file as text. No retry is involved.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::LocalFile`] if the file cannot be read or is
    /// not valid UTF-8.
    pub async fn local_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ClientError::LocalFile {
                path: path.to_path_buf(),
                source,
            })
    }
}

async fn read_text(response: Response) -> Result<String> {
    let url = response.url().clone();
    response
        .text()
        .await
        .map_err(|source| ClientError::Body { url, source })
}
