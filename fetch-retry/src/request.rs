//! The request carried across every attempt of one logical operation.

use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{IntoUrl, Method, Request, Url};

use crate::error::{Error, Result};

/// A request body that can be read again from its start.
///
/// Implemented for every `Read + Seek + Send` type, e.g.
/// `std::io::Cursor<Vec<u8>>` or `std::fs::File`.
pub trait RewindableBody: Read + Seek + Send {}

impl<T: Read + Seek + Send> RewindableBody for T {}

/// Method, URL and headers of a request together with a rewindable body.
///
/// Built once per logical operation and handed to
/// [`RetryEngine::execute`](crate::RetryEngine::execute), which turns it into
/// a fresh [`reqwest::Request`] for every attempt, rewinding the body in
/// place beforehand.
///
/// ```
/// use std::io::Cursor;
/// use fetch_retry::RequestEnvelope;
///
/// let mut envelope = RequestEnvelope::new(reqwest::Method::POST, "https://example.com/upload")?
///     .with_body(Cursor::new(b"payload".to_vec()));
/// envelope.insert_header("content-type", "text/plain")?;
/// assert!(envelope.has_body());
/// # Ok::<(), fetch_retry::Error>(())
/// ```
pub struct RequestEnvelope {
    request: Request,
    body: Option<Box<dyn RewindableBody>>,
}

impl RequestEnvelope {
    /// Creates a bodiless envelope.
    ///
    /// # Errors
    ///
    /// This method fails whenever the supplied `Url` cannot be parsed.
    pub fn new<U: IntoUrl>(method: Method, url: U) -> Result<Self> {
        let url = url.into_url().map_err(Error::Build)?;
        Ok(Self::from_request(Request::new(method, url)))
    }

    /// Wraps an existing request. Its body, if any, is discarded; attach a
    /// rewindable one with [`with_body`](Self::with_body).
    pub fn from_request(mut request: Request) -> Self {
        request.body_mut().take();
        Self {
            request,
            body: None,
        }
    }

    /// Attaches the body sent with every attempt.
    pub fn with_body<B>(mut self, body: B) -> Self
    where
        B: RewindableBody + 'static,
    {
        self.body = Some(Box::new(body));
        self
    }

    /// Adds a header, keeping any value already stored under the same name.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidHeader`] if the name or the value is not a
    /// valid HTTP header token.
    pub fn insert_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::InvalidHeader(format!("name {name:?}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| Error::InvalidHeader(format!("value for {name}")))?;
        self.request.headers_mut().append(name, value);
        Ok(())
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    pub fn url(&self) -> &Url {
        self.request.url()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Repositions the body at its start. A bodiless envelope is a no-op.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Rewind`] if the body cannot seek.
    pub fn rewind(&mut self) -> Result<()> {
        if let Some(body) = self.body.as_mut() {
            body.seek(SeekFrom::Start(0)).map_err(Error::Rewind)?;
        }
        Ok(())
    }

    /// Materialises the request sent by one attempt. The body is read from
    /// its current position, so [`rewind`](Self::rewind) first.
    pub(crate) fn to_attempt(&mut self, timeout: Duration) -> Result<Request> {
        let mut attempt = Request::new(self.request.method().clone(), self.request.url().clone());
        *attempt.headers_mut() = self.request.headers().clone();
        *attempt.version_mut() = self.request.version();
        *attempt.timeout_mut() = Some(timeout);

        if let Some(body) = self.body.as_mut() {
            let mut bytes = Vec::new();
            body.read_to_end(&mut bytes).map_err(Error::RequestBody)?;
            *attempt.body_mut() = Some(bytes.into());
        }
        Ok(attempt)
    }
}

impl fmt::Debug for RequestEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RequestEnvelope")
            .field("request", &self.request)
            .field("has_body", &self.has_body())
            .finish()
    }
}
