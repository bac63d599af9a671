use std::io;

use reqwest::{Method, StatusCode, Url};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be built, e.g. the URL does not parse.
    #[error("cannot create request: {0}")]
    Build(#[source] reqwest::Error),
    /// A header name or value is not a valid HTTP token.
    #[error("cannot create request: invalid header {0}")]
    InvalidHeader(String),
    /// The retry configuration violates one of its invariants.
    #[error("invalid retry configuration: {0}")]
    Config(String),
    /// The request body could not be repositioned to its start.
    #[error("failed to seek body: {0}")]
    Rewind(#[source] io::Error),
    /// The rewound request body could not be read into the attempt.
    #[error("failed to read body: {0}")]
    RequestBody(#[source] io::Error),
    /// Error from the underlying reqwest client
    #[error("Request error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Error from a transport other than reqwest
    #[error("Transport error: {0}")]
    Transport(anyhow::Error),
    /// A response was obtained but a retry policy rejected its status.
    #[error("unexpected status: {0}")]
    Status(StatusCode),
    /// Every attempt asked for a retry.
    #[error("{method} {url} giving up after {attempts} attempts")]
    Exhausted {
        method: Method,
        url: Url,
        attempts: u32,
        /// Status of the last response, if the last attempt produced one.
        last_status: Option<StatusCode>,
        /// Error preserved from the last attempt, if any. Always a
        /// [`fetch_retry::Error`](Error); see [`Error::last_error`].
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Wraps the failure of a transport other than reqwest.
    pub fn transport<E>(err: E) -> Self
    where
        E: 'static + Send + Sync + std::error::Error,
    {
        Error::Transport(err.into())
    }

    /// The error of the last attempt preserved by [`Error::Exhausted`].
    pub fn last_error(&self) -> Option<&Error> {
        match self {
            Error::Exhausted {
                source: Some(source),
                ..
            } => source.downcast_ref::<Error>(),
            _ => None,
        }
    }

    /// Returns a possible URL related to this error.
    pub fn url(&self) -> Option<&Url> {
        match self {
            Error::Build(e) | Error::Reqwest(e) => e.url(),
            Error::Exhausted { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Returns true if the error is related to a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Reqwest(e) => e.is_timeout(),
            Error::Exhausted { .. } => self.last_error().is_some_and(Error::is_timeout),
            _ => false,
        }
    }

    /// Returns true if the error is related to connect
    pub fn is_connect(&self) -> bool {
        match self {
            Error::Reqwest(e) => e.is_connect(),
            Error::Exhausted { .. } => self.last_error().is_some_and(Error::is_connect),
            _ => false,
        }
    }

    /// Returns true if attempts ran out before any attempt was accepted.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Error::Exhausted { .. })
    }

    /// Returns the status code, if the error was generated from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Reqwest(e) => e.status(),
            Error::Status(status) => Some(*status),
            Error::Exhausted { last_status, .. } => *last_status,
            _ => None,
        }
    }
}
