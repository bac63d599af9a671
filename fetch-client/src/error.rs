use std::io;
use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The retrying request itself failed.
    #[error(transparent)]
    Request(#[from] fetch_retry::Error),
    /// A response arrived but its body could not be read as text.
    #[error("cannot read body from {url}: {source}")]
    Body {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    /// A local file could not be opened or is not valid UTF-8.
    #[error("cannot read file {}: {source}", path.display())]
    LocalFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The selected proxy is not a usable proxy URL.
    #[error("invalid proxy {proxy:?}: {source}")]
    InvalidProxy {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },
    /// The underlying reqwest client could not be built.
    #[error("cannot build client: {0}")]
    Client(#[source] reqwest::Error),
    /// A proxy list file could not be read.
    #[error("cannot read proxy list {}: {source}", path.display())]
    ProxyList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ClientError {
    /// Returns true if attempts ran out before any attempt was accepted.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, ClientError::Request(e) if e.is_exhausted())
    }

    /// Returns the status code of the last response, if there was one.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ClientError::Request(e) => e.status(),
            ClientError::Body { source, .. } => source.status(),
            _ => None,
        }
    }
}
