//! A small text-fetching client on top of [`fetch_retry`].
//!
//! [`DataClient`] retries `GET` and `POST` requests with exponential backoff,
//! routes them through one proxy picked at construction time and returns the
//! response body as a `String`.
//!
//! ```no_run
//! use std::collections::HashMap;
//! use fetch_client::{load_proxy_list, DataClient};
//!
//! # async fn run() -> fetch_client::Result<()> {
//! let proxies = load_proxy_list("proxy.txt").await?;
//! let client = DataClient::new(proxies)?;
//!
//! let headers = HashMap::from([("content-type".to_owned(), "application/json".to_owned())]);
//! let reply = client
//!     .post("https://example.com/items", &headers, r#"{"name":"x"}"#)
//!     .await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```
mod client;
mod error;
mod proxy;

pub use client::{ClientConfig, DataClient, DataClientBuilder};
pub use error::{ClientError, Result};
pub use proxy::{load_proxy_list, ProxySelector};

pub use fetch_retry::RetryConfig;
