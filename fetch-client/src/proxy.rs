//! Choosing one proxy out of a configured list.

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{ClientError, Result};

/// Picks the proxy a [`DataClient`](crate::DataClient) routes every request
/// through.
///
/// Implemented for every [`rand::Rng`], choosing uniformly; pass a seeded
/// `rand::rngs::StdRng` for a reproducible choice.
pub trait ProxySelector {
    /// Returns one entry of `proxies`, or `None` if the list is empty.
    fn select_proxy<'a>(&mut self, proxies: &'a [String]) -> Option<&'a str>;
}

impl<R> ProxySelector for R
where
    R: Rng + ?Sized,
{
    fn select_proxy<'a>(&mut self, proxies: &'a [String]) -> Option<&'a str> {
        proxies.choose(self).map(String::as_str)
    }
}

/// Reads a newline-separated proxy list.
///
/// Surrounding whitespace is trimmed; blank lines and lines starting with
/// `#` are skipped.
///
/// # Errors
///
/// Fails with [`ClientError::ProxyList`] if the file cannot be read.
pub async fn load_proxy_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ClientError::ProxyList {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_proxy_list(&contents))
}

fn parse_proxy_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
