//! URL handling module for Webdiver
//!
//! This module provides target URL validation, host extraction and the
//! same-site test that decides whether a link is internal or external.

mod domain;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{extract_host, same_site};

/// Scope of a discovered link relative to the page it was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkScope {
    /// Same host (and explicit port) as the base URL
    Internal,
    /// Any other host
    External,
}

impl LinkScope {
    /// Returns true if the link stays on the crawled site
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Returns true if the URL uses a scheme the crawler can fetch
pub fn is_fetchable_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Classifies an absolute URL against the base URL of the page it came from
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webdiver::url::{classify_link, LinkScope};
///
/// let base = Url::parse("https://example.com/").unwrap();
/// let inner = Url::parse("https://example.com/about").unwrap();
/// let outer = Url::parse("https://other.org/").unwrap();
/// assert_eq!(classify_link(&inner, &base), LinkScope::Internal);
/// assert_eq!(classify_link(&outer, &base), LinkScope::External);
/// ```
pub fn classify_link(url: &Url, base: &Url) -> LinkScope {
    if same_site(url, base) {
        LinkScope::Internal
    } else {
        LinkScope::External
    }
}

/// Parses and validates the crawl target supplied by the user
///
/// The target must be an absolute `http` or `https` URL with a host.
pub fn parse_target(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if !is_fetchable_scheme(&url) {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if extract_host(&url).is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
