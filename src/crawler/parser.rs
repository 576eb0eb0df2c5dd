//! HTML link classifier
//!
//! This module parses anchors out of fetched pages and splits them into
//! internal links (same site as the page) and external links (tagged with
//! the page they were found on).

use crate::model::ExternalLink;
use crate::url::{classify_link, is_fetchable_scheme, LinkScope};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Links found on a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// Absolute URLs on the same site as the page
    pub internal: BTreeSet<String>,

    /// Absolute URLs on other sites, paired with the page URL
    pub external: BTreeSet<ExternalLink>,
}

impl PageLinks {
    /// Total number of distinct links on the page
    pub fn len(&self) -> usize {
        self.internal.len() + self.external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}

/// Parses HTML content and classifies its anchors
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document, resolved against `base_url`
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:`, `data:` links
/// - Fragment-only links (`#section`)
/// - Anything that does not resolve to `http` or `https`
///
/// Every surviving link lands in exactly one of the two sets.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL, used for resolution and as the external origin
///
/// # Example
///
/// ```
/// use webdiver::crawler::classify_links;
/// use url::Url;
///
/// let html = r#"<a href="/about">About</a><a href="https://other.org/">Other</a>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let links = classify_links(html, &base_url);
/// assert!(links.internal.contains("https://example.com/about"));
/// assert_eq!(links.external.len(), 1);
/// ```
pub fn classify_links(html: &str, base_url: &Url) -> PageLinks {
    let document = Html::parse_document(html);
    let mut links = PageLinks::default();

    let a_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(e) => {
            tracing::error!("Error parsing links from {}: {:?}", base_url, e);
            return links;
        }
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(absolute_url) = resolve_link(href, base_url) else {
            continue;
        };

        match classify_link(&absolute_url, base_url) {
            LinkScope::Internal => {
                links.internal.insert(absolute_url.to_string());
            }
            LinkScope::External => {
                links
                    .external
                    .insert(ExternalLink::new(absolute_url.as_str(), base_url.as_str()));
            }
        }
    }

    links
}

/// Classifies links of a page given by its URL string
///
/// A base URL that does not parse degrades to an empty result and is logged.
pub fn classify_links_str(html: &str, base_url: &str) -> PageLinks {
    match Url::parse(base_url) {
        Ok(base) => classify_links(html, &base),
        Err(e) => {
            tracing::error!("Error parsing links from {}: {}", base_url, e);
            PageLinks::default()
        }
    }
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only references
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    base_url
        .join(href)
        .ok()
        .filter(|absolute_url| is_fetchable_scheme(absolute_url))
}
