//! Report data types
//!
//! These are the values a crawl produces. Sets are ordered so that the
//! display view after spillover, and every file written from them, is stable.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Meta tag key to content mapping for one page
pub type MetaRecord = BTreeMap<String, String>;

/// IP information returned by the enrichment service
pub type IpInfo = serde_json::Map<String, serde_json::Value>;

/// A link to another host, paired with the page it was found on
///
/// The same URL seen on two different pages yields two distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ExternalLink {
    /// Absolute URL of the external resource
    pub url: String,

    /// Page the link was found on
    pub origin: String,
}

impl ExternalLink {
    pub fn new(url: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            origin: origin.into(),
        }
    }
}

impl fmt::Display for ExternalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (from {})", self.url, self.origin)
    }
}

/// Counters collected while crawling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Pages fetched successfully, root included
    pub pages_fetched: u32,

    /// Internal pages that stayed unavailable after all retries
    pub pages_failed: u32,

    /// Internal links skipped because they were already visited
    pub pages_skipped: u32,
}

/// Aggregated intelligence about one target site
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    /// The target URL as crawled
    pub url: String,

    /// Page title, or "No title"
    pub title: String,

    /// Meta description, or "No description"
    pub description: String,

    /// Internal links (truncated view once spilled to a file)
    pub internal_links: BTreeSet<String>,

    /// External links (truncated view once spilled to a file)
    pub external_links: BTreeSet<ExternalLink>,

    /// Email addresses found on the root page and internal pages
    pub emails: BTreeSet<String>,

    /// All meta tags of the root page
    pub meta_data: MetaRecord,

    /// IP information about the target host
    pub ip_info: IpInfo,

    /// When the crawl started
    pub crawled_at: DateTime<Utc>,

    /// Wall clock duration of the crawl in milliseconds
    pub elapsed_ms: u64,

    /// Fetch counters
    pub stats: CrawlStats,
}
