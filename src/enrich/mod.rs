//! IP enrichment
//!
//! The crawler asks an external service about the target host and attaches
//! the decoded answer to the report. The service is behind the [`IpLookup`]
//! trait so tests and alternative providers can be swapped in.

mod http;

pub use http::HttpIpLookup;

use crate::model::IpInfo;
use crate::DiverError;
use async_trait::async_trait;

/// Source of IP/geolocation information for a host
#[async_trait]
pub trait IpLookup: Send + Sync {
    /// Returns the raw JSON payload describing `host`
    async fn lookup(&self, host: &str) -> Result<String, DiverError>;
}

/// Decodes a lookup payload into a field mapping
///
/// Anything other than a JSON object is rejected.
///
/// # Example
///
/// ```
/// use webdiver::enrich::parse_ip_info;
///
/// let info = parse_ip_info("example.com", r#"{"query":"93.184.216.34","country":"US"}"#).unwrap();
/// assert_eq!(info["country"], "US");
/// assert!(parse_ip_info("example.com", "not json").is_err());
/// ```
pub fn parse_ip_info(host: &str, payload: &str) -> Result<IpInfo, DiverError> {
    serde_json::from_str::<IpInfo>(payload).map_err(|source| {
        tracing::error!("Error decoding IP information for {}: {}", host, payload);
        DiverError::EnrichmentDecode {
            host: host.to_string(),
            source,
        }
    })
}
