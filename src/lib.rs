//! Webdiver: a one-hop site intelligence crawler
//!
//! This crate fetches a web page, follows the internal links found on it once,
//! and aggregates title, description, meta tags, contact emails, link sets and
//! origin-IP enrichment into a single crawl report.

pub mod config;
pub mod crawler;
pub mod enrich;
pub mod extract;
pub mod model;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Webdiver operations
#[derive(Debug, Error)]
pub enum DiverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Root page {url} could not be fetched: {source}")]
    RootUnavailable {
        url: String,
        source: crawler::FetchError,
    },

    #[error("IP lookup failed for {host}: {message}")]
    Enrichment { host: String, message: String },

    #[error("Could not decode IP information for {host}: {source}")]
    EnrichmentDecode {
        host: String,
        source: serde_json::Error,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid crawl phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Webdiver operations
pub type Result<T> = std::result::Result<T, DiverError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Coordinator};
pub use enrich::{HttpIpLookup, IpLookup};
pub use model::{CrawlResult, ExternalLink};
pub use state::CrawlPhase;
pub use url::{extract_host, parse_target, same_site};
