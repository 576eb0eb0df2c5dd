//! Configuration module for Webdiver
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so running without a file
//! behaves like the stock crawler.
//!
//! # Example
//!
//! ```no_run
//! use webdiver::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("webdiver.toml")).unwrap();
//! println!("Spill threshold: {}", config.output.spill_threshold);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, EnrichmentConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_or_default, parse_config};
pub use validation::HOST_PLACEHOLDER;
