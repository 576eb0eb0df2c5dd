//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry and backoff
//! - HTML link classification
//! - One-hop crawl coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, FetchError, Fetcher, RetryPolicy};
pub use parser::{classify_links, classify_links_str, PageLinks};

use crate::config::Config;
use crate::output::Emitted;
use crate::DiverError;
use std::path::PathBuf;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Fetch the root page and extract its data
/// 3. Fetch each internal link once
/// 4. Look up IP information for the host
/// 5. Write the per-host output files
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `target` - The URL to crawl
/// * `output_dir` - Directory receiving the output files (must exist)
/// * `show_progress` - Draw a progress bar while internal links are fetched
///
/// # Returns
///
/// * `Ok(Emitted)` - The display result and the files written
/// * `Err(DiverError)` - Crawl failed, nothing was written
pub async fn crawl(
    config: Config,
    target: &str,
    output_dir: impl Into<PathBuf>,
    show_progress: bool,
) -> Result<Emitted, DiverError> {
    run_crawl(config, target, output_dir, show_progress).await
}
