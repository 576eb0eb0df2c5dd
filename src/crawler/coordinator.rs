//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives one crawl invocation through its phases:
//! - Fetching the root page (fatal on failure)
//! - Extracting meta data, links and emails from it
//! - Expanding once into the internal links found on the root page
//! - Merging discoveries, enriching with IP information
//! - Handing the result to the sink

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, Fetcher, RetryPolicy};
use crate::crawler::parser::{classify_links, classify_links_str};
use crate::enrich::{parse_ip_info, HttpIpLookup, IpLookup};
use crate::extract::{extract_emails, extract_meta};
use crate::model::{CrawlResult, IpInfo};
use crate::output::{Emitted, ResultSink};
use crate::state::{CrawlPhase, CrawlState, Discoveries};
use crate::url::{extract_host, parse_target};
use crate::{DiverError, UrlError};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

/// Main crawler coordinator structure
///
/// Owns the HTTP client (through its fetcher) for the lifetime of the
/// coordinator; every traversal set lives in a [`CrawlState`] created fresh
/// per call to [`Coordinator::collect`].
pub struct Coordinator<L: IpLookup> {
    config: Config,
    fetcher: Fetcher,
    lookup: L,
    sink: ResultSink,
    show_progress: bool,
}

impl Coordinator<HttpIpLookup> {
    /// Creates a coordinator that enriches through the configured HTTP endpoint
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `output_dir` - Directory receiving the per-host files
    pub fn new(config: Config, output_dir: impl Into<PathBuf>) -> Result<Self, DiverError> {
        let client = build_http_client(&config)?;
        let lookup = HttpIpLookup::from_config(client.clone(), &config);
        Ok(Self::from_parts(
            Fetcher::new(client, &config),
            lookup,
            config,
            output_dir,
        ))
    }
}

impl<L: IpLookup> Coordinator<L> {
    /// Creates a coordinator with a custom IP lookup
    pub fn with_lookup(
        config: Config,
        lookup: L,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, DiverError> {
        let client = build_http_client(&config)?;
        Ok(Self::from_parts(
            Fetcher::new(client, &config),
            lookup,
            config,
            output_dir,
        ))
    }

    fn from_parts(
        fetcher: Fetcher,
        lookup: L,
        config: Config,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let sink = ResultSink::from_config(output_dir, &config);
        Self {
            config,
            fetcher,
            lookup,
            sink,
            show_progress: false,
        }
    }

    /// Draws a progress bar on stderr while internal links are fetched
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The retry policy used for every page fetch
    pub fn retry_policy(&self) -> RetryPolicy {
        self.fetcher.policy()
    }

    /// Crawls `target` and persists the result
    ///
    /// Returns the display view produced by the sink. No file is written
    /// when the crawl fails.
    pub async fn run(&self, target: &str) -> Result<Emitted, DiverError> {
        let result = self.collect(target).await?;
        let emitted = self.sink.emit(&result).map_err(|e| {
            tracing::error!("Error saving results for {}: {}", result.url, e);
            e
        })?;
        Ok(emitted)
    }

    /// Crawls `target` and assembles the full, untruncated result
    ///
    /// # Failure
    ///
    /// * Root page unavailable after all retries → [`DiverError::RootUnavailable`]
    /// * IP lookup or decoding failure, in strict mode → the enrichment error
    ///
    /// Internal pages that cannot be fetched are logged and skipped.
    pub async fn collect(&self, target: &str) -> Result<CrawlResult, DiverError> {
        let started = Instant::now();
        let crawled_at = Utc::now();

        let mut root = parse_target(target)?;
        root.set_fragment(None);
        let root_url = root.to_string();
        let host = extract_host(&root).ok_or(UrlError::MissingHost)?;
        let mut state = CrawlState::new();

        tracing::info!("Starting crawl of {}", root_url);

        // Root page
        state.advance(CrawlPhase::FetchRoot)?;
        state.mark_visited(&root_url);
        let html = match self.fetcher.fetch(&root_url).await {
            Ok(html) => html,
            Err(source) => {
                state.advance(CrawlPhase::Failed)?;
                return Err(DiverError::RootUnavailable {
                    url: root_url,
                    source,
                });
            }
        };
        state.stats.pages_fetched += 1;

        state.advance(CrawlPhase::ExtractRoot)?;
        let page_meta = extract_meta(&html);
        let root_links = classify_links(&html, &root);
        state.internal = root_links.internal;
        state.external = root_links.external;
        state.emails = extract_emails(&html);
        tracing::info!(
            "Root page has {} internal links, {} external links, {} meta tags",
            state.internal.len(),
            state.external.len(),
            page_meta.meta.len()
        );

        // One hop into the internal links
        state.advance(CrawlPhase::ExpandInternal)?;
        let discoveries = self.expand(&mut state).await;

        state.advance(CrawlPhase::Merge)?;
        state.merge(discoveries);

        state.advance(CrawlPhase::Enrich)?;
        let ip_info = match self.enrich(&host).await {
            Ok(info) => info,
            Err(e) if !self.config.crawler.strict_enrichment => {
                tracing::warn!("Continuing without IP information for {}: {}", host, e);
                IpInfo::new()
            }
            Err(e) => {
                state.advance(CrawlPhase::Failed)?;
                return Err(e);
            }
        };

        state.advance(CrawlPhase::Done)?;

        let elapsed = started.elapsed();
        tracing::info!(
            "Crawl of {} completed: {} pages fetched, {} failed, {} skipped in {:?}",
            root_url,
            state.stats.pages_fetched,
            state.stats.pages_failed,
            state.stats.pages_skipped,
            elapsed
        );

        Ok(CrawlResult {
            url: root_url,
            title: page_meta.title,
            description: page_meta.description,
            internal_links: state.internal,
            external_links: state.external,
            emails: state.emails,
            meta_data: page_meta.meta,
            ip_info,
            crawled_at,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            stats: state.stats,
        })
    }

    /// Fetches every not-yet-visited internal link of the current snapshot
    ///
    /// Links are marked visited before any fetch is issued, then fetched with
    /// at most `expansion_concurrency` requests in flight (one by default).
    /// Results are folded in snapshot order.
    async fn expand(&self, state: &mut CrawlState) -> Discoveries {
        let snapshot: Vec<String> = state.internal.iter().cloned().collect();
        let mut pending = Vec::with_capacity(snapshot.len());

        for url in snapshot {
            if state.mark_visited(&url) {
                pending.push(url);
            } else {
                tracing::debug!("Skipping already visited {}", url);
                state.stats.pages_skipped += 1;
            }
        }

        let concurrency = self.config.crawler.expansion_concurrency.max(1);
        tracing::info!(
            "Expanding {} internal links ({} at a time)",
            pending.len(),
            concurrency
        );

        let progress = self.progress_bar(pending.len());
        let fetcher = &self.fetcher;
        let mut pages = stream::iter(pending)
            .map(|url| async move {
                let outcome = fetcher.fetch(&url).await;
                (url, outcome)
            })
            .buffered(concurrency);

        let mut discoveries = Discoveries::default();
        while let Some((url, outcome)) = pages.next().await {
            progress.inc(1);
            match outcome {
                Ok(html) => {
                    state.stats.pages_fetched += 1;
                    absorb_page(&url, &html, &mut discoveries);
                }
                Err(e) => {
                    state.stats.pages_failed += 1;
                    tracing::warn!("Skipping internal page {}: {}", url, e);
                }
            }
        }
        progress.finish_and_clear();

        discoveries
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len as u64);
        match ProgressStyle::default_bar().template("Crawling [{bar:40.cyan/blue}] {pos}/{len}") {
            Ok(style) => bar.set_style(style.progress_chars("=>-")),
            Err(e) => tracing::debug!("Default progress style kept: {}", e),
        }
        bar
    }

    /// Looks up and decodes IP information for `host`
    async fn enrich(&self, host: &str) -> Result<IpInfo, DiverError> {
        let payload = self.lookup.lookup(host).await.map_err(|e| {
            tracing::error!("Error fetching IP information for {}: {}", host, e);
            e
        })?;
        parse_ip_info(host, &payload)
    }
}

/// Records emails and links of a fetched internal page
fn absorb_page(url: &str, html: &str, discoveries: &mut Discoveries) {
    discoveries.emails.extend(extract_emails(html));

    let links = classify_links_str(html, url);
    tracing::debug!(
        "{}: {} internal links, {} external links",
        url,
        links.internal.len(),
        links.external.len()
    );
    discoveries.internal.extend(links.internal);
    discoveries.external.extend(links.external);
}

/// Runs a complete crawl with the default HTTP IP lookup
///
/// The HTTP client is created for this call and released when it returns,
/// whatever the outcome.
pub async fn run_crawl(
    config: Config,
    target: &str,
    output_dir: impl Into<PathBuf>,
    show_progress: bool,
) -> Result<Emitted, DiverError> {
    let coordinator = Coordinator::new(config, output_dir)?.with_progress(show_progress);
    coordinator.run(target).await
}
