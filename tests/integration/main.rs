//! Integration tests for Webdiver
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! fetcher, the IP lookup and the full crawl cycle end-to-end. The CLI tests
//! run the compiled binary.

mod cli_tests;
mod fetch_tests;
mod lookup_tests;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use webdiver::config::Config;
use webdiver::{DiverError, IpLookup};

/// Creates a test configuration with fast backoff
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.crawler.max_retries = 3;
    config.crawler.backoff_unit_ms = 1; // Very short for testing
    config.crawler.request_timeout_secs = 5;
    config.user_agent.pool = vec!["TestBot/1.0".to_string()];
    config
}

/// IP lookup that returns a fixed payload and records the hosts it was asked about
///
/// Clones share the recorded hosts.
#[derive(Clone)]
pub struct StaticLookup {
    payload: String,
    hosts: Arc<Mutex<Vec<String>>>,
}

impl StaticLookup {
    pub fn new(payload: &str) -> Self {
        Self {
            payload: payload.to_string(),
            hosts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn hosts(&self) -> Vec<String> {
        self.hosts.lock().unwrap().clone()
    }
}

#[async_trait]
impl IpLookup for StaticLookup {
    async fn lookup(&self, host: &str) -> Result<String, DiverError> {
        self.hosts.lock().unwrap().push(host.to_string());
        Ok(self.payload.clone())
    }
}

/// IP lookup that always fails
pub struct FailingLookup;

#[async_trait]
impl IpLookup for FailingLookup {
    async fn lookup(&self, host: &str) -> Result<String, DiverError> {
        Err(DiverError::Enrichment {
            host: host.to_string(),
            message: "service unavailable".to_string(),
        })
    }
}

/// Wraps a body in a minimal HTML page
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}
