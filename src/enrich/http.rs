use crate::config::{Config, HOST_PLACEHOLDER};
use crate::enrich::IpLookup;
use crate::DiverError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// IP lookup against an HTTP JSON endpoint such as ip-api.com
#[derive(Debug, Clone)]
pub struct HttpIpLookup {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpIpLookup {
    /// Creates a lookup for an endpoint template containing `{host}`
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Creates a lookup from the enrichment and crawler configuration
    pub fn from_config(client: Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: config.enrichment.endpoint.clone(),
            timeout: Duration::from_secs(config.crawler.request_timeout_secs),
        }
    }

    /// The lookup URL for `host`
    pub fn url_for(&self, host: &str) -> String {
        self.endpoint.replace(HOST_PLACEHOLDER, host)
    }
}

#[async_trait]
impl IpLookup for HttpIpLookup {
    async fn lookup(&self, host: &str) -> Result<String, DiverError> {
        let url = self.url_for(host);
        tracing::debug!("Looking up IP information at {}", url);

        let failure = |message: String| DiverError::Enrichment {
            host: host.to_string(),
            message,
        };

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| failure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failure(format!("HTTP status {}", status.as_u16())));
        }

        response.text().await.map_err(|e| failure(e.to_string()))
    }
}
