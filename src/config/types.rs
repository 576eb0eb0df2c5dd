use serde::Deserialize;

/// Main configuration structure for Webdiver
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub enrichment: EnrichmentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of retries after the first failed attempt
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Length of one backoff unit (milliseconds)
    #[serde(rename = "backoff-unit-ms")]
    pub backoff_unit_ms: u64,

    /// Per-attempt request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Internal pages fetched at once during expansion (1 = sequential)
    #[serde(rename = "expansion-concurrency")]
    pub expansion_concurrency: usize,

    /// Abort the crawl when IP enrichment fails
    #[serde(rename = "strict-enrichment")]
    pub strict_enrichment: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_unit_ms: 1000,
            request_timeout_secs: 10,
            expansion_concurrency: 1,
            strict_enrichment: true,
        }
    }
}

/// User agent rotation configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Pool of user agent strings, one is picked at random per request
    pub pool: Vec<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            pool: DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Link sets larger than this are written to a file and truncated
    #[serde(rename = "spill-threshold")]
    pub spill_threshold: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { spill_threshold: 20 }
    }
}

/// IP enrichment service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Lookup URL template, `{host}` is replaced with the target host
    pub endpoint: String,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://ip-api.com/json/{host}".to_string(),
        }
    }
}

const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4.1 Safari/605.1.15",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
];
