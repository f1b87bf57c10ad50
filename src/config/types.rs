use chrono::Datelike;
use serde::Deserialize;

/// Default site serving the WARN listing
pub const DEFAULT_ORIGIN: &str = "https://reactwarn.floridajobs.org";

/// Browser-like identification; the listing rejects obvious bots
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36";

/// Main configuration structure for WARN Alerts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub crawler: CrawlerConfig,
    pub filter: FilterConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Returns the listing year to crawl
    pub fn listing_year(&self) -> i32 {
        self.source
            .year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

/// Where the listing lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Scheme and host of the listing site
    pub origin: String,

    /// Listing year; the current year when unset
    pub year: Option<i32>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            year: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Timeout for a single page request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Budget for the whole crawl (seconds)
    #[serde(rename = "crawl-deadline-secs")]
    pub crawl_deadline_secs: u64,

    /// Upper bound on the number of listing pages fetched
    #[serde(rename = "max-pages")]
    pub max_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            crawl_deadline_secs: 300,
            max_pages: 500,
        }
    }
}

/// Company-name filtering
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Case-insensitive company-name substrings; empty selects everything
    pub terms: Vec<String>,

    /// Sort matches by notification and layoff date, newest first
    pub sort: bool,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV export path; `{year}` is replaced with the listing year
    #[serde(rename = "csv-path")]
    pub csv_path: Option<String>,
}
