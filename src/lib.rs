//! WARN Alerts: a layoff-notice watcher
//!
//! This crate crawls the paginated WARN notice listing, normalizes every table
//! row into a [`Record`], and filters the collected set by company name so the
//! results can be rendered as alert text or exported as CSV.

pub mod config;
pub mod crawler;
pub mod filter;
pub mod output;
pub mod record;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for WARN Alerts operations
#[derive(Debug, Error)]
pub enum WarnError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unable to fetch {url}: HTTP {status}")]
    Transport { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Schema mismatch on {url}: {source}")]
    Schema { url: String, source: SchemaError },

    #[error("Crawl exceeded its deadline of {seconds}s")]
    Deadline { seconds: u64 },

    #[error("Crawl exceeded the page limit of {limit}")]
    PageLimit { limit: usize },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::PageState,
        to: state::PageState,
    },

    #[error("Unknown page id {id}")]
    UnknownPage { id: usize },
}

impl WarnError {
    /// Returns true if the error aborts the whole crawl
    ///
    /// Schema mismatches are contained at page granularity; everything else is fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Schema { .. })
    }
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

/// Table structure errors that make a page unparseable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("page contains no table")]
    MissingTable,

    #[error("table has no header row")]
    MissingHeaders,

    #[error("table has no STATE_NOTIFICATION_DATE column")]
    MissingNotificationDate,

    #[error("row {row} has {cells} cells but only {headers} headers")]
    TooManyCells {
        row: usize,
        cells: usize,
        headers: usize,
    },
}

/// Result type alias for WARN Alerts operations
pub type Result<T> = std::result::Result<T, WarnError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use filter::{filter_records, FilterResult};
pub use record::{Record, RecordSet};
pub use state::PageState;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_schema_errors_are_contained() {
        let schema = WarnError::Schema {
            url: "https://warn.example.org/WarnList/Records?year=2025".to_string(),
            source: SchemaError::MissingTable,
        };
        let transport = WarnError::Transport {
            url: "https://warn.example.org/WarnList/Records?year=2025".to_string(),
            status: 503,
        };

        assert!(!schema.is_fatal());
        assert!(transport.is_fatal());
        assert!(WarnError::Deadline { seconds: 300 }.is_fatal());
        assert!(WarnError::PageLimit { limit: 500 }.is_fatal());
    }

    #[test]
    fn test_error_messages_name_the_page() {
        let error = WarnError::Transport {
            url: "https://warn.example.org/WarnList/Records?year=2025".to_string(),
            status: 500,
        };
        assert_eq!(
            error.to_string(),
            "Unable to fetch https://warn.example.org/WarnList/Records?year=2025: HTTP 500"
        );
    }
}
