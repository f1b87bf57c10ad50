//! Configuration module for WARN Alerts
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use warn_alerts::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("warn.toml")).unwrap();
//! println!("Crawling listing year {}", config.listing_year());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FilterConfig, OutputConfig, SourceConfig, UserAgentConfig,
    DEFAULT_ORIGIN, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
