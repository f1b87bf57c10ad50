//! Crawl statistics
//!
//! This module provides the per-crawl report produced by the coordinator and
//! its human-readable rendering.

use std::time::Duration;
use url::Url;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Pages fetched successfully
    pub pages_fetched: usize,

    /// Fetched pages whose table did not match the expected schema
    pub pages_skipped: usize,

    /// Data rows dropped because they were not valid records
    pub rows_skipped: usize,

    /// Records collected across all pages
    pub records: usize,

    /// Pages in the order they were fetched
    pub visited: Vec<Url>,

    pub elapsed: Duration,
}

impl CrawlReport {
    /// Pages that contributed records
    pub fn pages_processed(&self) -> usize {
        self.pages_fetched - self.pages_skipped
    }
}

/// Prints the crawl report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages fetched: {}", report.pages_fetched);
    println!("  Pages processed: {}", report.pages_processed());
    println!("  Pages skipped (schema mismatch): {}", report.pages_skipped);
    println!("  Rows skipped: {}", report.rows_skipped);
    println!("  Records collected: {}", report.records);
    println!("  Elapsed: {:.2}s", report.elapsed.as_secs_f64());
    println!();

    if !report.visited.is_empty() {
        println!("Pages ({}):", report.visited.len());
        for url in &report.visited {
            println!("  - {}", url);
        }
        println!();
    }
}
