//! Crawler module for the paginated notice listing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of listing pages
//! - Table parsing into records
//! - Pagination link discovery
//! - The frontier of discovered and visited pages
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod pages;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, fetch_url, HttpFetcher, PageFetcher};
pub use frontier::{Frontier, FrontierEntry, PageId};
pub use pages::discover_pages;
pub use parser::{
    parse_page, parse_row, parse_table, parse_table_element, Column, ParsedPage, ParsedTable,
    RowOutcome, SkipReason,
};
