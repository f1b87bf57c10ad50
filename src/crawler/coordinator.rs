//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that:
//! - Seeds the frontier with the listing URL for the configured year
//! - Fetches each page exactly once, in discovery order
//! - Parses every page's table and expands the frontier from its links
//! - Merges per-page records into one [`RecordSet`]
//!
//! Errors are split by [`WarnError::is_fatal`]. A fatal error, such as any
//! transport failure, aborts the crawl with no partial result. A page whose
//! table does not match the expected schema is logged and skipped.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_page;
use crate::output::CrawlReport;
use crate::record::{Record, RecordSet};
use crate::state::PageState;
use crate::url::{listing_url, parse_origin};
use crate::{Result, WarnError};
use std::time::{Duration, Instant};
use url::Url;

/// Records and statistics from one completed crawl
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub records: RecordSet,
    pub report: CrawlReport,
}

/// Main crawler coordinator structure
pub struct Coordinator<F> {
    fetcher: F,
    origin: Url,
    seed: Url,
    config: CrawlerConfig,
}

impl Coordinator<HttpFetcher> {
    /// Creates an HTTP-backed coordinator from the full configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let origin = parse_origin(&config.source.origin)?;
        let seed = listing_url(&origin, config.listing_year());
        let fetcher = HttpFetcher::new(&config.user_agent, &config.crawler)?;
        Ok(Self::new(fetcher, origin, seed, config.crawler.clone()))
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of page bodies
    /// * `origin` - Site origin that relative links resolve against
    /// * `seed` - First listing page
    /// * `config` - Crawl limits
    pub fn new(fetcher: F, origin: Url, seed: Url, config: CrawlerConfig) -> Self {
        Self {
            fetcher,
            origin,
            seed,
            config,
        }
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Runs the crawl under the configured deadline
    pub async fn run(&self) -> Result<CrawlOutcome> {
        let seconds = self.config.crawl_deadline_secs;

        match tokio::time::timeout(Duration::from_secs(seconds), self.crawl()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("Crawl exceeded its {}s deadline", seconds);
                Err(WarnError::Deadline { seconds })
            }
        }
    }

    /// Runs the main crawl loop
    ///
    /// `Start → FetchPage → ParsePage → ExpandFrontier`, repeated until the
    /// frontier is exhausted.
    async fn crawl(&self) -> Result<CrawlOutcome> {
        tracing::info!("Starting crawl at {}", self.seed);

        let start_time = Instant::now();
        let mut frontier = Frontier::new(&self.seed);
        let mut records: Vec<Record> = Vec::new();
        let mut report = CrawlReport::default();

        while frontier.pending_count() > 0 {
            if frontier.visited_count() >= self.config.max_pages {
                tracing::error!(
                    "Page limit of {} reached with {} pages still pending",
                    self.config.max_pages,
                    frontier.pending_count()
                );
                return Err(WarnError::PageLimit {
                    limit: self.config.max_pages,
                });
            }

            let Some((page_id, url)) = frontier.next_page() else {
                break;
            };
            tracing::debug!("Fetching {}", url);

            let body = match self.fetcher.fetch_page(&url).await {
                Ok(body) => body,
                Err(e) if e.is_fatal() => {
                    frontier.mark(page_id, PageState::Failed)?;
                    tracing::error!("Fetch failed for {}: {}", url, e);
                    return Err(e);
                }
                Err(e) => {
                    frontier.mark(page_id, PageState::Skipped)?;
                    tracing::warn!("Skipping page: {}", e);
                    report.pages_fetched += 1;
                    report.pages_skipped += 1;
                    report.visited.push(url.clone());
                    continue;
                }
            };
            report.pages_fetched += 1;
            report.visited.push(url.clone());

            let parsed = parse_page(&body, &self.origin);

            let mut new_pages = 0;
            for link in &parsed.links {
                if frontier.insert(link) {
                    tracing::debug!("Discovered page {}", link);
                    new_pages += 1;
                }
            }

            let table = parsed.table.map_err(|source| WarnError::Schema {
                url: url.to_string(),
                source,
            });

            match table {
                Ok(table) => {
                    frontier.mark(page_id, PageState::Processed)?;
                    tracing::info!(
                        "Parsed {}: {} records, {} rows skipped, {} new pages",
                        url,
                        table.records.len(),
                        table.skipped.len(),
                        new_pages
                    );
                    report.rows_skipped += table.skipped.len();
                    records.extend(table.records);
                }
                Err(e) if e.is_fatal() => {
                    frontier.mark(page_id, PageState::Failed)?;
                    tracing::error!("Parse failed for {}: {}", url, e);
                    return Err(e);
                }
                Err(e) => {
                    frontier.mark(page_id, PageState::Skipped)?;
                    tracing::warn!("Skipping page: {}", e);
                    report.pages_skipped += 1;
                }
            }
        }

        report.records = records.len();
        report.elapsed = start_time.elapsed();

        tracing::info!(
            "Crawl completed: {} records from {} pages in {:?}",
            report.records,
            report.pages_fetched,
            report.elapsed
        );

        Ok(CrawlOutcome {
            records: RecordSet::new(records),
            report,
        })
    }
}

/// Runs a complete crawl over HTTP
///
/// # Example
///
/// ```no_run
/// use warn_alerts::config::Config;
/// use warn_alerts::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(&Config::default()).await?;
/// println!("{} notices", outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome> {
    let coordinator = Coordinator::from_config(config)?;
    coordinator.run().await
}
