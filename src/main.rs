//! WARN Alerts main entry point
//!
//! This is the command-line interface for the WARN notice watcher.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use warn_alerts::config::{load_config_with_hash, Config};
use warn_alerts::crawler::{run_crawl, Coordinator};
use warn_alerts::filter::{filter_records, parse_terms};
use warn_alerts::output::{
    default_csv_filename, format_alert, print_report, resolve_csv_path, summary_message,
    write_csv_file,
};

/// WARN Alerts: a layoff-notice watcher
///
/// Crawls every page of the WARN notice listing for the year, filters the
/// notices by company name and prints an alert for each match.
#[derive(Parser, Debug)]
#[command(name = "warn-alerts")]
#[command(version = "1.0.0")]
#[command(about = "Watch the WARN listing for layoff notices", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Comma-separated company-name terms; overrides the configured terms
    #[arg(short, long, value_name = "TERMS")]
    terms: Option<String>,

    /// Listing year; overrides the configured year
    #[arg(long)]
    year: Option<i32>,

    /// Sort matches by notification date, newest first
    #[arg(long)]
    sort: bool,

    /// Export matches as CSV (to the configured path, or PATH)
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "")]
    csv: Option<String>,

    /// Print crawl statistics after the run
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration and seed URL without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };
    apply_overrides(&mut config, &cli);
    warn_alerts::config::validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    handle_crawl(&config, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn_alerts=info,warn"),
            1 => EnvFilter::new("warn_alerts=debug,info"),
            2 => EnvFilter::new("warn_alerts=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line values take precedence over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(terms) = &cli.terms {
        config.filter.terms = parse_terms(terms);
    }
    if let Some(year) = cli.year {
        config.source.year = Some(year);
    }
    if cli.sort {
        config.filter.sort = true;
    }
    if let Some(path) = cli.csv.as_deref().filter(|p| !p.is_empty()) {
        config.output.csv_path = Some(path.to_string());
    }
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let coordinator = Coordinator::from_config(config)?;

    println!("=== WARN Alerts Dry Run ===\n");

    println!("Source:");
    println!("  Origin: {}", config.source.origin);
    println!("  Year: {}", config.listing_year());
    println!("  Seed URL: {}", coordinator.seed());

    println!("\nCrawler:");
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!("  Crawl deadline: {}s", config.crawler.crawl_deadline_secs);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  User agent: {}", config.user_agent.user_agent);

    println!("\nFilter ({} terms):", config.filter.terms.len());
    for term in &config.filter.terms {
        println!("  - {}", term);
    }
    if config.filter.terms.is_empty() {
        println!("  (none: every notice matches)");
    }
    println!("  Sorted: {}", config.filter.sort);

    if let Some(path) = &config.output.csv_path {
        println!(
            "\nCSV export: {}",
            resolve_csv_path(path, config.listing_year()).display()
        );
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main crawl, filter and report operation
async fn handle_crawl(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    let year = config.listing_year();

    let outcome = match run_crawl(config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e).context("Unable to fetch the WARN listing");
        }
    };

    if cli.stats {
        print_report(&outcome.report);
    }

    let mut result = filter_records(&outcome.records, &config.filter.terms);
    if config.filter.sort {
        result = result.sorted();
    }

    let message = summary_message(result.count);
    tracing::info!("{}", message);

    if !result.is_empty() {
        println!("{}", format_alert(&result.records));
    }
    println!("{} ({})", message, year);

    if cli.csv.is_some() || config.output.csv_path.is_some() {
        let path = match &config.output.csv_path {
            Some(template) => resolve_csv_path(template, year),
            None => PathBuf::from(default_csv_filename(year)),
        };
        write_csv_file(&result.records, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ CSV exported to: {}", path.display());
    }

    Ok(())
}
