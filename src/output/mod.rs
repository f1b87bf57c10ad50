//! Output module for rendering filtered records
//!
//! This module handles:
//! - Alert text bodies for the notification channel
//! - CSV export files
//! - Crawl statistics

mod alert;
mod csv;
pub mod stats;
mod traits;

pub use alert::{format_alert, format_record, summary_message, AlertFormatter, ALERT_LABELS};
pub use csv::CsvFormatter;
pub use stats::{print_report, CrawlReport};
pub use traits::{OutputError, OutputResult, RecordFormatter};

use crate::record::Record;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Placeholder replaced by the listing year in configured export paths
const YEAR_PLACEHOLDER: &str = "{year}";

/// Default export file name for a listing year
pub fn default_csv_filename(year: i32) -> String {
    format!("florida_warn_jobs_{}.csv", year)
}

/// Expands `{year}` in a configured export path
pub fn resolve_csv_path(template: &str, year: i32) -> PathBuf {
    PathBuf::from(template.replace(YEAR_PLACEHOLDER, &year.to_string()))
}

/// Writes records to a CSV file, replacing any existing file
pub fn write_csv_file(records: &[Record], path: &Path) -> OutputResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    CsvFormatter::new().write_records(records, &mut writer)?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
