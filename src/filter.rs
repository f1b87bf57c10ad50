//! Company-name filtering of a crawled record set
//!
//! Terms are case-insensitive substrings. Matches are collected term by term,
//! and a record matched by several terms is kept once, at its first match.

use crate::record::{Record, RecordSet};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Date format used by the listing
const SOURCE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Records selected by a filter, with their count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    pub records: Vec<Record>,
    pub count: usize,
}

impl FilterResult {
    fn new(records: Vec<Record>) -> Self {
        let count = records.len();
        Self { records, count }
    }

    /// Returns true if nothing matched
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the result sorted for display, newest notices first
    pub fn sorted(mut self) -> Self {
        sort_by_dates_desc(&mut self.records);
        self
    }
}

/// Splits comma-separated user input into search terms
///
/// # Examples
///
/// ```
/// use warn_alerts::filter::parse_terms;
///
/// assert_eq!(parse_terms(" UHealth, Nicklaus ,,"), vec!["uhealth", "nicklaus"]);
/// ```
pub fn parse_terms(input: &str) -> Vec<String> {
    let terms: Vec<&str> = input.split(',').collect();
    normalize_terms(terms.as_slice())
}

/// Trims and lower-cases terms, dropping blank ones
pub fn normalize_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms
        .iter()
        .map(|term| term.as_ref().trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

/// Selects the records whose company name contains any of the terms
///
/// With no (non-blank) terms the whole set is returned unchanged.
///
/// # Examples
///
/// ```
/// use warn_alerts::filter::filter_records;
/// use warn_alerts::record::{Record, RecordSet};
///
/// let set = RecordSet::new(vec![Record {
///     company_name: "Acme Corp".to_string(),
///     state_notification_date: "01/15/2025".to_string(),
///     layoff_date: None,
///     employees_affected: None,
///     industry: None,
///     filename_url: String::new(),
/// }]);
/// assert_eq!(filter_records(&set, &["ACME"]).count, 1);
/// assert!(filter_records(&set, &["globex"]).is_empty());
/// ```
pub fn filter_records<S: AsRef<str>>(set: &RecordSet, terms: &[S]) -> FilterResult {
    let terms = normalize_terms(terms);

    if terms.is_empty() {
        return FilterResult::new(set.as_slice().to_vec());
    }

    let names: Vec<String> = set.iter().map(|r| r.company_name.to_lowercase()).collect();
    let mut selected = vec![false; set.len()];
    let mut matches = Vec::new();

    for term in &terms {
        for (index, name) in names.iter().enumerate() {
            if !selected[index] && name.contains(term.as_str()) {
                selected[index] = true;
                matches.push(set[index].clone());
            }
        }
    }

    FilterResult::new(matches)
}

/// Stable sort by (notification date, layoff date), newest first
///
/// Dates that do not parse as `MM/DD/YYYY` sort after all parseable dates and
/// keep their relative order.
pub fn sort_by_dates_desc(records: &mut [Record]) {
    records.sort_by(|a, b| {
        compare_dates_desc(&a.state_notification_date, &b.state_notification_date).then_with(
            || {
                compare_dates_desc(
                    a.layoff_date.as_deref().unwrap_or(""),
                    b.layoff_date.as_deref().unwrap_or(""),
                )
            },
        )
    });
}

fn compare_dates_desc(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), SOURCE_DATE_FORMAT).ok()
}
