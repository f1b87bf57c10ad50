//! Layoff-notice records and the merged record set
//!
//! A [`Record`] always exposes its fields in the canonical export order,
//! independent of how the source table happened to lay out its columns.

use std::ops::Index;

/// Canonical export column names, in order
pub const COLUMNS: [&str; 6] = [
    "COMPANY_NAME",
    "STATE_NOTIFICATION_DATE",
    "LAYOFF_DATE",
    "EMPLOYEES_AFFECTED",
    "INDUSTRY",
    "FILENAME",
];

/// One layoff notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Company name, joined from the emphasized fragments of the row
    pub company_name: String,

    /// Date the state was notified, exactly as the source formats it
    pub state_notification_date: String,

    pub layoff_date: Option<String>,

    pub employees_affected: Option<String>,

    pub industry: Option<String>,

    /// Absolute download link, or empty when the row carried no file token
    pub filename_url: String,
}

impl Record {
    /// Returns the record's fields in [`COLUMNS`] order
    ///
    /// Missing optional fields render as empty strings.
    pub fn to_row(&self) -> [&str; 6] {
        [
            &self.company_name,
            &self.state_notification_date,
            self.layoff_date.as_deref().unwrap_or(""),
            self.employees_affected.as_deref().unwrap_or(""),
            self.industry.as_deref().unwrap_or(""),
            &self.filename_url,
        ]
    }
}

/// All records collected by one crawl, in page-then-row order
///
/// The set cannot be extended after construction; a new crawl builds a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for RecordSet {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
