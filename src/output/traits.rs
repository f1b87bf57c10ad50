//! Output formatter traits and errors
//!
//! Formatters are pure projections of a record sequence: they never reorder
//! or drop records.

use crate::record::Record;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record formatters
pub trait RecordFormatter {
    /// Writes the records to `writer`, in input order
    fn write_records(&self, records: &[Record], writer: &mut dyn Write) -> OutputResult<()>;

    /// Renders the records into a string
    fn format(&self, records: &[Record]) -> OutputResult<String> {
        let mut buffer = Vec::new();
        self.write_records(records, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| OutputError::Write(e.to_string()))
    }
}
