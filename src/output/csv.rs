//! CSV export of records
//!
//! The header row is always [`COLUMNS`]; fields are quoted only when they
//! contain the separator, a quote or a line break.

use crate::output::traits::{OutputResult, RecordFormatter};
use crate::record::{Record, COLUMNS};
use std::io::{self, Write};

/// Formats records as CSV with a header row
#[derive(Debug, Clone, Copy)]
pub struct CsvFormatter {
    separator: char,
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self { separator: ',' }
    }

    /// Uses a different field separator, e.g. `'\t'` for TSV
    pub fn with_separator(separator: char) -> Self {
        Self { separator }
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordFormatter for CsvFormatter {
    fn write_records(&self, records: &[Record], writer: &mut dyn Write) -> OutputResult<()> {
        write_row(&mut *writer, &COLUMNS, self.separator)?;
        for record in records {
            write_row(&mut *writer, &record.to_row(), self.separator)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Writes a single row, terminated by CRLF
fn write_row<W: Write>(mut w: W, row: &[&str], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    write!(w, "\r\n")
}
