//! Plain-text alert bodies
//!
//! One labeled stanza per record, stanzas separated by a blank line. This is
//! the text handed to the notification channel.

use crate::output::traits::{OutputResult, RecordFormatter};
use crate::record::Record;
use std::io::Write;

/// Field labels, in record field order
pub const ALERT_LABELS: [&str; 6] = [
    "Company Name",
    "State Notification Date",
    "Layoff Date",
    "Employees Affected",
    "Industry",
    "PDF Attachment",
];

/// Formats records as alert text
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertFormatter;

impl RecordFormatter for AlertFormatter {
    fn write_records(&self, records: &[Record], writer: &mut dyn Write) -> OutputResult<()> {
        writer.write_all(format_alert(records).as_bytes())?;
        Ok(())
    }
}

/// Formats one record as a labeled stanza, each field on its own line
pub fn format_record(record: &Record) -> String {
    let mut stanza = String::new();
    for (label, value) in ALERT_LABELS.iter().zip(record.to_row()) {
        stanza.push_str(&format!("{}: {}\n", label, value));
    }
    stanza
}

/// Formats all records as one alert body
pub fn format_alert(records: &[Record]) -> String {
    records
        .iter()
        .map(format_record)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Summarizes a filter result for logs and notification subjects
pub fn summary_message(count: usize) -> String {
    if count == 0 {
        format!("Returned {} record(s), no matches found.", count)
    } else {
        format!(
            "Returned {} record(s) that matched, please review!",
            count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Record {
        Record {
            company_name: name.to_string(),
            state_notification_date: "01/15/2025".to_string(),
            layoff_date: Some("03/15/2025".to_string()),
            employees_affected: Some("85".to_string()),
            industry: None,
            filename_url: "https://warn.example.org/WarnList/DownloadAzureFile?file=a.pdf"
                .to_string(),
        }
    }

    #[test]
    fn test_format_record() {
        let text = format_record(&record("Acme Corp"));
        assert_eq!(
            text,
            "Company Name: Acme Corp\n\
             State Notification Date: 01/15/2025\n\
             Layoff Date: 03/15/2025\n\
             Employees Affected: 85\n\
             Industry: \n\
             PDF Attachment: https://warn.example.org/WarnList/DownloadAzureFile?file=a.pdf\n"
        );
    }

    #[test]
    fn test_stanzas_separated_by_blank_line() {
        let text = format_alert(&[record("Acme"), record("Globex")]);
        let stanzas: Vec<&str> = text.split("\n\n").collect();

        assert_eq!(stanzas.len(), 2);
        assert!(stanzas[0].starts_with("Company Name: Acme\n"));
        assert!(stanzas[1].starts_with("Company Name: Globex\n"));
    }

    #[test]
    fn test_preserves_input_order() {
        let text = format_alert(&[record("Zeta"), record("Alpha")]);
        let zeta = text.find("Zeta").unwrap();
        let alpha = text.find("Alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_empty_alert() {
        assert_eq!(format_alert(&[]), "");
    }

    #[test]
    fn test_formatter_trait() {
        let records = vec![record("Acme")];
        let text = AlertFormatter.format(&records).unwrap();
        assert_eq!(text, format_alert(&records));
    }

    #[test]
    fn test_summary_message() {
        assert_eq!(summary_message(0), "Returned 0 record(s), no matches found.");
        assert_eq!(
            summary_message(3),
            "Returned 3 record(s) that matched, please review!"
        );
    }
}
