//! HTML table parser for the notice listing
//!
//! This module turns one fetched listing page into:
//! - Normalized records from the first `<table>` on the page
//! - The pagination links found on the page
//!
//! Header text is mapped to a [`Column`] per page, so the physical column order
//! of the source table does not matter. Each data row yields an explicit
//! [`RowOutcome`]; structural problems with the table as a whole are a
//! [`SchemaError`].

use crate::crawler::pages::discover_in;
use crate::record::Record;
use crate::url::download_url;
use crate::SchemaError;
use scraper::{ElementRef, Html};
use std::collections::BTreeSet;
use std::fmt;
use url::Url;

/// Form-control types that never carry a download token
const NON_TOKEN_INPUTS: &[&str] = &["submit", "button", "reset", "image"];

/// A table column after header normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    CompanyName,
    StateNotificationDate,
    LayoffDate,
    EmployeesAffected,
    Industry,
    /// A column the record schema does not use, by normalized header
    Other(String),
}

impl Column {
    /// Maps raw header text to a column
    ///
    /// Header text is trimmed, inner whitespace runs become `_`, and the
    /// result is compared case-insensitively.
    pub fn from_header(text: &str) -> Self {
        let normalized = normalize_header(text);
        match normalized.as_str() {
            "COMPANY_NAME" => Self::CompanyName,
            "STATE_NOTIFICATION_DATE" => Self::StateNotificationDate,
            "LAYOFF_DATE" => Self::LayoffDate,
            "EMPLOYEES_AFFECTED" => Self::EmployeesAffected,
            "INDUSTRY" => Self::Industry,
            _ => Self::Other(normalized),
        }
    }
}

fn normalize_header(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// Why a table row did not become a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Header or spacer row without data cells
    NoCells,
    MissingNotificationDate,
    MissingCompanyName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NoCells => "no data cells",
            Self::MissingNotificationDate => "no state notification date",
            Self::MissingCompanyName => "no company name",
        };
        write!(f, "{}", reason)
    }
}

/// Result of validating one table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Valid(Record),
    Skipped(SkipReason),
}

/// Records extracted from one table
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    /// Valid records in row order
    pub records: Vec<Record>,

    /// Data rows that were dropped, by row index within the table
    pub skipped: Vec<(usize, SkipReason)>,
}

/// Everything extracted from one listing page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page's records, or why its table could not be read
    pub table: Result<ParsedTable, SchemaError>,

    /// Distinct same-origin pagination links found on the page
    pub links: BTreeSet<Url>,
}

/// Parses a listing page: its table and its pagination links
///
/// A schema problem with the table does not prevent link discovery, so the
/// crawl can continue past a malformed page.
pub fn parse_page(html: &str, origin: &Url) -> ParsedPage {
    let document = Html::parse_document(html);
    let table = first_table(&document);

    let links = discover_in(table.unwrap_or_else(|| document.root_element()), origin);
    let table = match table {
        Some(table) => parse_table_element(table, origin),
        None => Err(SchemaError::MissingTable),
    };

    ParsedPage { table, links }
}

/// Parses the first table of an HTML document into records
///
/// # Example
///
/// ```
/// use url::Url;
/// use warn_alerts::crawler::parse_table;
///
/// let html = r#"<table>
///     <tr><th>Company Name</th><th>State Notification Date</th></tr>
///     <tr><td><b>Acme Corp</b></td><td>01/15/2025</td></tr>
/// </table>"#;
/// let origin = Url::parse("https://warn.example.org").unwrap();
/// let parsed = parse_table(html, &origin).unwrap();
/// assert_eq!(parsed.records[0].company_name, "Acme Corp");
/// ```
pub fn parse_table(html: &str, origin: &Url) -> Result<ParsedTable, SchemaError> {
    let document = Html::parse_document(html);
    let table = first_table(&document).ok_or(SchemaError::MissingTable)?;
    parse_table_element(table, origin)
}

fn first_table(document: &Html) -> Option<ElementRef<'_>> {
    elements_named(document.root_element(), &["table"]).next()
}

/// Parses a `<table>` element into records
pub fn parse_table_element(
    table: ElementRef<'_>,
    origin: &Url,
) -> Result<ParsedTable, SchemaError> {
    let headers = read_headers(table)?;

    let mut parsed = ParsedTable::default();
    for (index, row) in elements_named(table, &["tr"]).enumerate() {
        match parse_row(index, row, &headers, origin)? {
            RowOutcome::Valid(record) => parsed.records.push(record),
            RowOutcome::Skipped(SkipReason::NoCells) => {}
            RowOutcome::Skipped(reason) => {
                tracing::debug!("Skipping row {}: {}", index, reason);
                parsed.skipped.push((index, reason));
            }
        }
    }

    Ok(parsed)
}

/// Reads and validates the header cells of a table
fn read_headers(table: ElementRef<'_>) -> Result<Vec<Column>, SchemaError> {
    let headers: Vec<Column> = elements_named(table, &["th"])
        .map(|th| Column::from_header(&cell_text(th)))
        .collect();

    if headers.is_empty() {
        return Err(SchemaError::MissingHeaders);
    }

    if !headers.contains(&Column::StateNotificationDate) {
        return Err(SchemaError::MissingNotificationDate);
    }

    Ok(headers)
}

/// Validates one table row against the page's headers
///
/// Plain cells (cells without form controls) map positionally onto the
/// headers. The download token comes from the row's form control, and the
/// company name from the row's emphasized text.
pub fn parse_row(
    index: usize,
    row: ElementRef<'_>,
    headers: &[Column],
    origin: &Url,
) -> Result<RowOutcome, SchemaError> {
    let cells: Vec<String> = elements_named(row, &["td"])
        .filter(|td| !has_form_control(*td))
        .map(cell_text)
        .collect();

    if cells.len() > headers.len() {
        return Err(SchemaError::TooManyCells {
            row: index,
            cells: cells.len(),
            headers: headers.len(),
        });
    }

    let token = download_token(row);
    if cells.is_empty() && token.is_none() {
        return Ok(RowOutcome::Skipped(SkipReason::NoCells));
    }

    let field = |column: &Column| -> Option<String> {
        headers
            .iter()
            .position(|h| h == column)
            .and_then(|i| cells.get(i))
            .filter(|value| !value.is_empty())
            .cloned()
    };

    let Some(state_notification_date) = field(&Column::StateNotificationDate) else {
        return Ok(RowOutcome::Skipped(SkipReason::MissingNotificationDate));
    };

    let emphasized = emphasized_text(row);
    let company_name = if emphasized.is_empty() {
        field(&Column::CompanyName).unwrap_or_default()
    } else {
        emphasized
    };
    if company_name.is_empty() {
        return Ok(RowOutcome::Skipped(SkipReason::MissingCompanyName));
    }

    Ok(RowOutcome::Valid(Record {
        company_name,
        state_notification_date,
        layoff_date: field(&Column::LayoffDate),
        employees_affected: field(&Column::EmployeesAffected),
        industry: field(&Column::Industry),
        filename_url: token
            .map(|token| download_url(origin, &token))
            .unwrap_or_default(),
    }))
}

/// Iterates over descendant elements with one of the given tag names
pub(crate) fn elements_named<'a>(
    root: ElementRef<'a>,
    names: &'static [&'static str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |el| names.contains(&el.value().name()))
}

/// Collects an element's text with whitespace runs collapsed
fn cell_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_form_control(cell: ElementRef<'_>) -> bool {
    elements_named(cell, &["input", "button", "select"]).next().is_some()
}

/// Returns the value of the row's last token-carrying input
fn download_token(row: ElementRef<'_>) -> Option<String> {
    elements_named(row, &["input"])
        .filter(|input| {
            let kind = input.value().attr("type").unwrap_or("text");
            !NON_TOKEN_INPUTS
                .iter()
                .any(|skip| kind.eq_ignore_ascii_case(skip))
        })
        .filter_map(|input| input.value().attr("value"))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .last()
        .map(str::to_string)
}

/// Joins the row's emphasized fragments with single spaces
fn emphasized_text(row: ElementRef<'_>) -> String {
    elements_named(row, &["b", "strong"])
        .map(cell_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
