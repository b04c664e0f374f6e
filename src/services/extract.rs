// src/services/extract.rs

//! Result-record extraction from one response page.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::ResultRecord;
use crate::utils::selector;

/// Literal the archive renders instead of a results table when a query
/// matches nothing.
pub const NO_RESULTS_MARKER: &str = "Your search returns no match.";

/// The single results table, identified by its fixed layout width.
const RESULTS_TABLE: &str = r#"table[width="750"]"#;

/// Data rows carry this background color; header and footer rows do not.
const DATA_ROW: &str = r##"tr[bgcolor="#FFFFFF"]"##;

/// True when the page is a well-formed "no results" response.
pub fn page_has_no_results(body: &str) -> bool {
    body.contains(NO_RESULTS_MARKER)
}

/// Parse every data row of the results table into a record.
///
/// The last cell of each row is a layout artifact and is dropped before
/// mapping; rows with fewer cells than the schema still yield a record
/// with empty trailing fields.
pub fn extract_records(doc: &Html) -> Result<Vec<ResultRecord>> {
    let table_sel = selector(RESULTS_TABLE)?;
    let row_sel = selector(DATA_ROW)?;
    let cell_sel = selector("td")?;

    let table = doc
        .select(&table_sel)
        .next()
        .ok_or_else(|| AppError::parse("results table missing"))?;

    let mut records = Vec::new();
    for row in table.select(&row_sel) {
        let mut cells: Vec<String> = row
            .select(&cell_sel)
            .map(|td| normalize_text(&td.text().collect::<String>()))
            .collect();
        cells.pop();
        records.push(ResultRecord::from_cells(cells));
    }
    Ok(records)
}

fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
