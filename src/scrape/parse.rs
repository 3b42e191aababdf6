//! Extraction and numeric coercion for the daily balance table.
//!
//! The page marks data rows with `class="datos"`; the first cell carries
//! the category label and the remaining seven cells the values, printed in
//! Spanish locale (comma decimal, space or dot grouping).

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use scraper::{Html, Selector};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::dataset::DailyRecord;

/// Cells a well-formed data row carries: one label plus seven values.
pub const ROW_CELLS: usize = 8;

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr.datos").expect("valid selector"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("valid selector"));

/// Raw extraction of one data row: the label and the trimmed value strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub category: String,
    pub values: Vec<String>,
}

/// Locate all data rows in the document and pull out their cell text.
///
/// Rows with fewer than [`ROW_CELLS`] cells are malformed and skipped with
/// a warning; cells beyond the eighth are ignored. A changed page structure
/// therefore degrades to fewer rows, never to a panic.
pub fn extract_rows(markup: &str) -> Vec<RawRow> {
    let document = Html::parse_document(markup);
    let mut rows = Vec::new();

    for row in document.select(&ROW_SELECTOR) {
        let cells: Vec<String> = row
            .select(&CELL_SELECTOR)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();

        if cells.len() < ROW_CELLS {
            warn!(
                "Skipping malformed balance row ({} of {} cells): {:?}",
                cells.len(),
                ROW_CELLS,
                cells.first()
            );
            continue;
        }
        if cells.len() > ROW_CELLS {
            debug!(
                "Ignoring {} extra cells in balance row '{}'",
                cells.len() - ROW_CELLS,
                cells[0]
            );
        }

        rows.push(RawRow {
            category: cells[0].clone(),
            values: cells[1..ROW_CELLS].to_vec(),
        });
    }

    rows
}

/// Coerce a Spanish-locale numeric string to a decimal.
///
/// Grouping (spaces, including NBSP, and dots) is stripped and the comma
/// decimal separator replaced before parsing. Anything that still fails to
/// parse is missing, not zero.
pub fn parse_decimal_es(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '.')
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Attach the fetch date and coerce each value cell, producing the final
/// records. Coercion failures leave the field missing; the row survives.
pub fn normalize(rows: &[RawRow], date: NaiveDate) -> Vec<DailyRecord> {
    rows.iter()
        .map(|row| {
            let mut values = row.values.iter().map(|raw| parse_decimal_es(raw));
            DailyRecord {
                date,
                category: row.category.clone(),
                daily: values.next().flatten(),
                monthly: values.next().flatten(),
                monthly_pct: values.next().flatten(),
                yearly: values.next().flatten(),
                yearly_pct: values.next().flatten(),
                rolling_year: values.next().flatten(),
                rolling_year_pct: values.next().flatten(),
            }
        })
        .collect()
}
