//! Derived views over an aggregated dataset: the query surface the
//! dashboard charts consume.

use chrono::NaiveDate;
use itertools::Itertools;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::dataset::RangeDataset;

/// Canonical form for category comparisons: uppercase, accents stripped,
/// whitespace collapsed. "Hidráulica" and "  hidraulica " compare equal.
pub fn normalize_category(input: &str) -> String {
    let upper = input.to_uppercase();
    let mut out = String::with_capacity(upper.len());
    for ch in upper.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() || ch.is_whitespace() {
            out.push(ch);
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Records whose category matches `label`, accent- and case-insensitively.
/// Record order is preserved.
pub fn filter_category(dataset: &RangeDataset, label: &str) -> RangeDataset {
    let wanted = normalize_category(label);
    RangeDataset {
        records: dataset
            .records
            .iter()
            .filter(|record| normalize_category(&record.category) == wanted)
            .cloned()
            .collect(),
    }
}

/// Sum of daily values per date, ascending. Every date with records
/// appears; missing cells contribute nothing to the sum.
pub fn daily_totals(dataset: &RangeDataset) -> Vec<(NaiveDate, Decimal)> {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in &dataset.records {
        let entry = totals.entry(record.date).or_insert(Decimal::ZERO);
        if let Some(value) = record.daily {
            *entry += value;
        }
    }
    totals.into_iter().collect()
}

/// Sum of daily values per category, largest first.
pub fn category_totals(dataset: &RangeDataset) -> Vec<(String, Decimal)> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for record in &dataset.records {
        let entry = totals.entry(record.category.clone()).or_insert(Decimal::ZERO);
        if let Some(value) = record.daily {
            *entry += value;
        }
    }
    totals
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .collect()
}

/// Category-by-date matrix of daily values.
///
/// A cell stays missing when the category published no row that date or the
/// source cell was unparsable; renderers print it blank, never as zero.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PivotTable {
    pub dates: Vec<NaiveDate>,
    pub categories: Vec<String>,
    /// `cells[row][col]` addresses `(dates[row], categories[col])`.
    pub cells: Vec<Vec<Option<Decimal>>>,
}

pub fn pivot_daily(dataset: &RangeDataset) -> PivotTable {
    let dates: Vec<NaiveDate> = dataset
        .records
        .iter()
        .map(|record| record.date)
        .unique()
        .sorted()
        .collect();
    let categories: Vec<String> = dataset
        .records
        .iter()
        .map(|record| record.category.clone())
        .unique()
        .sorted()
        .collect();

    let date_index: HashMap<NaiveDate, usize> =
        dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();
    let category_index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let mut cells = vec![vec![None; categories.len()]; dates.len()];
    for record in &dataset.records {
        if let Some(value) = record.daily {
            let row = date_index[&record.date];
            let col = category_index[record.category.as_str()];
            let cell = &mut cells[row][col];
            *cell = Some(cell.unwrap_or(Decimal::ZERO) + value);
        }
    }

    PivotTable {
        dates,
        categories,
        cells,
    }
}
