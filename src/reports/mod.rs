//! Terminal, JSON and CSV renderings of the dataset and its derived views.

use anyhow::Context;
use chrono::NaiveDate;
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

use crate::app::ViewKind;
use crate::dataset::{RangeDataset, COLUMNS};
use crate::error::Result;
use crate::range::{DayStatus, RangeReport};
use crate::utils::{format_cell, format_field};
use crate::views::{self, PivotTable};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Daily")]
    daily: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Monthly %")]
    monthly_pct: String,
    #[tabled(rename = "Yearly")]
    yearly: String,
    #[tabled(rename = "Yearly %")]
    yearly_pct: String,
    #[tabled(rename = "Rolling yr")]
    rolling_year: String,
    #[tabled(rename = "Rolling %")]
    rolling_year_pct: String,
}

/// Full record listing, one table row per (date, category).
pub fn records_table(dataset: &RangeDataset) -> String {
    let rows: Vec<RecordRow> = dataset
        .records
        .iter()
        .map(|record| RecordRow {
            date: record.date.to_string(),
            category: record.category.clone(),
            daily: format_cell(record.daily),
            monthly: format_cell(record.monthly),
            monthly_pct: format_cell(record.monthly_pct),
            yearly: format_cell(record.yearly),
            yearly_pct: format_cell(record.yearly_pct),
            rolling_year: format_cell(record.rolling_year),
            rolling_year_pct: format_cell(record.rolling_year_pct),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct DateTotalRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Total daily")]
    total: String,
}

pub fn daily_totals_table(totals: &[(NaiveDate, Decimal)]) -> String {
    let rows: Vec<DateTotalRow> = totals
        .iter()
        .map(|(date, total)| DateTotalRow {
            date: date.to_string(),
            total: format_cell(Some(*total)),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct CategoryTotalRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total daily")]
    total: String,
}

pub fn category_totals_table(totals: &[(String, Decimal)]) -> String {
    let rows: Vec<CategoryTotalRow> = totals
        .iter()
        .map(|(category, total)| CategoryTotalRow {
            category: category.clone(),
            total: format_cell(Some(*total)),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pivot rendering: dates down, categories across. Column count varies with
/// the data, so this goes through the table builder.
pub fn pivot_table_text(pivot: &PivotTable) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Date".to_string()];
    header.extend(pivot.categories.iter().cloned());
    builder.push_record(header);

    for (row, date) in pivot.dates.iter().enumerate() {
        let mut cells = vec![date.to_string()];
        cells.extend(pivot.cells[row].iter().map(|cell| match cell {
            Some(value) => format_cell(Some(*value)),
            None => String::new(),
        }));
        builder.push_record(cells);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Per-day outcome lines for a range fetch.
pub fn range_summary(report: &RangeReport) -> String {
    let mut lines = Vec::with_capacity(report.days.len() + 1);
    for (date, status) in &report.days {
        let line = match status {
            DayStatus::Data { rows } => {
                format!("{} {}: {} rows", "✓".green().bold(), date, rows)
            }
            DayStatus::NoData => {
                format!("{} {}: no data published", "○".yellow().bold(), date)
            }
            DayStatus::Failed(failure) => {
                format!("{} {}: {}", "✗".red().bold(), date, failure)
            }
        };
        lines.push(line);
    }
    lines.push(format!(
        "{} days with data, {} without, {} failed",
        report.days_with_data(),
        report.days_without_data(),
        report.failed_days()
    ));
    lines.join("\n")
}

#[derive(Serialize)]
struct DateTotalJson {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Total")]
    total: Decimal,
}

#[derive(Serialize)]
struct CategoryTotalJson {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Total")]
    total: Decimal,
}

/// JSON rendering of the chosen view.
pub fn view_json(dataset: &RangeDataset, view: ViewKind) -> Result<String> {
    let json = match view {
        ViewKind::Records => serde_json::to_string_pretty(&dataset.records),
        ViewKind::DailyTotals => {
            let totals: Vec<DateTotalJson> = views::daily_totals(dataset)
                .into_iter()
                .map(|(date, total)| DateTotalJson { date, total })
                .collect();
            serde_json::to_string_pretty(&totals)
        }
        ViewKind::CategoryTotals => {
            let totals: Vec<CategoryTotalJson> = views::category_totals(dataset)
                .into_iter()
                .map(|(category, total)| CategoryTotalJson { category, total })
                .collect();
            serde_json::to_string_pretty(&totals)
        }
        ViewKind::Pivot => serde_json::to_string_pretty(&views::pivot_daily(dataset)),
    };
    json.context("Failed to serialize view")
}

/// Write the dataset records to a CSV file using the published column names.
pub fn write_csv(dataset: &RangeDataset, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;

    writer.write_record(COLUMNS)?;
    for record in &dataset.records {
        writer.write_record([
            record.date.to_string(),
            record.category.clone(),
            format_field(record.daily),
            format_field(record.monthly),
            format_field(record.monthly_pct),
            format_field(record.yearly),
            format_field(record.yearly_pct),
            format_field(record.rolling_year),
            format_field(record.rolling_year_pct),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file {}", path.display()))?;
    Ok(())
}
