//! Dispatch from parsed CLI arguments to the pipeline and renderers.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::app::{self, DashboardAction, DashboardState, ViewKind};
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::range::{fetch_range, RangeReport};
use crate::reports;
use crate::scrape::{DocumentFetcher, HttpFetcher};
use crate::views;

pub fn parse_date_arg(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load()?;

    match cli.command {
        Commands::Fetch { date, export } => {
            let date = parse_date_arg(&date)?;
            let fetcher = HttpFetcher::new(&config)?;
            let report = fetch_range(&fetcher, date, date)?;
            let state = DashboardState::new(date, date);
            render(&report, &state, cli.json, export.as_deref())
        }

        Commands::Range {
            start,
            end,
            category,
            view,
            export,
        } => {
            let start = parse_date_arg(&start)?;
            let end = parse_date_arg(&end)?;

            let mut state = DashboardState::new(start, end);
            if let Some(label) = category {
                state = app::apply(state, DashboardAction::SetCategory(label));
            }
            state = app::apply(state, DashboardAction::SelectView(view.into()));

            let fetcher = HttpFetcher::new(&config)?;
            let report = fetch_range(&fetcher, state.start, state.end)?;
            render(&report, &state, cli.json, export.as_deref())
        }

        Commands::Parse { file, date, export } => {
            let date = parse_date_arg(&date)?;
            let markup = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file))?;
            let fetcher = DocumentFetcher::new(&markup);
            let report = fetch_range(&fetcher, date, date)?;
            let state = DashboardState::new(date, date);
            render(&report, &state, cli.json, export.as_deref())
        }
    }
}

fn render(
    report: &RangeReport,
    state: &DashboardState,
    json: bool,
    export: Option<&str>,
) -> Result<()> {
    let dataset = match state.category.as_deref() {
        Some(label) => views::filter_category(&report.dataset, label),
        None => report.dataset.clone(),
    };

    if let Some(path) = export {
        reports::write_csv(&dataset, Path::new(path))?;
        println!(
            "{} Wrote {} records to {}",
            "✓".green().bold(),
            dataset.len(),
            path
        );
    }

    if json {
        println!("{}", reports::view_json(&dataset, state.view)?);
        return Ok(());
    }

    if dataset.is_empty() {
        println!("{} No records in the selected range", "○".yellow().bold());
    } else {
        let table = match state.view {
            ViewKind::Records => reports::records_table(&dataset),
            ViewKind::DailyTotals => {
                reports::daily_totals_table(&views::daily_totals(&dataset))
            }
            ViewKind::CategoryTotals => {
                reports::category_totals_table(&views::category_totals(&dataset))
            }
            ViewKind::Pivot => reports::pivot_table_text(&views::pivot_daily(&dataset)),
        };
        println!("{}", table);
    }

    println!("{}", reports::range_summary(report));
    Ok(())
}
