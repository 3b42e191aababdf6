//! Daily balance fetcher for the REE Baleares page.
//!
//! Retrieval and parsing are decoupled: a transport failure or a changed
//! page structure degrades to a failed or empty day instead of taking the
//! whole range down with it. One fetch is one blocking GET; there is no
//! caching and no retry.

pub mod parse;

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::dataset::DailyDataset;

/// Transport-level failure for one day's retrieval.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("request returned status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
}

/// Typed outcome of fetching one day.
///
/// `NoData` (page retrieved, no data rows) and `Failed` are distinct so a
/// range report can tell "nothing published" from "fetch failed". Use
/// [`DayOutcome::into_dataset`] where the distinction does not matter.
#[derive(Debug, Clone, PartialEq)]
pub enum DayOutcome {
    Data(DailyDataset),
    NoData,
    Failed(FetchFailure),
}

impl DayOutcome {
    /// Collapse to a possibly-empty dataset for the given date.
    pub fn into_dataset(self, date: NaiveDate) -> DailyDataset {
        match self {
            DayOutcome::Data(dataset) => dataset,
            DayOutcome::NoData | DayOutcome::Failed(_) => DailyDataset::empty(date),
        }
    }
}

/// Seam for substituting a non-network source of daily pages, used by the
/// range aggregator, the offline `parse` command and the tests.
pub trait FetchDay {
    fn fetch_day(&self, date: NaiveDate) -> DayOutcome;
}

/// Day-specific balance page URL: `<base>/<YYYY>/<MM>/<DD>`, month and day
/// always two-digit zero-padded.
pub fn balance_url(base: &str, date: NaiveDate) -> String {
    format!(
        "{}/{}/{:02}/{:02}",
        base.trim_end_matches('/'),
        date.year(),
        date.month(),
        date.day()
    )
}

/// Parse a retrieved document into the day's typed outcome.
pub fn day_from_markup(markup: &str, date: NaiveDate) -> DayOutcome {
    let rows = parse::extract_rows(markup);
    if rows.is_empty() {
        return DayOutcome::NoData;
    }
    let records = parse::normalize(&rows, date);
    DayOutcome::Data(DailyDataset { date, records })
}

/// Blocking HTTP fetcher for the daily balance page.
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> crate::error::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Issue the single GET for `url`. Only a 2xx response yields markup;
    /// anything else is logged and returned as a failure, never raised.
    pub fn retrieve(&self, url: &str) -> Result<String, FetchFailure> {
        let response = match self.client.get(url).send() {
            Ok(response) => response,
            Err(err) => {
                warn!("Request to {} failed: {}", url, err);
                return Err(FetchFailure::Network(err.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Request to {} returned status {}", url, status);
            return Err(FetchFailure::Status(status.as_u16()));
        }

        response.text().map_err(|err| {
            warn!("Failed to read body from {}: {}", url, err);
            FetchFailure::Network(err.to_string())
        })
    }

    /// Fetch and parse one day's balance table.
    pub fn fetch_day(&self, date: NaiveDate) -> DayOutcome {
        let url = balance_url(&self.base_url, date);
        info!("Fetching daily balance for {} from {}", date, url);
        match self.retrieve(&url) {
            Ok(markup) => day_from_markup(&markup, date),
            Err(failure) => DayOutcome::Failed(failure),
        }
    }
}

impl FetchDay for HttpFetcher {
    fn fetch_day(&self, date: NaiveDate) -> DayOutcome {
        HttpFetcher::fetch_day(self, date)
    }
}

/// Serves one already-retrieved document for every requested date. Backs
/// the offline `parse` command.
pub struct DocumentFetcher<'a> {
    markup: &'a str,
}

impl<'a> DocumentFetcher<'a> {
    pub fn new(markup: &'a str) -> Self {
        Self { markup }
    }
}

impl FetchDay for DocumentFetcher<'_> {
    fn fetch_day(&self, date: NaiveDate) -> DayOutcome {
        day_from_markup(self.markup, date)
    }
}
