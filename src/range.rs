//! Range aggregation: one sequential fetch per calendar day, concatenated
//! into a single dataset in date order.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::dataset::RangeDataset;
use crate::error::{BalanceError, Result};
use crate::scrape::{DayOutcome, FetchDay, FetchFailure};

/// What happened on one requested day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayStatus {
    /// Rows were appended to the combined dataset.
    Data { rows: usize },
    /// Page retrieved, but no data rows were published.
    NoData,
    /// Retrieval failed; the day contributes no rows.
    Failed(FetchFailure),
}

/// Outcome of a range fetch: the combined dataset plus the per-day log.
///
/// The dataset alone reproduces the silently-skip behavior the dashboard
/// consumes; the log is what lets callers and tests tell an unpublished day
/// from a failed one.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeReport {
    pub dataset: RangeDataset,
    pub days: Vec<(NaiveDate, DayStatus)>,
}

impl RangeReport {
    pub fn days_with_data(&self) -> usize {
        self.days
            .iter()
            .filter(|(_, status)| matches!(status, DayStatus::Data { .. }))
            .count()
    }

    pub fn days_without_data(&self) -> usize {
        self.days
            .iter()
            .filter(|(_, status)| matches!(status, DayStatus::NoData))
            .count()
    }

    pub fn failed_days(&self) -> usize {
        self.days
            .iter()
            .filter(|(_, status)| matches!(status, DayStatus::Failed(_)))
            .count()
    }
}

/// Fetch every day in `[start, end]`, ascending, one request at a time.
///
/// Rejects `start > end` before touching the network. A single day's
/// failure never aborts the range; the day is recorded and skipped.
pub fn fetch_range<F: FetchDay>(
    fetcher: &F,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RangeReport> {
    if start > end {
        return Err(BalanceError::InvalidRange { start, end }.into());
    }

    let mut dataset = RangeDataset::default();
    let mut days = Vec::new();

    let mut day = start;
    loop {
        let status = match fetcher.fetch_day(day) {
            DayOutcome::Data(daily) => {
                debug_assert!(daily.records.iter().all(|r| r.date == day));
                let rows = daily.len();
                dataset.extend_day(daily);
                DayStatus::Data { rows }
            }
            DayOutcome::NoData => {
                info!("No balance rows published for {}", day);
                DayStatus::NoData
            }
            DayOutcome::Failed(failure) => {
                warn!("Fetch for {} failed: {}", day, failure);
                DayStatus::Failed(failure)
            }
        };
        days.push((day, status));

        if day == end {
            break;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    let report = RangeReport { dataset, days };
    info!(
        "Range {}..={} complete: {} days with data, {} without, {} failed",
        start,
        end,
        report.days_with_data(),
        report.days_without_data(),
        report.failed_days()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::day_from_markup;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const FIXTURE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/balance_2024-02-29.html"
    ));

    /// Serves canned markup per date; absent dates answer 404. Counts calls
    /// so tests can assert the one-request-per-day contract.
    struct FakeFetcher {
        pages: HashMap<NaiveDate, &'static str>,
        calls: RefCell<Vec<NaiveDate>>,
    }

    impl FakeFetcher {
        fn new(pages: HashMap<NaiveDate, &'static str>) -> Self {
            Self {
                pages,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl FetchDay for FakeFetcher {
        fn fetch_day(&self, date: NaiveDate) -> DayOutcome {
            self.calls.borrow_mut().push(date);
            match self.pages.get(&date) {
                Some(markup) => day_from_markup(markup, date),
                None => DayOutcome::Failed(FetchFailure::Status(404)),
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_range_records_all_dated_that_day() {
        let d = date(2024, 2, 29);
        let fetcher = FakeFetcher::new(HashMap::from([(d, FIXTURE)]));

        let report = fetch_range(&fetcher, d, d).unwrap();
        assert!(!report.dataset.is_empty());
        assert!(report.dataset.records.iter().all(|r| r.date == d));
        assert_eq!(fetcher.calls.borrow().len(), 1);
    }

    #[test]
    fn test_reversed_range_is_rejected_before_any_fetch() {
        let fetcher = FakeFetcher::new(HashMap::new());
        let err = fetch_range(&fetcher, date(2024, 3, 5), date(2024, 3, 1)).unwrap_err();

        let balance_err = err.downcast_ref::<BalanceError>().unwrap();
        assert!(matches!(balance_err, BalanceError::InvalidRange { .. }));
        assert!(fetcher.calls.borrow().is_empty());
    }

    #[test]
    fn test_failed_middle_day_is_skipped_not_fatal() {
        let d1 = date(2024, 2, 28);
        let d2 = date(2024, 2, 29);
        let d3 = date(2024, 3, 1);
        // d2 is absent from the fake source: simulated 404.
        let fetcher = FakeFetcher::new(HashMap::from([(d1, FIXTURE), (d3, FIXTURE)]));

        let report = fetch_range(&fetcher, d1, d3).unwrap();
        assert_eq!(report.dataset.dates(), vec![d1, d3]);
        assert_eq!(report.days.len(), 3);
        assert_eq!(report.days_with_data(), 2);
        assert_eq!(report.failed_days(), 1);
        assert_eq!(
            report.days[1],
            (d2, DayStatus::Failed(FetchFailure::Status(404)))
        );
    }

    #[test]
    fn test_one_request_per_day_ascending() {
        let d1 = date(2024, 2, 27);
        let d3 = date(2024, 2, 29);
        let fetcher = FakeFetcher::new(HashMap::new());

        let report = fetch_range(&fetcher, d1, d3).unwrap();
        assert_eq!(report.days.len(), 3);
        assert_eq!(
            *fetcher.calls.borrow(),
            vec![d1, date(2024, 2, 28), d3],
        );
    }

    #[test]
    fn test_no_data_day_distinct_from_failed_day() {
        let d1 = date(2024, 2, 28);
        let d2 = date(2024, 2, 29);
        let empty_page = "<html><body><p>Sin datos</p></body></html>";
        let fetcher = FakeFetcher::new(HashMap::from([(d1, empty_page)]));

        let report = fetch_range(&fetcher, d1, d2).unwrap();
        assert!(report.dataset.is_empty());
        assert_eq!(report.days[0].1, DayStatus::NoData);
        assert!(matches!(report.days[1].1, DayStatus::Failed(_)));
    }
}
