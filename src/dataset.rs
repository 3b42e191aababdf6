//! The produced dataset schema: one record per (date, category) row of the
//! published balance table.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Column names of the produced dataset, in output order.
pub const COLUMNS: [&str; 9] = [
    "Date",
    "Category",
    "DailyValue",
    "MonthlyValue",
    "MonthlyPctChange",
    "YearlyValue",
    "YearlyPctChange",
    "RollingYearValue",
    "RollingYearPctChange",
];

/// One row of the source table for one category on one date.
///
/// A `None` value means the source cell could not be coerced to a number;
/// missing is never conflated with zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "DailyValue")]
    pub daily: Option<Decimal>,
    #[serde(rename = "MonthlyValue")]
    pub monthly: Option<Decimal>,
    #[serde(rename = "MonthlyPctChange")]
    pub monthly_pct: Option<Decimal>,
    #[serde(rename = "YearlyValue")]
    pub yearly: Option<Decimal>,
    #[serde(rename = "YearlyPctChange")]
    pub yearly_pct: Option<Decimal>,
    #[serde(rename = "RollingYearValue")]
    pub rolling_year: Option<Decimal>,
    #[serde(rename = "RollingYearPctChange")]
    pub rolling_year_pct: Option<Decimal>,
}

/// The ordered records of a single date, one per category in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyDataset {
    pub date: NaiveDate,
    pub records: Vec<DailyRecord>,
}

impl DailyDataset {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Concatenation of daily datasets across a requested range, in date order,
/// preserving the per-day category ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeDataset {
    pub records: Vec<DailyRecord>,
}

impl RangeDataset {
    /// Append one day's records. Days must arrive in ascending date order;
    /// the aggregator guarantees this.
    pub fn extend_day(&mut self, day: DailyDataset) {
        self.records.extend(day.records);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Distinct dates present, in record order (ascending for a range fetch).
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        for record in &self.records {
            if dates.last() != Some(&record.date) {
                dates.push(record.date);
            }
        }
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(date: NaiveDate, category: &str, daily: Option<Decimal>) -> DailyRecord {
        DailyRecord {
            date,
            category: category.to_string(),
            daily,
            monthly: None,
            monthly_pct: None,
            yearly: None,
            yearly_pct: None,
            rolling_year: None,
            rolling_year_pct: None,
        }
    }

    #[test]
    fn test_record_serializes_with_published_column_names() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let json =
            serde_json::to_value(record(date, "Hidráulica", Some(dec!(10.5)))).unwrap();
        assert_eq!(json["Date"], "2024-02-29");
        assert_eq!(json["Category"], "Hidráulica");
        assert_eq!(json["DailyValue"], "10.5");
        assert!(json["MonthlyValue"].is_null());
    }

    #[test]
    fn test_extend_day_preserves_order() {
        let d1 = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        let mut range = RangeDataset::default();
        range.extend_day(DailyDataset {
            date: d1,
            records: vec![record(d1, "Eólica", None), record(d1, "Hidráulica", None)],
        });
        range.extend_day(DailyDataset {
            date: d2,
            records: vec![record(d2, "Eólica", None)],
        });

        assert_eq!(range.len(), 3);
        assert_eq!(range.dates(), vec![d1, d2]);
        assert_eq!(range.records[0].category, "Eólica");
        assert_eq!(range.records[1].category, "Hidráulica");
    }
}
