//! Error handling for the balance pipeline
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use chrono::NaiveDate;
use thiserror::Error;

/// Core error types for balance operations
#[derive(Error, Debug)]
pub enum BalanceError {
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("export error: {0}")]
    ExportError(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for balance operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let err = BalanceError::InvalidRange { start, end };
        assert_eq!(
            err.to_string(),
            "invalid range: start 2024-03-05 is after end 2024-03-01"
        );
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> =
            Err(anyhow::anyhow!("original error")).context("failed to fetch range");
        match result {
            Err(e) => {
                let msg = e.to_string();
                assert!(msg.contains("failed to fetch range"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("original error") || msg.contains("original error"));
            }
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_balance_error_variants() {
        let config_err = BalanceError::ConfigError("test".to_string());
        assert!(config_err.to_string().starts_with("config error"));

        let export_err = BalanceError::ExportError("test".to_string());
        assert!(export_err.to_string().starts_with("export error"));
    }
}
