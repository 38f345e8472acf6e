//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Aggregating the ledger failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ReportError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::Ledger(e) => e.error_code(),
        }
    }
}
