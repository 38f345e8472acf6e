//! Posting error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors raised while deriving journal lines from a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostingError {
    /// Derived lines do not balance; nothing may be posted.
    #[error("Derived posting is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// The document lacks a field the engine needs.
    #[error("Document cannot be posted: {0}")]
    Precondition(String),

    /// A derived line is malformed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl PostingError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unbalanced { .. } => "POSTING_UNBALANCED",
            Self::Precondition(_) => "POSTING_PRECONDITION",
            Self::Ledger(e) => e.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PostingError::Unbalanced {
                debit: dec!(1),
                credit: dec!(2),
            }
            .error_code(),
            "POSTING_UNBALANCED"
        );
        assert_eq!(
            PostingError::from(LedgerError::InsufficientLines).error_code(),
            "INSUFFICIENT_LINES"
        );
    }
}
