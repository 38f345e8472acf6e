//! Ledger error types for validation and state errors.
//!
//! This module defines all errors that can occur while building, posting,
//! reversing, and aggregating journal entries.

use rust_decimal::Decimal;
use thiserror::Error;

use racun_shared::types::{JournalEntryId, TenantId};

use super::journal::EntryStatus;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// Entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line has neither a debit nor a credit amount.
    #[error("Line on account {0} has neither a debit nor a credit amount")]
    ZeroAmount(String),

    /// Line amount cannot be negative.
    #[error("Line on account {0} has a negative amount")]
    NegativeAmount(String),

    /// Line must specify either debit or credit, not both.
    #[error("Line on account {0} has both a debit and a credit amount")]
    BothSides(String),

    // ========== Account Errors ==========
    /// Account code is neither in the chart nor in a known class.
    #[error("Account {0} cannot be classified")]
    UnclassifiedAccount(String),

    // ========== Entry State Errors ==========
    /// Status transition not allowed.
    #[error("Journal entry {id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Entry ID.
        id: JournalEntryId,
        /// Current status.
        from: EntryStatus,
        /// Requested status.
        to: EntryStatus,
    },

    /// Entry belongs to another tenant.
    #[error("Journal entry {id} belongs to tenant {found}, expected {expected}")]
    TenantMismatch {
        /// Entry ID.
        id: JournalEntryId,
        /// Tenant the aggregation runs for.
        expected: TenantId,
        /// Tenant on the entry.
        found: TenantId,
    },
}

impl LedgerError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::ZeroAmount(_) => "ZERO_AMOUNT",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::BothSides(_) => "BOTH_SIDES",
            Self::UnclassifiedAccount(_) => "UNCLASSIFIED_ACCOUNT",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::TenantMismatch { .. } => "TENANT_MISMATCH",
        }
    }

    /// Returns true if this error reports an imbalance rather than a
    /// malformed input.
    #[must_use]
    pub fn is_imbalance(&self) -> bool {
        matches!(self, Self::UnbalancedEntry { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::InsufficientLines.error_code(), "INSUFFICIENT_LINES");
        assert_eq!(
            LedgerError::UnbalancedEntry {
                debit: dec!(1.00),
                credit: dec!(0.50),
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(LedgerError::ZeroAmount("2040".into()).error_code(), "ZERO_AMOUNT");
        assert_eq!(
            LedgerError::UnclassifiedAccount("9000".into()).error_code(),
            "UNCLASSIFIED_ACCOUNT"
        );
    }

    #[test]
    fn test_imbalance_classification() {
        assert!(
            LedgerError::UnbalancedEntry {
                debit: dec!(1),
                credit: dec!(2),
            }
            .is_imbalance()
        );
        assert!(!LedgerError::BothSides("2040".into()).is_imbalance());
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::UnbalancedEntry {
            debit: dec!(100.00),
            credit: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Journal entry is not balanced. Debit: 100.00, Credit: 50.00"
        );
    }
}
