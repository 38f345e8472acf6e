//! Business rule validation for journal lines.

use rust_decimal::Decimal;
use serde::Serialize;

use super::entry::JournalLine;
use super::error::LedgerError;

/// Debit and credit sums of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
}

impl EntryTotals {
    /// Sums the lines.
    #[must_use]
    pub fn from_lines(lines: &[JournalLine]) -> Self {
        lines.iter().fold(
            Self {
                debit: Decimal::ZERO,
                credit: Decimal::ZERO,
            },
            |acc, line| Self {
                debit: acc.debit + line.debit,
                credit: acc.credit + line.credit,
            },
        )
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns true if the difference is within `tolerance`.
    #[must_use]
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        self.difference().abs() <= tolerance
    }
}

/// Validates that a set of journal lines forms a balanced entry.
///
/// # Errors
///
/// Returns an error if there are fewer than two lines, any line breaks the
/// one-sided amount rule, or debits and credits differ by more than
/// `tolerance`.
pub fn validate_balanced(
    lines: &[JournalLine],
    tolerance: Decimal,
) -> Result<EntryTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }
    for line in lines {
        line.validate()?;
    }

    let totals = EntryTotals::from_lines(lines);
    if !totals.is_balanced(tolerance) {
        return Err(LedgerError::UnbalancedEntry {
            debit: totals.debit,
            credit: totals.credit,
        });
    }
    Ok(totals)
}
