//! Journal line domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Type of journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit line (increases assets/expenses, decreases liabilities/equity/revenue).
    Debit,
    /// Credit line (decreases assets/expenses, increases liabilities/equity/revenue).
    Credit,
}

impl EntryType {
    /// Returns the other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// A single line of a journal entry.
///
/// Exactly one of `debit` and `credit` is non-zero on a valid line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Account code in the chart of accounts.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Debit amount.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit: Decimal,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Number of the business document this line came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_ref: Option<String>,
}

impl JournalLine {
    /// Creates a line on the given side.
    #[must_use]
    pub fn new(
        entry_type: EntryType,
        account_code: impl Into<String>,
        account_name: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        let (debit, credit) = match entry_type {
            EntryType::Debit => (amount, Decimal::ZERO),
            EntryType::Credit => (Decimal::ZERO, amount),
        };
        Self {
            account_code: account_code.into(),
            account_name: account_name.into(),
            debit,
            credit,
            description: description.into(),
            document_ref: None,
        }
    }

    /// Creates a debit line.
    #[must_use]
    pub fn debit(
        account_code: impl Into<String>,
        account_name: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self::new(EntryType::Debit, account_code, account_name, amount, description)
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(
        account_code: impl Into<String>,
        account_name: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self::new(EntryType::Credit, account_code, account_name, amount, description)
    }

    /// Attaches the source document number.
    #[must_use]
    pub fn with_document_ref(mut self, document_ref: impl Into<String>) -> Self {
        self.document_ref = Some(document_ref.into());
        self
    }

    /// Returns the side carrying the amount, or `None` for a zero line.
    #[must_use]
    pub fn entry_type(&self) -> Option<EntryType> {
        if !self.debit.is_zero() {
            Some(EntryType::Debit)
        } else if !self.credit.is_zero() {
            Some(EntryType::Credit)
        } else {
            None
        }
    }

    /// Returns the non-zero amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        if self.debit.is_zero() {
            self.credit
        } else {
            self.debit
        }
    }

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns the same line with debit and credit exchanged.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            debit: self.credit,
            credit: self.debit,
            ..self.clone()
        }
    }

    /// Checks the one-sided amount rule.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative amount, a line with both sides set, or
    /// a line with neither side set.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.debit < Decimal::ZERO || self.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(self.account_code.clone()));
        }
        match (self.debit.is_zero(), self.credit.is_zero()) {
            (false, false) => Err(LedgerError::BothSides(self.account_code.clone())),
            (true, true) => Err(LedgerError::ZeroAmount(self.account_code.clone())),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constructors_set_one_side() {
        let d = JournalLine::debit("2040", "Kupci", dec!(1200), "Invoice");
        assert_eq!(d.debit, dec!(1200));
        assert_eq!(d.credit, dec!(0));
        assert_eq!(d.entry_type(), Some(EntryType::Debit));

        let c = JournalLine::credit("6500", "Prihodi", dec!(1000), "Invoice");
        assert_eq!(c.credit, dec!(1000));
        assert_eq!(c.signed_amount(), dec!(-1000));
        assert_eq!(c.amount(), dec!(1000));
    }

    #[test]
    fn test_swapped() {
        let line = JournalLine::debit("2040", "Kupci", dec!(10), "x").with_document_ref("F-1");
        let swapped = line.swapped();
        assert_eq!(swapped.credit, dec!(10));
        assert_eq!(swapped.debit, dec!(0));
        assert_eq!(swapped.document_ref.as_deref(), Some("F-1"));
        assert_eq!(swapped.swapped(), line);
    }

    #[test]
    fn test_validate() {
        assert!(JournalLine::debit("2040", "", dec!(1), "").validate().is_ok());
        assert_eq!(
            JournalLine::debit("2040", "", dec!(0), "").validate(),
            Err(LedgerError::ZeroAmount("2040".into()))
        );
        assert_eq!(
            JournalLine::credit("2040", "", dec!(-5), "").validate(),
            Err(LedgerError::NegativeAmount("2040".into()))
        );
        let mut both = JournalLine::debit("2040", "", dec!(1), "");
        both.credit = dec!(1);
        assert_eq!(both.validate(), Err(LedgerError::BothSides("2040".into())));
    }

    #[test]
    fn test_entry_type_opposite() {
        assert_eq!(EntryType::Debit.opposite(), EntryType::Credit);
        assert_eq!(EntryType::Credit.opposite(), EntryType::Debit);
    }
}
