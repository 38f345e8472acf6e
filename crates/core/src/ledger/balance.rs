//! Account types and balance sign conventions.
//!
//! - Asset/Expense: balance += debit - credit (debit-normal)
//! - Liability/Equity/Revenue: balance += credit - debit (credit-normal)

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    Asset,
    /// Liability account.
    Liability,
    /// Equity account.
    Equity,
    /// Revenue account.
    Revenue,
    /// Expense account.
    Expense,
}

impl AccountType {
    /// Returns the side on which the account's balance grows.
    #[must_use]
    pub fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::DebitNormal,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::CreditNormal,
        }
    }

    /// Classifies an account by the first digit of its code, following the
    /// statutory chart's class layout.
    #[must_use]
    pub fn from_code_class(code: &str) -> Option<Self> {
        match code.chars().next()? {
            '0'..='2' => Some(Self::Asset),
            '3' => Some(Self::Equity),
            '4' => Some(Self::Liability),
            '5' => Some(Self::Expense),
            '6' => Some(Self::Revenue),
            _ => None,
        }
    }

    /// Returns true for accounts reported on the balance sheet.
    #[must_use]
    pub fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }

    /// Returns the lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sign convention for balance calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    DebitNormal,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    CreditNormal,
}

impl NormalBalance {
    /// Calculates the balance change for a line.
    #[must_use]
    pub fn calculate_balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::DebitNormal => debit - credit,
            Self::CreditNormal => credit - debit,
        }
    }
}

/// Running balance after one line on an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// 1-based position of the line on the account.
    pub sequence: u64,
    /// Balance before this line.
    pub previous_balance: Decimal,
    /// Balance after this line.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Running balance for the first line on an account.
    #[must_use]
    pub fn first_entry(balance_change: Decimal) -> Self {
        Self {
            sequence: 1,
            previous_balance: Decimal::ZERO,
            current_balance: balance_change,
        }
    }

    /// Running balance following `previous`.
    #[must_use]
    pub fn next_entry(previous: &Self, balance_change: Decimal) -> Self {
        Self {
            sequence: previous.sequence + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance + balance_change,
        }
    }

    /// Advances from an optional previous balance.
    #[must_use]
    pub fn advance(previous: Option<&Self>, balance_change: Decimal) -> Self {
        match previous {
            Some(prev) => Self::next_entry(prev, balance_change),
            None => Self::first_entry(balance_change),
        }
    }
}
