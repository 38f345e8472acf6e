//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Journal lines (debits and credits)
//! - Journal entries with the draft → posted → reversed lifecycle
//! - Account types and balance sign conventions
//! - Business rule validation ("must balance")
//! - Chart of accounts lookup
//! - Aggregation into trial balance and balance sheet sections

pub mod aggregator;
pub mod balance;
pub mod chart;
pub mod entry;
pub mod error;
pub mod journal;
pub mod validation;

#[cfg(test)]
mod aggregator_props;

pub use aggregator::{
    BalanceSheetSections, IncomeSections, LedgerAccount, LedgerAggregator, Section, SectionLine,
    TrialBalance, TrialBalanceRow,
};
pub use balance::{AccountType, NormalBalance, RunningBalance};
pub use chart::{ChartEntry, ChartOfAccounts};
pub use entry::{EntryType, JournalLine};
pub use error::LedgerError;
pub use journal::{EntryStatus, JournalEntry, Reversal};
pub use validation::{EntryTotals, validate_balanced};
