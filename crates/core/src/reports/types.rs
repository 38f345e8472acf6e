//! Report data types.
//!
//! Every report carries the dates it was computed for; none of them reads
//! the clock.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use racun_shared::types::{JournalEntryId, TenantId};

use super::error::ReportError;
use crate::ledger::{AccountType, Section, TrialBalanceRow};

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidDateRange`] if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if `date` falls inside the period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Trial balance totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialBalanceTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Whether debits equal credits within tolerance.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceReport {
    /// Report type identifier.
    pub report_type: String,
    /// Tenant reported on.
    pub tenant: TenantId,
    /// As of date.
    pub as_of: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Non-zero accounts in code order.
    pub rows: Vec<TrialBalanceRow>,
    /// Totals.
    pub totals: TrialBalanceTotals,
}

/// Balance sheet report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheetReport {
    /// Report type identifier.
    pub report_type: String,
    /// Tenant reported on.
    pub tenant: TenantId,
    /// As of date.
    pub as_of: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Assets section.
    pub assets: Section,
    /// Liabilities section.
    pub liabilities: Section,
    /// Equity section.
    pub equity: Section,
    /// Result of the open period, reported within equity.
    pub current_period_result: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity including the current-period result.
    pub total_equity: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity within tolerance.
    pub is_balanced: bool,
}

/// Income statement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeStatementReport {
    /// Report type identifier.
    pub report_type: String,
    /// Tenant reported on.
    pub tenant: TenantId,
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Revenue section.
    pub revenue: Section,
    /// Expenses section.
    pub expenses: Section,
    /// Net income (revenue - expenses).
    pub net_income: Decimal,
}

/// One line in an account ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountLedgerEntry {
    /// Journal entry the line belongs to.
    pub entry_id: JournalEntryId,
    /// Entry date.
    pub date: NaiveDate,
    /// Source document number.
    pub document_ref: Option<String>,
    /// Description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this line.
    pub running_balance: Decimal,
}

/// Chronological activity of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountLedgerReport {
    /// Report type identifier.
    pub report_type: String,
    /// Tenant reported on.
    pub tenant: TenantId,
    /// Account code.
    pub account_code: String,
    /// Account type, which fixes the sign convention.
    pub account_type: AccountType,
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Balance before the period.
    pub opening_balance: Decimal,
    /// Lines within the period, oldest first.
    pub entries: Vec<AccountLedgerEntry>,
    /// Balance at the end of the period.
    pub closing_balance: Decimal,
}
