//! Report generation service.
//!
//! Every report is a view over [`LedgerAggregator`] output, so the sign
//! convention and the posted-only rule are applied in exactly one place.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    AccountLedgerEntry, AccountLedgerReport, BalanceSheetReport, IncomeStatementReport,
    ReportPeriod, TrialBalanceReport, TrialBalanceTotals,
};
use crate::ledger::{JournalEntry, LedgerAggregator, RunningBalance};

/// Service for generating financial reports for one tenant.
#[derive(Debug, Clone)]
pub struct ReportService {
    aggregator: LedgerAggregator,
    currency: String,
}

impl ReportService {
    /// Creates a service reporting in `currency`.
    #[must_use]
    pub fn new(aggregator: LedgerAggregator, currency: impl Into<String>) -> Self {
        Self {
            aggregator,
            currency: currency.into(),
        }
    }

    /// Checks every entry's tenant, then keeps those matching `include`.
    fn select<'a>(
        &self,
        entries: &'a [JournalEntry],
        include: impl Fn(&JournalEntry) -> bool,
    ) -> Result<Vec<&'a JournalEntry>, ReportError> {
        let mut selected = Vec::new();
        for entry in entries {
            self.aggregator.check_tenant(entry)?;
            if include(entry) {
                selected.push(entry);
            }
        }
        Ok(selected)
    }

    /// Generates a trial balance over entries dated on or before `as_of`.
    pub fn trial_balance(
        &self,
        entries: &[JournalEntry],
        as_of: NaiveDate,
    ) -> Result<TrialBalanceReport, ReportError> {
        let selected = self.select(entries, |e| e.date <= as_of)?;
        let accounts = self.aggregator.accumulate(selected)?;
        let tb = self.aggregator.trial_balance(&accounts);

        Ok(TrialBalanceReport {
            report_type: "trial_balance".to_string(),
            tenant: self.aggregator.tenant(),
            as_of,
            currency: self.currency.clone(),
            rows: tb.rows,
            totals: TrialBalanceTotals {
                total_debit: tb.total_debit,
                total_credit: tb.total_credit,
                is_balanced: tb.is_balanced,
            },
        })
    }

    /// Generates a balance sheet over entries dated on or before `as_of`.
    pub fn balance_sheet(
        &self,
        entries: &[JournalEntry],
        as_of: NaiveDate,
    ) -> Result<BalanceSheetReport, ReportError> {
        let selected = self.select(entries, |e| e.date <= as_of)?;
        let accounts = self.aggregator.accumulate(selected)?;
        let bs = self.aggregator.balance_sheet_sections(&accounts);

        Ok(BalanceSheetReport {
            report_type: "balance_sheet".to_string(),
            tenant: self.aggregator.tenant(),
            as_of,
            currency: self.currency.clone(),
            liabilities_and_equity: bs.total_liabilities + bs.total_equity,
            assets: bs.assets,
            liabilities: bs.liabilities,
            equity: bs.equity,
            current_period_result: bs.current_period_result,
            total_assets: bs.total_assets,
            total_liabilities: bs.total_liabilities,
            total_equity: bs.total_equity,
            is_balanced: bs.is_balanced,
        })
    }

    /// Generates an income statement over entries dated within `period`.
    pub fn income_statement(
        &self,
        entries: &[JournalEntry],
        period: ReportPeriod,
    ) -> Result<IncomeStatementReport, ReportError> {
        let selected = self.select(entries, |e| period.contains(e.date))?;
        let accounts = self.aggregator.accumulate(selected)?;
        let income = self.aggregator.income_sections(&accounts);

        Ok(IncomeStatementReport {
            report_type: "income_statement".to_string(),
            tenant: self.aggregator.tenant(),
            period_start: period.start,
            period_end: period.end,
            currency: self.currency.clone(),
            revenue: income.revenue,
            expenses: income.expenses,
            net_income: income.net_income,
        })
    }

    /// Lists the posted lines of one account within `period`, with a running
    /// balance starting from the balance before the period.
    pub fn account_ledger(
        &self,
        entries: &[JournalEntry],
        account_code: &str,
        period: ReportPeriod,
    ) -> Result<AccountLedgerReport, ReportError> {
        let account_type = self.aggregator.chart().classify(account_code)?;
        let convention = account_type.normal_balance();

        let mut selected = self.select(entries, |e| {
            e.status.participates_in_balances() && e.date <= period.end
        })?;
        // Stable: same-day entries keep their input order.
        selected.sort_by_key(|e| e.date);

        let mut opening_balance = Decimal::ZERO;
        let mut running: Option<RunningBalance> = None;
        let mut lines = Vec::new();

        for entry in selected {
            for line in entry.lines.iter().filter(|l| l.account_code == account_code) {
                let change = convention.calculate_balance_change(line.debit, line.credit);
                if entry.date < period.start {
                    opening_balance += change;
                    continue;
                }
                let next = match running.as_ref() {
                    Some(prev) => RunningBalance::next_entry(prev, change),
                    None => RunningBalance {
                        sequence: 1,
                        previous_balance: opening_balance,
                        current_balance: opening_balance + change,
                    },
                };
                lines.push(AccountLedgerEntry {
                    entry_id: entry.id,
                    date: entry.date,
                    document_ref: line.document_ref.clone().or_else(|| entry.document_ref.clone()),
                    description: line.description.clone(),
                    debit: line.debit,
                    credit: line.credit,
                    running_balance: next.current_balance,
                });
                running = Some(next);
            }
        }

        Ok(AccountLedgerReport {
            report_type: "account_ledger".to_string(),
            tenant: self.aggregator.tenant(),
            account_code: account_code.to_string(),
            account_type,
            period_start: period.start,
            period_end: period.end,
            opening_balance,
            closing_balance: running.map_or(opening_balance, |r| r.current_balance),
            entries: lines,
        })
    }
}
