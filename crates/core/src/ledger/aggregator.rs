//! Ledger aggregation: account balances, trial balance, balance sheet.
//!
//! Balances are always derived by folding posted lines; nothing here stores
//! or mutates a balance independently of the lines that produced it.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use racun_shared::types::TenantId;

use super::balance::AccountType;
use super::chart::ChartOfAccounts;
use super::entry::JournalLine;
use super::error::LedgerError;
use super::journal::JournalEntry;
use super::validation::validate_balanced;

/// Accumulated state of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerAccount {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Sum of debits.
    pub debit_total: Decimal,
    /// Sum of credits.
    pub credit_total: Decimal,
    /// Balance under the account type's sign convention.
    pub balance: Decimal,
    /// Number of lines folded in.
    pub line_count: usize,
}

impl LedgerAccount {
    /// Creates an account with zero totals.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            debit_total: Decimal::ZERO,
            credit_total: Decimal::ZERO,
            balance: Decimal::ZERO,
            line_count: 0,
        }
    }

    /// Folds one line into the account.
    pub fn apply(&mut self, line: &JournalLine) {
        self.debit_total += line.debit;
        self.credit_total += line.credit;
        self.balance += self
            .account_type
            .normal_balance()
            .calculate_balance_change(line.debit, line.credit);
        self.line_count += 1;
    }

    /// Net debit-minus-credit position, independent of account type.
    #[must_use]
    pub fn net_debit(&self) -> Decimal {
        self.debit_total - self.credit_total
    }
}

/// One trial balance row. Exactly one of `debit` and `credit` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Net debit position.
    pub debit: Decimal,
    /// Net credit position.
    pub credit: Decimal,
    /// Balance under the account type's sign convention.
    pub balance: Decimal,
}

/// Trial balance over non-zero accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    /// Rows in ascending code order.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether the columns agree within tolerance.
    pub is_balanced: bool,
}

/// One account shown in a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionLine {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Balance under the account type's sign convention.
    pub balance: Decimal,
}

/// A group of accounts with its total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Accounts in ascending code order.
    pub lines: Vec<SectionLine>,
    /// Sum of the balances.
    pub total: Decimal,
}

impl Section {
    fn collect<'a>(accounts: impl Iterator<Item = &'a LedgerAccount>) -> Self {
        let lines: Vec<SectionLine> = accounts
            .filter(|account| !account.balance.is_zero())
            .map(|account| SectionLine {
                code: account.code.clone(),
                name: account.name.clone(),
                balance: account.balance,
            })
            .collect();
        let total = lines.iter().map(|line| line.balance).sum();
        Self { lines, total }
    }
}

/// Balance sheet figures with the accounting identity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheetSections {
    /// Asset accounts.
    pub assets: Section,
    /// Liability accounts.
    pub liabilities: Section,
    /// Equity accounts, excluding the current-period result.
    pub equity: Section,
    /// Revenue minus expense for the open period.
    pub current_period_result: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity including the current-period result.
    pub total_equity: Decimal,
    /// Assets minus liabilities and equity.
    pub difference: Decimal,
    /// Whether the difference is within tolerance.
    pub is_balanced: bool,
}

/// Revenue and expense sections for the income statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeSections {
    /// Revenue accounts.
    pub revenue: Section,
    /// Expense accounts.
    pub expenses: Section,
    /// Revenue minus expenses.
    pub net_income: Decimal,
}

/// Folds posted journal entries of one tenant into account balances.
#[derive(Debug, Clone)]
pub struct LedgerAggregator {
    chart: ChartOfAccounts,
    tenant: TenantId,
    tolerance: Decimal,
}

impl LedgerAggregator {
    /// Creates an aggregator for `tenant`.
    #[must_use]
    pub fn new(chart: ChartOfAccounts, tenant: TenantId, tolerance: Decimal) -> Self {
        Self {
            chart,
            tenant,
            tolerance,
        }
    }

    /// The tenant this aggregator serves.
    #[must_use]
    pub fn tenant(&self) -> TenantId {
        self.tenant
    }

    /// The chart used to classify accounts.
    #[must_use]
    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    /// Fails if `entry` belongs to another tenant.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TenantMismatch`].
    pub fn check_tenant(&self, entry: &JournalEntry) -> Result<(), LedgerError> {
        if entry.tenant == self.tenant {
            Ok(())
        } else {
            Err(LedgerError::TenantMismatch {
                id: entry.id,
                expected: self.tenant,
                found: entry.tenant,
            })
        }
    }

    /// Accumulates posted entries into accounts keyed by code.
    ///
    /// Draft and reversed entries are skipped. Accounts whose lines net to
    /// zero stay in the map. Posted entries are re-checked line by line and
    /// for exact balance, since they may come from storage rather than
    /// from [`JournalEntry::post`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TenantMismatch`] for an entry of another tenant,
    /// any line or balance error of a posted entry, and
    /// [`LedgerError::UnclassifiedAccount`] for an unknown account code.
    pub fn accumulate<'a>(
        &self,
        entries: impl IntoIterator<Item = &'a JournalEntry>,
    ) -> Result<BTreeMap<String, LedgerAccount>, LedgerError> {
        let mut accounts: BTreeMap<String, LedgerAccount> = BTreeMap::new();
        let mut posted = 0usize;
        let mut skipped = 0usize;

        for entry in entries {
            self.check_tenant(entry)?;
            if !entry.status.participates_in_balances() {
                skipped += 1;
                continue;
            }
            posted += 1;
            validate_balanced(&entry.lines, Decimal::ZERO)?;
            for line in &entry.lines {
                self.account_for(&mut accounts, line)?.apply(line);
            }
        }

        debug!(
            tenant = %self.tenant,
            posted,
            skipped,
            accounts = accounts.len(),
            "ledger accumulated"
        );
        Ok(accounts)
    }

    fn account_for<'m>(
        &self,
        accounts: &'m mut BTreeMap<String, LedgerAccount>,
        line: &JournalLine,
    ) -> Result<&'m mut LedgerAccount, LedgerError> {
        if !accounts.contains_key(&line.account_code) {
            let account_type = self.chart.classify(&line.account_code)?;
            let name = self
                .chart
                .get(&line.account_code)
                .map_or_else(|| line.account_name.clone(), |entry| entry.name.clone());
            accounts.insert(
                line.account_code.clone(),
                LedgerAccount::new(line.account_code.clone(), name, account_type),
            );
        }
        accounts
            .get_mut(&line.account_code)
            .ok_or_else(|| LedgerError::UnclassifiedAccount(line.account_code.clone()))
    }

    /// Builds the trial balance, omitting accounts with a zero balance.
    #[must_use]
    pub fn trial_balance(&self, accounts: &BTreeMap<String, LedgerAccount>) -> TrialBalance {
        let rows: Vec<TrialBalanceRow> = accounts
            .values()
            .filter(|account| !account.balance.is_zero())
            .map(|account| {
                let net = account.net_debit();
                TrialBalanceRow {
                    code: account.code.clone(),
                    name: account.name.clone(),
                    account_type: account.account_type,
                    debit: net.max(Decimal::ZERO),
                    credit: (-net).max(Decimal::ZERO),
                    balance: account.balance,
                }
            })
            .collect();

        let total_debit: Decimal = rows.iter().map(|row| row.debit).sum();
        let total_credit: Decimal = rows.iter().map(|row| row.credit).sum();
        let is_balanced = (total_debit - total_credit).abs() <= self.tolerance;
        if !is_balanced {
            warn!(tenant = %self.tenant, %total_debit, %total_credit, "trial balance does not balance");
        }

        TrialBalance {
            rows,
            total_debit,
            total_credit,
            is_balanced,
        }
    }

    /// Splits balance sheet accounts into sections and checks
    /// assets = liabilities + equity.
    #[must_use]
    pub fn balance_sheet_sections(
        &self,
        accounts: &BTreeMap<String, LedgerAccount>,
    ) -> BalanceSheetSections {
        let sheet: Vec<&LedgerAccount> = accounts
            .values()
            .filter(|a| a.account_type.is_balance_sheet())
            .collect();
        let of_type = |t: AccountType| sheet.iter().copied().filter(move |a| a.account_type == t);

        let assets = Section::collect(of_type(AccountType::Asset));
        let liabilities = Section::collect(of_type(AccountType::Liability));
        let equity = Section::collect(of_type(AccountType::Equity));
        let current_period_result = self.income_sections(accounts).net_income;

        let total_assets = assets.total;
        let total_liabilities = liabilities.total;
        let total_equity = equity.total + current_period_result;
        let difference = total_assets - (total_liabilities + total_equity);
        let is_balanced = difference.abs() <= self.tolerance;
        if !is_balanced {
            warn!(tenant = %self.tenant, %difference, "balance sheet does not balance");
        }

        BalanceSheetSections {
            assets,
            liabilities,
            equity,
            current_period_result,
            total_assets,
            total_liabilities,
            total_equity,
            difference,
            is_balanced,
        }
    }

    /// Splits income statement accounts into revenue and expenses.
    #[must_use]
    pub fn income_sections(&self, accounts: &BTreeMap<String, LedgerAccount>) -> IncomeSections {
        let of_type = |t: AccountType| {
            accounts
                .values()
                .filter(|a| !a.account_type.is_balance_sheet())
                .filter(move |a| a.account_type == t)
        };
        let revenue = Section::collect(of_type(AccountType::Revenue));
        let expenses = Section::collect(of_type(AccountType::Expense));
        let net_income = revenue.total - expenses.total;
        IncomeSections {
            revenue,
            expenses,
            net_income,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::journal::EntryStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn posted(tenant: TenantId, lines: Vec<JournalLine>) -> JournalEntry {
        JournalEntry::draft(tenant, date(), None, lines).post().unwrap()
    }

    fn sale(tenant: TenantId, net: Decimal, tax: Decimal) -> JournalEntry {
        posted(
            tenant,
            vec![
                JournalLine::debit("2040", "Kupci u zemlji", net + tax, ""),
                JournalLine::credit("6500", "Prihodi od usluga", net, ""),
                JournalLine::credit("4700", "Obaveze za PDV", tax, ""),
            ],
        )
    }

    fn aggregator(tenant: TenantId) -> LedgerAggregator {
        LedgerAggregator::new(ChartOfAccounts::new(), tenant, dec!(0.01))
    }

    #[test]
    fn test_accumulate_applies_sign_convention() {
        let tenant = TenantId::new();
        let agg = aggregator(tenant);
        let accounts = agg.accumulate(&[sale(tenant, dec!(1000), dec!(200))]).unwrap();

        assert_eq!(accounts["2040"].balance, dec!(1200));
        assert_eq!(accounts["2040"].account_type, AccountType::Asset);
        assert_eq!(accounts["6500"].balance, dec!(1000));
        assert_eq!(accounts["4700"].balance, dec!(200));
        assert_eq!(accounts["4700"].account_type, AccountType::Liability);
    }

    #[test]
    fn test_draft_and_reversed_entries_excluded() {
        let tenant = TenantId::new();
        let draft = JournalEntry::draft(
            tenant,
            date(),
            None,
            vec![
                JournalLine::debit("2040", "", dec!(5), ""),
                JournalLine::credit("6500", "", dec!(5), ""),
            ],
        );
        let reversal = sale(tenant, dec!(100), dec!(20)).reverse(date(), "error").unwrap();
        let kept = sale(tenant, dec!(10), dec!(2));

        let entries = vec![draft, reversal.original, reversal.reversing, kept];
        let accounts = aggregator(tenant).accumulate(&entries).unwrap();
        assert_eq!(accounts["2040"].balance, dec!(12));
        assert_eq!(accounts["2040"].line_count, 1);
        assert_eq!(entries[0].status, EntryStatus::Draft);
    }

    /// Round-trips a posted entry through JSON with its lines replaced, the
    /// way a stored entry reaches the aggregator without going through `post`.
    fn stored(entry: &JournalEntry, lines: serde_json::Value) -> JournalEntry {
        let mut value = serde_json::to_value(entry).unwrap();
        value["lines"] = lines;
        serde_json::from_value(value).unwrap()
    }

    fn json_line(code: &str, debit: &str, credit: &str) -> serde_json::Value {
        serde_json::json!({
            "account_code": code,
            "account_name": "",
            "debit": debit,
            "credit": credit,
            "description": "",
        })
    }

    #[test]
    fn test_stored_entry_with_both_sides_line_rejected() {
        let tenant = TenantId::new();
        let entry = stored(
            &sale(tenant, dec!(50), dec!(10)),
            serde_json::json!([json_line("2040", "100", "40"), json_line("6500", "0", "10")]),
        );
        assert_eq!(entry.status, EntryStatus::Posted);
        assert_eq!(
            aggregator(tenant).accumulate(&[entry]),
            Err(LedgerError::BothSides("2040".into()))
        );
    }

    #[test]
    fn test_stored_unbalanced_entry_rejected() {
        let tenant = TenantId::new();
        let entry = stored(
            &sale(tenant, dec!(50), dec!(10)),
            serde_json::json!([json_line("2040", "100", "0"), json_line("6500", "0", "90")]),
        );
        assert_eq!(
            aggregator(tenant).accumulate(&[entry]),
            Err(LedgerError::UnbalancedEntry {
                debit: dec!(100),
                credit: dec!(90),
            })
        );
    }

    #[test]
    fn test_stored_entry_with_negative_amount_rejected() {
        let tenant = TenantId::new();
        let entry = stored(
            &sale(tenant, dec!(50), dec!(10)),
            serde_json::json!([json_line("2040", "-60", "0"), json_line("6500", "0", "-60")]),
        );
        assert!(matches!(
            aggregator(tenant).accumulate(&[entry]),
            Err(LedgerError::NegativeAmount(code)) if code == "2040"
        ));
    }

    #[test]
    fn test_tenant_mismatch_rejected() {
        let tenant = TenantId::new();
        let other = TenantId::new();
        let err = aggregator(tenant).accumulate(&[sale(other, dec!(1), dec!(0.2))]).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::TenantMismatch { expected, found, .. } if expected == tenant && found == other
        ));
    }

    #[test]
    fn test_unclassified_account_rejected() {
        let tenant = TenantId::new();
        let entry = posted(
            tenant,
            vec![
                JournalLine::debit("9000", "Vanbilansna", dec!(1), ""),
                JournalLine::credit("6500", "", dec!(1), ""),
            ],
        );
        assert_eq!(
            aggregator(tenant).accumulate(&[entry]),
            Err(LedgerError::UnclassifiedAccount("9000".into()))
        );
    }

    #[test]
    fn test_chart_name_preferred() {
        let tenant = TenantId::new();
        let chart = ChartOfAccounts::new().with_account("6500", "Services revenue", AccountType::Revenue);
        let agg = LedgerAggregator::new(chart, tenant, dec!(0.01));
        let entry = posted(
            tenant,
            vec![
                JournalLine::debit("2040", "Kupci", dec!(1), ""),
                JournalLine::credit("6500", "Prihodi", dec!(1), ""),
            ],
        );
        let accounts = agg.accumulate(&[entry]).unwrap();
        assert_eq!(accounts["6500"].name, "Services revenue");
        assert_eq!(accounts["2040"].name, "Kupci");
    }

    #[test]
    fn test_trial_balance_sorted_and_balanced() {
        let tenant = TenantId::new();
        let agg = aggregator(tenant);
        let accounts = agg.accumulate(&[sale(tenant, dec!(1000), dec!(200))]).unwrap();
        let tb = agg.trial_balance(&accounts);

        let codes: Vec<&str> = tb.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["2040", "4700", "6500"]);
        assert_eq!(tb.rows[0].debit, dec!(1200));
        assert_eq!(tb.rows[0].credit, dec!(0));
        assert_eq!(tb.rows[1].credit, dec!(200));
        assert_eq!(tb.total_debit, dec!(1200));
        assert_eq!(tb.total_credit, dec!(1200));
        assert!(tb.is_balanced);
    }

    #[test]
    fn test_code_order_is_lexicographic() {
        let tenant = TenantId::new();
        let entry = posted(
            tenant,
            vec![
                JournalLine::debit("241", "Tekući račun", dec!(5), ""),
                JournalLine::credit("2040", "Kupci", dec!(5), ""),
            ],
        );
        let agg = aggregator(tenant);
        let tb = agg.trial_balance(&agg.accumulate(&[entry]).unwrap());
        let codes: Vec<&str> = tb.rows.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["2040", "241"]);
    }

    #[test]
    fn test_balance_sheet_includes_current_result() {
        let tenant = TenantId::new();
        let agg = aggregator(tenant);
        let capital = posted(
            tenant,
            vec![
                JournalLine::debit("2410", "Tekući račun", dec!(5000), ""),
                JournalLine::credit("3000", "Osnovni kapital", dec!(5000), ""),
            ],
        );
        let expense = posted(
            tenant,
            vec![
                JournalLine::debit("5330", "Zakup", dec!(300), ""),
                JournalLine::credit("2410", "Tekući račun", dec!(300), ""),
            ],
        );
        let accounts = agg
            .accumulate(&[capital, sale(tenant, dec!(1000), dec!(200)), expense])
            .unwrap();
        let bs = agg.balance_sheet_sections(&accounts);

        assert_eq!(bs.total_assets, dec!(5900));
        assert_eq!(bs.total_liabilities, dec!(200));
        assert_eq!(bs.equity.total, dec!(5000));
        assert_eq!(bs.current_period_result, dec!(700));
        assert_eq!(bs.total_equity, dec!(5700));
        assert_eq!(bs.difference, dec!(0));
        assert!(bs.is_balanced);
        assert_eq!(bs.assets.lines.len(), 2);
    }

    #[test]
    fn test_balance_sheet_reports_imbalance() {
        let tenant = TenantId::new();
        let agg = aggregator(tenant);
        let mut accounts = BTreeMap::new();
        let mut cash = LedgerAccount::new("2410", "Tekući račun", AccountType::Asset);
        cash.apply(&JournalLine::debit("2410", "", dec!(100), ""));
        accounts.insert(cash.code.clone(), cash);

        let bs = agg.balance_sheet_sections(&accounts);
        assert!(!bs.is_balanced);
        assert_eq!(bs.difference, dec!(100));
        let tb = agg.trial_balance(&accounts);
        assert!(!tb.is_balanced);
    }

    #[test]
    fn test_income_sections() {
        let tenant = TenantId::new();
        let agg = aggregator(tenant);
        let accounts = agg.accumulate(&[sale(tenant, dec!(1000), dec!(200))]).unwrap();
        let income = agg.income_sections(&accounts);
        assert_eq!(income.revenue.total, dec!(1000));
        assert_eq!(income.expenses.total, dec!(0));
        assert!(income.expenses.lines.is_empty());
        assert_eq!(income.net_income, dec!(1000));
    }
}
