//! Property-based tests for the ledger aggregator.
//!
//! - Balanced entries always produce a balanced trial balance
//! - Accounts netting to zero stay in the map but leave the trial balance
//! - Reversed entries never change balances

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use racun_shared::types::TenantId;

use super::aggregator::LedgerAggregator;
use super::chart::ChartOfAccounts;
use super::entry::JournalLine;
use super::journal::JournalEntry;

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to pick an account code from every class.
fn account_code() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("0230"),
        Just("2040"),
        Just("2410"),
        Just("3000"),
        Just("4350"),
        Just("4700"),
        Just("5330"),
        Just("6500"),
    ]
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn posted_pair(tenant: TenantId, debit: &str, credit: &str, amount: Decimal) -> JournalEntry {
    JournalEntry::draft(
        tenant,
        date(),
        None,
        vec![
            JournalLine::debit(debit, "", amount, ""),
            JournalLine::credit(credit, "", amount, ""),
        ],
    )
    .post()
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Posting only balanced entries yields equal trial balance columns.
    #[test]
    fn prop_balanced_entries_balance_the_trial_balance(
        postings in prop::collection::vec((account_code(), account_code(), positive_amount()), 1..20),
    ) {
        let tenant = TenantId::new();
        let entries: Vec<JournalEntry> = postings
            .iter()
            .map(|(d, c, amount)| posted_pair(tenant, d, c, *amount))
            .collect();
        let agg = LedgerAggregator::new(ChartOfAccounts::new(), tenant, dec!(0.01));
        let accounts = agg.accumulate(&entries).unwrap();
        let tb = agg.trial_balance(&accounts);

        prop_assert_eq!(tb.total_debit, tb.total_credit);
        prop_assert!(tb.is_balanced);

        let bs = agg.balance_sheet_sections(&accounts);
        prop_assert!(bs.is_balanced);
        prop_assert_eq!(bs.difference, Decimal::ZERO);
    }

    /// Two posted entries that net an account to zero: the account is absent
    /// from the trial balance but present in the accumulation map.
    #[test]
    fn prop_zero_net_account_kept_in_map_omitted_from_rows(
        amount in positive_amount(),
    ) {
        let tenant = TenantId::new();
        let entries = vec![
            posted_pair(tenant, "2040", "6500", amount),
            posted_pair(tenant, "2410", "2040", amount),
        ];
        let agg = LedgerAggregator::new(ChartOfAccounts::new(), tenant, dec!(0.01));
        let accounts = agg.accumulate(&entries).unwrap();

        let receivable = &accounts["2040"];
        prop_assert_eq!(receivable.balance, Decimal::ZERO);
        prop_assert_eq!(receivable.debit_total, amount);
        prop_assert_eq!(receivable.credit_total, amount);
        prop_assert_eq!(receivable.line_count, 2);

        let tb = agg.trial_balance(&accounts);
        prop_assert!(tb.rows.iter().all(|row| row.code != "2040"));
        prop_assert_eq!(tb.rows.len(), 2);
        prop_assert!(tb.is_balanced);
    }

    /// Reversing an entry restores the balances that existed before it.
    #[test]
    fn prop_reversal_restores_prior_balances(
        base in positive_amount(),
        amount in positive_amount(),
    ) {
        let tenant = TenantId::new();
        let agg = LedgerAggregator::new(ChartOfAccounts::new(), tenant, dec!(0.01));
        let before = vec![posted_pair(tenant, "2410", "3000", base)];
        let expected = agg.accumulate(&before).unwrap();

        let reversal = posted_pair(tenant, "2040", "6500", amount)
            .reverse(date(), "entered twice")
            .unwrap();
        let mut after = before.clone();
        after.push(reversal.original);
        after.push(reversal.reversing);

        prop_assert_eq!(agg.accumulate(&after).unwrap(), expected);
    }

    /// Rows are always in ascending lexicographic code order.
    #[test]
    fn prop_rows_sorted_by_code(
        postings in prop::collection::vec((account_code(), account_code(), positive_amount()), 1..20),
    ) {
        let tenant = TenantId::new();
        let entries: Vec<JournalEntry> = postings
            .iter()
            .map(|(d, c, amount)| posted_pair(tenant, d, c, *amount))
            .collect();
        let agg = LedgerAggregator::new(ChartOfAccounts::new(), tenant, dec!(0.01));
        let tb = agg.trial_balance(&agg.accumulate(&entries).unwrap());
        let codes: Vec<&str> = tb.rows.iter().map(|r| r.code.as_str()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        prop_assert_eq!(codes, sorted);
    }
}
