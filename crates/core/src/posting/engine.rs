//! Derives balanced journal lines from business documents.
//!
//! A regular invoice debits the receivable for the grand total and credits
//! one revenue account per item classification plus output VAT. Corrections
//! swap every side; advance invoices use the advance receivable account.

use rust_decimal::Decimal;
use tracing::debug;

use racun_shared::config::{AccountRef, PostingConfig};
use racun_shared::types::TenantId;

use super::error::PostingError;
use super::rules::PostingRules;
use crate::document::{FinancialDocument, ItemType, Polarity};
use crate::ledger::{EntryType, JournalEntry, JournalLine, LedgerError, validate_balanced};

/// Turns documents into journal lines using a fixed account table.
#[derive(Debug, Clone, Default)]
pub struct PostingEngine {
    rules: PostingRules,
}

impl PostingEngine {
    /// Creates an engine with the given rules.
    #[must_use]
    pub fn new(rules: PostingRules) -> Self {
        Self { rules }
    }

    /// Creates an engine from configuration.
    #[must_use]
    pub fn from_config(config: &PostingConfig) -> Self {
        Self::new(PostingRules::from_config(config))
    }

    /// The account table in use.
    #[must_use]
    pub fn rules(&self) -> &PostingRules {
        &self.rules
    }

    /// Derives the journal lines for `document`.
    ///
    /// Returns no lines when the grand total is zero or negative. Revenue
    /// lines follow the order in which each classification first appears.
    /// Zero VAT emits no tax line; a negative VAT total (a net tax
    /// correction) moves to the other side, like a negative revenue group.
    ///
    /// # Errors
    ///
    /// Returns [`PostingError::Unbalanced`] if the derived lines do not
    /// balance, which happens when the header total disagrees with the line
    /// totals plus VAT.
    pub fn derive_posting_lines(
        &self,
        document: &FinancialDocument,
    ) -> Result<Vec<JournalLine>, PostingError> {
        if document.total <= Decimal::ZERO {
            debug!(document = %document.number, total = %document.total, "nothing to post");
            return Ok(Vec::new());
        }

        let (receivable_side, income_side) = match document.document_type.polarity() {
            Polarity::Normal => (EntryType::Debit, EntryType::Credit),
            Polarity::Reversed => (EntryType::Credit, EntryType::Debit),
        };
        let number = document.number.as_str();
        let mut lines = Vec::new();

        let receivable = self.rules.receivable_for(document.document_type);
        lines.extend(signed_line(
            receivable_side,
            receivable,
            document.total,
            format!("{} {number}", document.document_type),
            number,
        ));

        for (item_type, amount) in revenue_groups(document) {
            lines.extend(signed_line(
                income_side,
                self.rules.revenue_for(item_type),
                amount,
                format!("Revenue ({}) {number}", item_type.as_str()),
                number,
            ));
        }

        lines.extend(signed_line(
            income_side,
            &self.rules.output_tax,
            document.tax_amount,
            format!("Output VAT {number}"),
            number,
        ));

        validate_balanced(&lines, Decimal::ZERO).map_err(|err| match err {
            LedgerError::UnbalancedEntry { debit, credit } => {
                PostingError::Unbalanced { debit, credit }
            }
            other => PostingError::Ledger(other),
        })?;

        debug!(
            document = %number,
            document_type = %document.document_type,
            lines = lines.len(),
            "posting derived"
        );
        Ok(lines)
    }

    /// Wraps the derived lines into a draft entry dated on the issue date.
    ///
    /// Returns `None` when there is nothing to post.
    ///
    /// # Errors
    ///
    /// Returns [`PostingError::Precondition`] if the document has no issue
    /// date, or any error from [`derive_posting_lines`](Self::derive_posting_lines).
    pub fn draft_entry(
        &self,
        tenant: TenantId,
        document: &FinancialDocument,
    ) -> Result<Option<JournalEntry>, PostingError> {
        let date = document
            .issue_date
            .ok_or_else(|| PostingError::Precondition("issue_date is missing".to_string()))?;
        let lines = self.derive_posting_lines(document)?;
        if lines.is_empty() {
            return Ok(None);
        }
        Ok(Some(JournalEntry::draft(
            tenant,
            date,
            Some(document.number.clone()),
            lines,
        )))
    }
}

/// Sums line totals per classification in first-appearance order.
fn revenue_groups(document: &FinancialDocument) -> Vec<(ItemType, Decimal)> {
    let mut groups: Vec<(ItemType, Decimal)> = Vec::new();
    for line in &document.lines {
        let item_type = line.classification();
        match groups.iter_mut().find(|(t, _)| *t == item_type) {
            Some((_, sum)) => *sum += line.line_total,
            None => groups.push((item_type, line.line_total)),
        }
    }
    groups
}

/// Builds a line on `side`, moving a negative amount to the other side and
/// dropping a zero amount.
fn signed_line(
    side: EntryType,
    account: &AccountRef,
    amount: Decimal,
    description: String,
    document_ref: &str,
) -> Option<JournalLine> {
    if amount.is_zero() {
        return None;
    }
    let (side, amount) = if amount < Decimal::ZERO {
        (side.opposite(), -amount)
    } else {
        (side, amount)
    };
    Some(
        JournalLine::new(side, &account.code, &account.name, amount, description)
            .with_document_ref(document_ref),
    )
}
