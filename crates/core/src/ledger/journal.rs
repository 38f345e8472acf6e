//! Journal entry aggregate and its lifecycle.
//!
//! An entry is created as a draft, becomes immutable once posted, and is
//! undone only by a reversal that produces an equal-and-opposite entry.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use racun_shared::types::{JournalEntryId, TenantId};

use super::entry::JournalLine;
use super::error::LedgerError;
use super::validation::{EntryTotals, validate_balanced};

const REVERSAL_PREFIX: &str = "Reversal: ";

/// Journal entry status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being prepared and can be modified.
    Draft,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been reversed, or is itself a reversal (immutable).
    Reversed,
}

impl EntryStatus {
    /// Returns true if the entry may move to `next`.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Draft, Self::Posted) | (Self::Posted, Self::Reversed))
    }

    /// Returns true if the entry can be modified.
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry's lines count toward balances.
    #[must_use]
    pub fn participates_in_balances(self) -> bool {
        matches!(self, Self::Posted)
    }

    /// Returns the lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Reversed => "reversed",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dated, balanced group of journal lines owned by one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    #[serde(default)]
    pub id: JournalEntryId,
    /// Owning tenant.
    pub tenant: TenantId,
    /// Entry date.
    pub date: NaiveDate,
    /// Number of the business document this entry came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_ref: Option<String>,
    /// Current status.
    pub status: EntryStatus,
    /// Entry this one reverses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverses: Option<JournalEntryId>,
    /// Reason given for a reversal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Lines, in order.
    pub lines: Vec<JournalLine>,
}

/// The two entries produced by reversing a posted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reversal {
    /// The original entry, now in status reversed.
    pub original: JournalEntry,
    /// The equal-and-opposite entry.
    pub reversing: JournalEntry,
}

impl JournalEntry {
    /// Creates a draft entry.
    #[must_use]
    pub fn draft(
        tenant: TenantId,
        date: NaiveDate,
        document_ref: Option<String>,
        lines: Vec<JournalLine>,
    ) -> Self {
        Self {
            id: JournalEntryId::new(),
            tenant,
            date,
            document_ref,
            status: EntryStatus::Draft,
            reverses: None,
            reason: None,
            lines,
        }
    }

    /// Sums the lines.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        EntryTotals::from_lines(&self.lines)
    }

    /// Returns true if debits equal credits exactly.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.totals().is_balanced(Decimal::ZERO)
    }

    fn transition(mut self, next: EntryStatus) -> Result<Self, LedgerError> {
        if !self.status.can_transition_to(next) {
            return Err(LedgerError::InvalidStatusTransition {
                id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(self)
    }

    /// Posts a draft entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is not a draft, any line is malformed,
    /// or debits and credits differ at all.
    pub fn post(self) -> Result<Self, LedgerError> {
        if self.status.can_transition_to(EntryStatus::Posted) {
            validate_balanced(&self.lines, Decimal::ZERO)?;
        }
        self.transition(EntryStatus::Posted)
    }

    /// Reverses a posted entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidStatusTransition`] unless the entry is
    /// posted.
    pub fn reverse(self, date: NaiveDate, reason: impl Into<String>) -> Result<Reversal, LedgerError> {
        let original = self.transition(EntryStatus::Reversed)?;
        let reason = reason.into();
        let lines = original
            .lines
            .iter()
            .map(|line| {
                let mut swapped = line.swapped();
                swapped.description = format!("{REVERSAL_PREFIX}{}", line.description);
                swapped
            })
            .collect();
        let reversing = Self {
            id: JournalEntryId::new(),
            tenant: original.tenant,
            date,
            document_ref: original.document_ref.clone(),
            status: EntryStatus::Reversed,
            reverses: Some(original.id),
            reason: Some(reason),
            lines,
        };
        Ok(Reversal { original, reversing })
    }
}
