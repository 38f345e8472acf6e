//! Chart of accounts lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::balance::AccountType;
use super::error::LedgerError;

/// Name and type of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
}

/// Account code to name and type.
///
/// Codes missing from the explicit entries are classified by their first
/// digit (see [`AccountType::from_code_class`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartOfAccounts {
    entries: BTreeMap<String, ChartEntry>,
}

impl ChartOfAccounts {
    /// Creates an empty chart that relies on class fallback only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an explicit account.
    #[must_use]
    pub fn with_account(
        mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        self.insert(code, name, account_type);
        self
    }

    /// Adds or replaces an explicit account.
    pub fn insert(
        &mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) {
        self.entries.insert(
            code.into(),
            ChartEntry {
                name: name.into(),
                account_type,
            },
        );
    }

    /// Returns the explicit entry for `code`.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&ChartEntry> {
        self.entries.get(code)
    }

    /// Classifies `code`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnclassifiedAccount`] if the code is neither
    /// listed nor in a known class.
    pub fn classify(&self, code: &str) -> Result<AccountType, LedgerError> {
        self.get(code)
            .map(|entry| entry.account_type)
            .or_else(|| AccountType::from_code_class(code))
            .ok_or_else(|| LedgerError::UnclassifiedAccount(code.to_string()))
    }

    /// Number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no explicit entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
