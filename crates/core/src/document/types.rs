//! Financial document domain types.
//!
//! These are the records the surrounding application loads from storage and
//! hands to the core. Amounts are supplied already rounded; the validator
//! checks the arithmetic invariants before anything is serialized or posted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Document type classification.
///
/// Determines the UBL document code and the debit/credit polarity used when
/// the document is posted to the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Regular commercial invoice.
    #[default]
    Regular,
    /// Credit note (reduces a previously issued invoice).
    CreditNote,
    /// Debit note.
    DebitNote,
    /// Advance-payment invoice.
    Advance,
}

/// Side on which a document's receivable is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Receivable debited; revenue and tax credited.
    Normal,
    /// Every side swapped relative to a regular invoice.
    Reversed,
}

impl DocumentType {
    /// Returns the string representation of the document type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::CreditNote => "credit_note",
            Self::DebitNote => "debit_note",
            Self::Advance => "advance",
        }
    }

    /// Returns the debit/credit polarity relative to a regular invoice.
    ///
    /// Credit and debit notes are both reversed: a debit note here is the
    /// correcting document received from the counterparty, so it reduces
    /// the receivable exactly like a credit note does.
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        match self {
            Self::Regular | Self::Advance => Polarity::Normal,
            Self::CreditNote | Self::DebitNote => Polarity::Reversed,
        }
    }

    /// Returns the UNTDID 1001 document type code.
    #[must_use]
    pub fn type_code(&self) -> &'static str {
        match self {
            Self::Regular => "380",
            Self::CreditNote => "381",
            Self::DebitNote => "383",
            Self::Advance => "386",
        }
    }

    /// Returns true if the document is serialized with a UBL `CreditNote`
    /// root instead of `Invoice`.
    #[must_use]
    pub fn is_credit_note(&self) -> bool {
        matches!(self, Self::CreditNote)
    }

    /// Returns true if the document corrects an earlier invoice.
    #[must_use]
    pub fn is_correction(&self) -> bool {
        matches!(self, Self::CreditNote | Self::DebitNote)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Item classification used to group revenue by account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Traded goods.
    Goods,
    /// Services. Default when a line carries no classification.
    #[default]
    Service,
    /// Own products.
    Product,
}

impl ItemType {
    /// Returns the string representation of the item type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goods => "goods",
            Self::Service => "service",
            Self::Product => "product",
        }
    }
}

/// VAT rate in the Serbian scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaxRate {
    /// 0 percent (zero-rated or exempt supplies).
    Zero,
    /// 10 percent reduced rate.
    Reduced,
    /// 20 percent standard rate.
    Standard,
}

impl TaxRate {
    /// Returns the rate as a whole percentage.
    #[must_use]
    pub fn percent(&self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::Reduced => 10,
            Self::Standard => 20,
        }
    }

    /// Returns the rate as a decimal percentage.
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.percent())
    }
}

impl TryFrom<u8> for TaxRate {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            10 => Ok(Self::Reduced),
            20 => Ok(Self::Standard),
            other => Err(format!("Unsupported tax rate: {other}%")),
        }
    }
}

impl From<TaxRate> for u8 {
    fn from(rate: TaxRate) -> Self {
        rate.percent()
    }
}

/// A party to a document (supplier or buyer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Tax identification number (PIB).
    #[serde(default)]
    pub tax_id: String,
    /// Legal name.
    #[serde(default)]
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2 country code. Defaults to `RS` when serialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Company registration number (matični broj).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    /// Bank account for payments to this party.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    /// Electronic contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

fn default_unit_code() -> String {
    "H87".to_string()
}

/// A single line of a financial document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLine {
    /// Line description.
    #[serde(default)]
    pub description: String,
    /// Quantity (must be positive).
    pub quantity: Decimal,
    /// UN/ECE recommendation 20 unit code.
    #[serde(default = "default_unit_code")]
    pub unit_code: String,
    /// Net unit price.
    pub unit_price: Decimal,
    /// Net line total (quantity × unit price, rounded).
    pub line_total: Decimal,
    /// VAT amount for this line.
    pub tax_amount: Decimal,
    /// VAT rate.
    pub tax_rate: TaxRate,
    /// Revenue classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
}

impl DocumentLine {
    /// Returns the item type, falling back to the default classification.
    #[must_use]
    pub fn classification(&self) -> ItemType {
        self.item_type.unwrap_or_default()
    }
}

/// An invoice-like financial document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialDocument {
    /// Document number (BT-1).
    #[serde(default)]
    pub number: String,
    /// Issue date (BT-2).
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    /// Payment due date (BT-9).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// ISO 4217 currency code (BT-5).
    #[serde(default)]
    pub currency_code: String,
    /// Document type.
    #[serde(default)]
    pub document_type: DocumentType,
    /// Whether VAT liability shifts to the buyer.
    #[serde(default)]
    pub reverse_charge: bool,
    /// VATEX exemption reason code for non-standard tax categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_exemption_reason_code: Option<String>,
    /// Free-text note (BT-22).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Number of the invoice a credit or debit note corrects (BT-25).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_reference: Option<String>,
    /// Supplier (BG-4).
    pub supplier: Party,
    /// Buyer (BG-7).
    pub buyer: Party,
    /// Document lines (BG-25), in order.
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
    /// Net total.
    pub subtotal: Decimal,
    /// VAT total.
    pub tax_amount: Decimal,
    /// Grand total (subtotal + VAT).
    pub total: Decimal,
}

impl FinancialDocument {
    /// Sums the net line totals.
    #[must_use]
    pub fn lines_subtotal(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_total).sum()
    }

    /// Sums the line VAT amounts.
    #[must_use]
    pub fn lines_tax(&self) -> Decimal {
        self.lines.iter().map(|l| l.tax_amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_polarity() {
        assert_eq!(DocumentType::Regular.polarity(), Polarity::Normal);
        assert_eq!(DocumentType::Advance.polarity(), Polarity::Normal);
        assert_eq!(DocumentType::CreditNote.polarity(), Polarity::Reversed);
        assert_eq!(DocumentType::DebitNote.polarity(), Polarity::Reversed);
    }

    #[test]
    fn test_document_type_codes() {
        assert_eq!(DocumentType::Regular.type_code(), "380");
        assert_eq!(DocumentType::CreditNote.type_code(), "381");
        assert_eq!(DocumentType::DebitNote.type_code(), "383");
        assert_eq!(DocumentType::Advance.type_code(), "386");
    }

    #[test]
    fn test_tax_rate_conversion() {
        assert_eq!(TaxRate::try_from(20).unwrap(), TaxRate::Standard);
        assert_eq!(TaxRate::try_from(10).unwrap(), TaxRate::Reduced);
        assert_eq!(TaxRate::try_from(0).unwrap(), TaxRate::Zero);
        assert!(TaxRate::try_from(18).is_err());
        assert_eq!(u8::from(TaxRate::Standard), 20);
    }

    #[test]
    fn test_deserialize_line_defaults() {
        let line: DocumentLine = serde_json::from_str(
            r#"{"description":"Consulting","quantity":"2","unit_price":"500",
                "line_total":"1000","tax_amount":"200","tax_rate":20}"#,
        )
        .unwrap();
        assert_eq!(line.unit_code, "H87");
        assert_eq!(line.tax_rate, TaxRate::Standard);
        assert_eq!(line.classification(), ItemType::Service);
    }

    #[test]
    fn test_deserialize_rejects_unknown_rate() {
        let result: Result<DocumentLine, _> = serde_json::from_str(
            r#"{"quantity":"1","unit_price":"1","line_total":"1","tax_amount":"0","tax_rate":18}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_document_type_serde() {
        let json = serde_json::to_string(&DocumentType::CreditNote).unwrap();
        assert_eq!(json, "\"credit_note\"");
        let parsed: DocumentType = serde_json::from_str("\"advance\"").unwrap();
        assert_eq!(parsed, DocumentType::Advance);
    }
}
