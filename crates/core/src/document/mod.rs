//! Financial documents and their pre-serialization validation.
//!
//! - `types` - Document, party, and line records
//! - `validation` - Exhaustive rule checks returning every violation

pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use types::{DocumentLine, DocumentType, FinancialDocument, ItemType, Party, Polarity, TaxRate};
pub use validation::{ValidationCode, ValidationError, ensure_valid, validate_document};
