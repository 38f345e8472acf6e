//! Translation of domain records into XML documents.
//!
//! - `tax_category` - Tax category code table with schema version cutover
//! - `einvoice` - UBL 2.1 / EN 16931 e-invoice mapper
//! - `payroll` - PPP-PD payroll tax declaration mapper
//!
//! Mappers assume their input already passed validation. A violated
//! precondition is reported as [`MappingError::Precondition`] and aborts the
//! mapping; it is a defect in the caller, not a data-quality warning.

pub mod einvoice;
pub mod payroll;
pub mod tax_category;

use thiserror::Error;

use crate::xml::{XmlBuilder, XmlError};

pub use einvoice::EInvoiceMapper;
pub use payroll::{EmployeeCheck, PayrollMapper, PayrollXml};
pub use tax_category::{SchemaVersion, TaxCategory, tax_category};

/// Errors raised while mapping a record to XML.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The builder rejected an operation.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// The input was never validated or violates a mapper precondition.
    #[error("Precondition violated for '{field}': {reason}")]
    Precondition {
        /// Offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl MappingError {
    pub(crate) fn precondition(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Precondition {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Xml(e) => e.error_code(),
            Self::Precondition { .. } => "MAPPING_PRECONDITION",
        }
    }
}

/// A format-specific translator from a domain record into builder calls.
pub trait DocumentMapper {
    /// The record this mapper serializes.
    type Document;

    /// Writes the complete document into `builder`.
    fn map_to_xml(&self, document: &Self::Document, builder: &mut XmlBuilder)
    -> Result<(), MappingError>;

    /// Maps `document` into a fresh builder and returns the finished XML.
    fn to_xml(&self, document: &Self::Document) -> Result<String, MappingError> {
        let mut builder = XmlBuilder::new();
        self.map_to_xml(document, &mut builder)?;
        Ok(builder.build()?)
    }
}

/// Fails with a precondition error if `value` is blank.
pub(crate) fn require(field: &str, value: &str) -> Result<(), MappingError> {
    if value.trim().is_empty() {
        Err(MappingError::precondition(field, "must not be empty"))
    } else {
        Ok(())
    }
}

/// ISO 8601 calendar date, as both schemas expect.
pub(crate) fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
