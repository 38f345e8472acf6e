//! Document validation before serialization.
//!
//! Every rule runs independently. A caller always receives the complete list
//! of violations so an operator can fix them in one pass.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use racun_shared::types::{DEFAULT_TOLERANCE, round_amount, within_tolerance};

use super::types::{DocumentLine, FinancialDocument, Party};
use crate::identifier::is_valid_pib;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    /// A mandatory field is empty.
    Required,
    /// A quantity is zero or negative.
    NotPositive,
    /// A field is present but syntactically invalid.
    InvalidFormat,
    /// Stored totals disagree with the amounts they summarize.
    TotalMismatch,
    /// The document has no lines.
    NoLines,
}

impl ValidationCode {
    /// Returns the machine-readable code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::NotPositive => "NOT_POSITIVE",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::TotalMismatch => "TOTAL_MISMATCH",
            Self::NoLines => "NO_LINES",
        }
    }
}

/// A single validation failure: field path plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Dotted/indexed path of the offending field, e.g. `lines[0].quantity`.
    pub field: String,
    /// Failure category.
    pub code: ValidationCode,
    /// Message suitable for display to an operator.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collects violations without stopping at the first one.
#[derive(Default)]
struct Violations(Vec<ValidationError>);

impl Violations {
    fn require(&mut self, field: &str, value: &str, label: &str) {
        if value.trim().is_empty() {
            self.0.push(ValidationError::new(
                field,
                ValidationCode::Required,
                format!("{label} is required"),
            ));
        }
    }

    fn push(&mut self, field: impl Into<String>, code: ValidationCode, message: impl Into<String>) {
        self.0.push(ValidationError::new(field, code, message));
    }
}

/// Validates a candidate document and returns every violation found.
///
/// An empty result means the document may be serialized and posted. The
/// input is never modified.
#[must_use]
pub fn validate_document(document: &FinancialDocument) -> Vec<ValidationError> {
    let mut v = Violations::default();

    v.require("number", &document.number, "Document number");
    if document.issue_date.is_none() {
        v.push("issue_date", ValidationCode::Required, "Issue date is required");
    }
    v.require("currency_code", &document.currency_code, "Currency code");

    check_party(&mut v, "supplier", &document.supplier, true);
    check_party(&mut v, "buyer", &document.buyer, false);

    if document.lines.is_empty() {
        v.push("lines", ValidationCode::NoLines, "At least one line is required");
    }
    for (index, line) in document.lines.iter().enumerate() {
        check_line(&mut v, index, line);
    }
    if !document.lines.is_empty() {
        check_header_sum(
            &mut v,
            "subtotal",
            document.subtotal,
            document.lines_subtotal(),
            "Subtotal",
            "line totals",
        );
        check_header_sum(
            &mut v,
            "tax_amount",
            document.tax_amount,
            document.lines_tax(),
            "Tax amount",
            "line tax amounts",
        );
    }

    let expected_total = document.subtotal + document.tax_amount;
    if !within_tolerance(document.total, expected_total, DEFAULT_TOLERANCE) {
        v.push(
            "total",
            ValidationCode::TotalMismatch,
            format!(
                "Total {} does not equal subtotal {} plus tax {}",
                document.total, document.subtotal, document.tax_amount
            ),
        );
    }

    v.0
}

/// Returns `Ok(())` if the document has no violations.
///
/// # Errors
///
/// Returns the full list of violations otherwise.
pub fn ensure_valid(document: &FinancialDocument) -> Result<(), Vec<ValidationError>> {
    let errors = validate_document(document);
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_header_sum(
    v: &mut Violations,
    field: &str,
    header: Decimal,
    lines_sum: Decimal,
    label: &str,
    summed: &str,
) {
    if !within_tolerance(header, lines_sum, DEFAULT_TOLERANCE) {
        v.push(
            field,
            ValidationCode::TotalMismatch,
            format!("{label} {header} does not equal the sum of {summed} ({lines_sum})"),
        );
    }
}

fn check_party(v: &mut Violations, prefix: &str, party: &Party, is_supplier: bool) {
    let role = if is_supplier { "Supplier" } else { "Buyer" };

    let tax_id_field = format!("{prefix}.tax_id");
    v.require(&tax_id_field, &party.tax_id, &format!("{role} tax ID"));
    if !party.tax_id.trim().is_empty() && !is_valid_pib(party.tax_id.trim()) {
        v.push(
            tax_id_field,
            ValidationCode::InvalidFormat,
            format!("{role} tax ID '{}' is not a valid PIB", party.tax_id),
        );
    }

    v.require(&format!("{prefix}.name"), &party.name, &format!("{role} name"));

    if is_supplier {
        v.require(&format!("{prefix}.address"), &party.address, "Supplier address");
        v.require(&format!("{prefix}.city"), &party.city, "Supplier city");
    }
}

fn check_line(v: &mut Violations, index: usize, line: &DocumentLine) {
    let prefix = format!("lines[{index}]");

    v.require(
        &format!("{prefix}.description"),
        &line.description,
        &format!("Line {} description", index + 1),
    );

    if line.quantity <= Decimal::ZERO {
        v.push(
            format!("{prefix}.quantity"),
            ValidationCode::NotPositive,
            format!("Line {} quantity must be greater than zero", index + 1),
        );
    } else {
        let expected = round_amount(line.quantity * line.unit_price);
        if !within_tolerance(line.line_total, expected, DEFAULT_TOLERANCE) {
            v.push(
                format!("{prefix}.line_total"),
                ValidationCode::TotalMismatch,
                format!(
                    "Line {} total {} does not equal quantity × unit price ({expected})",
                    index + 1,
                    line.line_total
                ),
            );
        }
    }
}
