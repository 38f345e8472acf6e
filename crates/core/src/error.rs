//! Conversions from module errors into [`AppError`].

use racun_shared::AppError;

use crate::document::ValidationError;
use crate::ledger::LedgerError;
use crate::mapper::MappingError;
use crate::posting::PostingError;
use crate::reports::ReportError;
use crate::xml::XmlError;

/// Wraps a validator result into a single application error.
#[must_use]
pub fn validation_failure(errors: &[ValidationError]) -> AppError {
    AppError::Validation(errors.iter().map(ToString::to_string).collect())
}

impl From<XmlError> for AppError {
    fn from(err: XmlError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<MappingError> for AppError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::Xml(e) => e.into(),
            e @ MappingError::Precondition { .. } => Self::Precondition(e.to_string()),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        if err.is_imbalance() {
            Self::Imbalance(err.to_string())
        } else {
            Self::Precondition(err.to_string())
        }
    }
}

impl From<PostingError> for AppError {
    fn from(err: PostingError) -> Self {
        match err {
            e @ PostingError::Unbalanced { .. } => Self::Imbalance(e.to_string()),
            e @ PostingError::Precondition(_) => Self::Precondition(e.to_string()),
            PostingError::Ledger(e) => e.into(),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            e @ ReportError::InvalidDateRange { .. } => Self::Validation(vec![e.to_string()]),
            ReportError::Ledger(e) => e.into(),
        }
    }
}
