//! XML builder error types.

use thiserror::Error;

/// Errors raised while assembling an XML document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// A close was requested while no element is open.
    #[error("Cannot close </{0}>: no element is open")]
    NothingToClose(String),

    /// The element being closed is not the innermost open element.
    #[error("Mismatched close tag: expected </{expected}>, found </{found}>")]
    MismatchedClose {
        /// Innermost open element.
        expected: String,
        /// Element the caller tried to close.
        found: String,
    },

    /// `build` was called with elements still open.
    #[error("Unclosed elements: {}", .0.join(", "))]
    UnclosedElements(Vec<String>),

    /// An element or attribute name is empty or contains markup characters.
    #[error("Invalid XML name: '{0}'")]
    InvalidName(String),
}

impl XmlError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NothingToClose(_) => "XML_NOTHING_TO_CLOSE",
            Self::MismatchedClose { .. } => "XML_MISMATCHED_CLOSE",
            Self::UnclosedElements(_) => "XML_UNCLOSED_ELEMENTS",
            Self::InvalidName(_) => "XML_INVALID_NAME",
        }
    }
}
