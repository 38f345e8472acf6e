//! Application-wide error types.
//!
//! Module errors in `racun-core` convert into [`AppError`] so callers (the
//! CLI, a service wrapper) can map every failure onto one taxonomy.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more fields failed validation. Each entry is a rendered
    /// `field: message` pair.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A caller handed the core data it should have validated first.
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// Debits and credits (or assets and liabilities plus equity) disagree.
    #[error("Imbalance detected: {0}")]
    Imbalance(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Precondition(_) => "PRECONDITION_VIOLATED",
            Self::Imbalance(_) => "IMBALANCE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Precondition(_) => 3,
            Self::Imbalance(_) => 4,
            Self::Configuration(_) => 78,
            Self::Io(_) => 74,
            Self::Internal(_) => 70,
        }
    }

    /// Returns true if the error is a data-quality problem the operator can
    /// fix, as opposed to a defect in the calling code.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Imbalance(_) | Self::Io(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(AppError::Validation(vec![]).exit_code(), 2);
        assert_eq!(AppError::Precondition(String::new()).exit_code(), 3);
        assert_eq!(AppError::Imbalance(String::new()).exit_code(), 4);
        assert_eq!(AppError::Configuration(String::new()).exit_code(), 78);
        assert_eq!(AppError::Io(String::new()).exit_code(), 74);
        assert_eq!(AppError::Internal(String::new()).exit_code(), 70);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(vec![]).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::Precondition(String::new()).error_code(),
            "PRECONDITION_VIOLATED"
        );
        assert_eq!(AppError::Imbalance(String::new()).error_code(), "IMBALANCE");
        assert_eq!(
            AppError::Configuration(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(AppError::Io(String::new()).error_code(), "IO_ERROR");
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation(vec!["number: required".into(), "lines: empty".into()])
                .to_string(),
            "Validation failed: number: required; lines: empty"
        );
        assert_eq!(
            AppError::Imbalance("debit 10 != credit 9".into()).to_string(),
            "Imbalance detected: debit 10 != credit 9"
        );
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(AppError::Validation(vec![]).is_recoverable());
        assert!(AppError::Imbalance(String::new()).is_recoverable());
        assert!(!AppError::Precondition(String::new()).is_recoverable());
        assert!(!AppError::Internal(String::new()).is_recoverable());
    }
}
