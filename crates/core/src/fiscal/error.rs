//! Fiscal calendar error types.

use thiserror::Error;

/// Errors raised while configuring the fiscal calendar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FiscalError {
    /// The configured first day of the fiscal year is not a valid `MM-DD` day.
    #[error("Invalid first day of financial year: '{0}' (expected MM-DD)")]
    InvalidFiscalStart(String),
}

impl FiscalError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFiscalStart(_) => "INVALID_FISCAL_START",
        }
    }
}

impl From<FiscalError> for tallybook_shared::AppError {
    fn from(err: FiscalError) -> Self {
        Self::Configuration(err.to_string())
    }
}
