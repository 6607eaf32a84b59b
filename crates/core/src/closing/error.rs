//! Year-close error and warning types.

use std::fmt;

use serde::{Deserialize, Serialize};
use tallybook_shared::AppError;
use thiserror::Error;

/// Reasons a year cannot be closed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloseError {
    /// The year does not exist.
    #[error("Year {0} not found")]
    YearNotFound(i32),

    /// The year is already closed.
    #[error("Year {0} is already closed")]
    YearAlreadyClosed(i32),

    /// The result account does not exist.
    #[error("Result account {0} not found")]
    AccountNotFound(i32),

    /// The result account is not a balance-sheet account.
    #[error("Result account {0} is not a balance account")]
    ResultAccountNotInBalance(i32),

    /// The next year already has incoming balances.
    #[error("Year {0} already has incoming balances")]
    DuplicateIncomingBalance(i32),
}

impl CloseError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::YearNotFound(_) => "YEAR_NOT_FOUND",
            Self::YearAlreadyClosed(_) => "YEAR_ALREADY_CLOSED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ResultAccountNotInBalance(_) => "RESULT_ACCOUNT_NOT_IN_BALANCE",
            Self::DuplicateIncomingBalance(_) => "DUPLICATE_INCOMING_BALANCE",
        }
    }
}

impl From<CloseError> for AppError {
    fn from(err: CloseError) -> Self {
        match err {
            CloseError::YearNotFound(_) | CloseError::AccountNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            CloseError::YearAlreadyClosed(_) | CloseError::DuplicateIncomingBalance(_) => {
                Self::Conflict(err.to_string())
            }
            CloseError::ResultAccountNotInBalance(_) => Self::Validation(err.to_string()),
        }
    }
}

/// Advisory conditions that do not block a close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseWarning {
    /// The preceding year is still open.
    PriorYearOpen(i32),
    /// Open entries exist in the year and are not part of the balances.
    OpenEntriesExcluded(u64),
    /// The next year's existing incoming balances are being replaced.
    IncomingBalancesReplaced(i32),
}

impl fmt::Display for CloseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PriorYearOpen(year) => write!(
                f,
                "Year {year} is still open. The incoming balance may not reflect its final result"
            ),
            Self::OpenEntriesExcluded(count) => write!(
                f,
                "{count} open entries are not included in the closing balance"
            ),
            Self::IncomingBalancesReplaced(year) => {
                write!(f, "Existing incoming balances of {year} are replaced")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CloseError::YearNotFound(2024).error_code(), "YEAR_NOT_FOUND");
        assert_eq!(
            CloseError::DuplicateIncomingBalance(2025).error_code(),
            "DUPLICATE_INCOMING_BALANCE"
        );
    }

    #[test]
    fn test_app_error_mapping() {
        let app: AppError = CloseError::YearAlreadyClosed(2023).into();
        assert_eq!(app.error_code(), "CONFLICT");
        let app: AppError = CloseError::ResultAccountNotInBalance(4000).into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_warning_display() {
        assert_eq!(
            CloseWarning::OpenEntriesExcluded(3).to_string(),
            "3 open entries are not included in the closing balance"
        );
    }
}
