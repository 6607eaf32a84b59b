//! Ledger error types for validation and state errors.
//!
//! Validation errors are raised before anything is written and are fully
//! recoverable: the caller corrects the entry and submits it again.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook_shared::{AppError, types::JournalEntryId};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// The entry has no lines at all.
    #[error("Cannot save an entry with no items")]
    EmptyEntry,

    /// A line that is kept has a zero amount.
    #[error("Item {line} has a zero amount")]
    ZeroAmountLine {
        /// 1-based line number.
        line: usize,
    },

    /// The lines do not sum to zero.
    #[error("Journal entry does not balance, sum is {0}")]
    UnbalancedEntry(Decimal),

    /// Every line is marked for deletion.
    #[error("Journal entry must have at least one item")]
    NoEffectiveLines,

    /// The account requires a cost object and none was given.
    #[error("Account {0} requires an object")]
    MissingObject(i32),

    /// The account forbids cost objects and one was given.
    #[error("Account {0} does not allow objects")]
    ObjectNotAllowed(i32),

    /// Both debit and credit were given on one line.
    #[error("Item {line}: can't specify both debit and credit")]
    BothDebitAndCredit {
        /// 1-based line number.
        line: usize,
    },

    /// Neither debit nor credit was given on one line.
    #[error("Item {line}: must specify either debit or credit")]
    NeitherDebitNorCredit {
        /// 1-based line number.
        line: usize,
    },

    /// A debit or credit column holds a negative value.
    #[error("Item {line}: debit and credit must be positive")]
    NegativeAmount {
        /// 1-based line number.
        line: usize,
    },

    /// An amount has more than two decimals.
    #[error("Amount {0} is not rounded to two decimals")]
    ExcessivePrecision(Decimal),

    // ========== Reference Errors ==========
    /// Account number does not exist.
    #[error("Account {0} does not exist")]
    AccountNotFound(i32),

    /// Cost object does not exist.
    #[error("Object {0} does not exist")]
    ObjectNotFound(String),

    /// Fiscal year does not exist.
    #[error("Year {0} not found")]
    YearNotFound(i32),

    /// Journal entry does not exist.
    #[error("Journal entry {0} not found")]
    EntryNotFound(JournalEntryId),

    // ========== State Errors ==========
    /// The fiscal year is closed for new entries.
    #[error("Year {0} is not open for new entries")]
    YearClosed(i32),

    /// The entry is closed and can no longer be changed.
    #[error("Journal entry {0} is closed")]
    EntryClosed(JournalEntryId),

    /// The entry date is outside its fiscal year.
    #[error("Date {date} is outside financial year {year}")]
    DateOutsideYear {
        /// Offending date.
        date: NaiveDate,
        /// Fiscal year of the entry.
        year: i32,
    },
}

impl LedgerError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyEntry => "EMPTY_ENTRY",
            Self::ZeroAmountLine { .. } => "ZERO_AMOUNT_LINE",
            Self::UnbalancedEntry(_) => "UNBALANCED_ENTRY",
            Self::NoEffectiveLines => "NO_EFFECTIVE_LINES",
            Self::MissingObject(_) => "MISSING_OBJECT",
            Self::ObjectNotAllowed(_) => "OBJECT_NOT_ALLOWED",
            Self::BothDebitAndCredit { .. } => "BOTH_DEBIT_AND_CREDIT",
            Self::NeitherDebitNorCredit { .. } => "NEITHER_DEBIT_NOR_CREDIT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::ExcessivePrecision(_) => "EXCESSIVE_PRECISION",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ObjectNotFound(_) => "OBJECT_NOT_FOUND",
            Self::YearNotFound(_) => "YEAR_NOT_FOUND",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::YearClosed(_) => "YEAR_CLOSED",
            Self::EntryClosed(_) => "ENTRY_CLOSED",
            Self::DateOutsideYear { .. } => "DATE_OUTSIDE_YEAR",
        }
    }

    /// Returns true for errors raised by the entry validator.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyEntry
                | Self::ZeroAmountLine { .. }
                | Self::UnbalancedEntry(_)
                | Self::NoEffectiveLines
                | Self::MissingObject(_)
                | Self::ObjectNotAllowed(_)
                | Self::BothDebitAndCredit { .. }
                | Self::NeitherDebitNorCredit { .. }
                | Self::NegativeAmount { .. }
                | Self::ExcessivePrecision(_)
        )
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::AccountNotFound(_)
            | LedgerError::ObjectNotFound(_)
            | LedgerError::YearNotFound(_)
            | LedgerError::EntryNotFound(_) => Self::NotFound(message),
            LedgerError::YearClosed(_)
            | LedgerError::EntryClosed(_)
            | LedgerError::DateOutsideYear { .. } => Self::BusinessRule(message),
            _ => Self::Validation(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::EmptyEntry.error_code(), "EMPTY_ENTRY");
        assert_eq!(
            LedgerError::UnbalancedEntry(dec!(50.00)).error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(LedgerError::MissingObject(5000).error_code(), "MISSING_OBJECT");
        assert_eq!(LedgerError::YearClosed(2023).error_code(), "YEAR_CLOSED");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            LedgerError::UnbalancedEntry(dec!(50.00)).to_string(),
            "Journal entry does not balance, sum is 50.00"
        );
        assert_eq!(
            LedgerError::DateOutsideYear {
                date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                year: 2024,
            }
            .to_string(),
            "Date 2025-01-02 is outside financial year 2024"
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(LedgerError::NoEffectiveLines.is_validation());
        assert!(LedgerError::BothDebitAndCredit { line: 1 }.is_validation());
        assert!(!LedgerError::AccountNotFound(1000).is_validation());
        assert!(!LedgerError::EntryClosed(JournalEntryId::new()).is_validation());
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = LedgerError::YearNotFound(2031).into();
        assert_eq!(app.error_code(), "NOT_FOUND");
        let app: AppError = LedgerError::YearClosed(2023).into();
        assert_eq!(app.error_code(), "BUSINESS_RULE_VIOLATION");
        let app: AppError = LedgerError::EmptyEntry.into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }
}
