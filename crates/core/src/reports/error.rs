//! Report error types.

use tallybook_shared::{AppError, types::ObjectId};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Fiscal year not found.
    #[error("Year {0} not found")]
    YearNotFound(i32),

    /// Account not found.
    #[error("Account {0} does not exist")]
    AccountNotFound(i32),

    /// Cost object not found.
    #[error("Object {0} does not exist")]
    ObjectNotFound(ObjectId),

    /// Report kind string not recognised.
    #[error("Unknown report: {0}")]
    UnknownReportKind(String),

    /// The report needs a fiscal year.
    #[error("A year is required for this report")]
    MissingYear,

    /// The object report needs an object.
    #[error("An object is required for the object report")]
    MissingObject,
}

impl ReportError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::YearNotFound(_) => "YEAR_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ObjectNotFound(_) => "OBJECT_NOT_FOUND",
            Self::UnknownReportKind(_) => "UNKNOWN_REPORT_KIND",
            Self::MissingYear => "MISSING_YEAR",
            Self::MissingObject => "MISSING_OBJECT",
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        let message = err.to_string();
        match err {
            ReportError::YearNotFound(_)
            | ReportError::AccountNotFound(_)
            | ReportError::ObjectNotFound(_) => Self::NotFound(message),
            ReportError::UnknownReportKind(_)
            | ReportError::MissingYear
            | ReportError::MissingObject => Self::Validation(message),
        }
    }
}
