//! Application-wide error types.
//!
//! Library crates define their own error enums; binaries and embedding
//! applications fold them into [`AppError`].

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if retrying the operation cannot succeed without changed input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Validation(_) | Self::BusinessRule(_) | Self::Conflict(_)
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::BusinessRule(String::new()).error_code(),
            "BUSINESS_RULE_VIOLATION"
        );
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(
            AppError::Database(String::new()).error_code(),
            "DATABASE_ERROR"
        );
        assert_eq!(
            AppError::Configuration(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(AppError::Validation(String::new()).is_client_error());
        assert!(AppError::Conflict(String::new()).is_client_error());
        assert!(!AppError::Database(String::new()).is_client_error());
        assert!(!AppError::Configuration(String::new()).is_client_error());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("year 2031".into()).to_string(),
            "Not found: year 2031"
        );
        assert_eq!(
            AppError::BusinessRule("msg".into()).to_string(),
            "Business rule violation: msg"
        );
        assert_eq!(
            AppError::Configuration("msg".into()).to_string(),
            "Configuration error: msg"
        );
    }

    #[test]
    fn test_from_config_error() {
        let err: AppError = config::ConfigError::Message("bad".into()).into();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
