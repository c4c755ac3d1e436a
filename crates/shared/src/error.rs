//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every error carries a stable error code and an HTTP-like numeric hint so
/// that outer layers (which translate the programmatic surface 1:1) can map
/// failures deterministically.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error (missing field, invalid numeric, invalid enum).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced record not found (party, voucher config, currency, ...).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Voucher configuration missing for a module.
    #[error("Voucher configuration not found for module '{0}'")]
    VoucherConfigNotFound(String),

    /// Conflict (duplicate code, duplicate voucher number at insert).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Business state rule violation (already cancelled, wrong status).
    #[error("Invalid state: {0}")]
    State(String),

    /// Write conflict detected; the operation is retryable.
    #[error("Concurrent modification detected: {0}")]
    ConcurrentModification(String),

    /// Transaction exceeded its time budget and was aborted.
    #[error("Transaction timed out: {0}")]
    TransactionTimeout(String),

    /// Persistence-layer failure (transient).
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP-like status hint for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) | Self::VoucherConfigNotFound(_) => 404,
            Self::Conflict(_) | Self::ConcurrentModification(_) => 409,
            Self::State(_) => 422,
            Self::TransactionTimeout(_) => 504,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::VoucherConfigNotFound(_) => "VOUCHER_CONFIG_NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::State(_) => "INVALID_STATE",
            Self::ConcurrentModification(_) => "CONCURRENT_MODIFICATION",
            Self::TransactionTimeout(_) => "TRANSACTION_TIMEOUT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the operation may be retried as a whole.
    ///
    /// Only write conflicts are retryable; timeouts and validation failures
    /// must surface to the caller unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(
            AppError::VoucherConfigNotFound(String::new()).status_code(),
            404
        );
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::State(String::new()).status_code(), 422);
        assert_eq!(
            AppError::ConcurrentModification(String::new()).status_code(),
            409
        );
        assert_eq!(AppError::TransactionTimeout(String::new()).status_code(), 504);
        assert_eq!(AppError::Database(String::new()).status_code(), 500);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::VoucherConfigNotFound(String::new()).error_code(),
            "VOUCHER_CONFIG_NOT_FOUND"
        );
        assert_eq!(
            AppError::ConcurrentModification(String::new()).error_code(),
            "CONCURRENT_MODIFICATION"
        );
        assert_eq!(
            AppError::TransactionTimeout(String::new()).error_code(),
            "TRANSACTION_TIMEOUT"
        );
    }

    #[test]
    fn test_only_write_conflicts_are_retryable() {
        assert!(AppError::ConcurrentModification(String::new()).is_retryable());
        assert!(!AppError::Validation(String::new()).is_retryable());
        assert!(!AppError::TransactionTimeout(String::new()).is_retryable());
        assert!(!AppError::Conflict(String::new()).is_retryable());
        assert!(!AppError::Database(String::new()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::VoucherConfigNotFound("metal-sale".into()).to_string(),
            "Voucher configuration not found for module 'metal-sale'"
        );
        assert_eq!(
            AppError::Conflict("duplicate voucher number".into()).to_string(),
            "Conflict: duplicate voucher number"
        );
    }
}
