//! Mapping of persistence-layer failures onto the application error surface.

use goldbook_shared::error::AppError;
use sea_orm::DbErr;

use crate::repositories::{
    CashAccountError, DocumentError, PartyError, RegistryError, VoucherRepoError,
};

/// Maps a raw database error.
///
/// Unique-index violations on allocated identifiers (voucher numbers, row
/// codes, transaction codes) are what a lost voucher race looks like, so
/// they map to the retryable conflict; any other unique violation is a
/// genuine duplicate.
pub(crate) fn map_db_err(err: DbErr) -> AppError {
    let message = err.to_string();
    if message.contains("duplicate key value violates unique constraint") {
        if message.contains("voucher_number")
            || message.contains("voucher_code")
            || message.contains("row_code")
            || message.contains("transaction_code")
        {
            AppError::ConcurrentModification(message)
        } else {
            AppError::Conflict(message)
        }
    } else {
        AppError::Database(message)
    }
}

impl From<PartyError> for AppError {
    fn from(err: PartyError) -> Self {
        match err {
            PartyError::NotFound(id) => Self::NotFound(format!("party {id}")),
            PartyError::InvalidCurrency(..) => Self::Internal(err.to_string()),
            PartyError::Database(db) => map_db_err(db),
        }
    }
}

impl From<VoucherRepoError> for AppError {
    fn from(err: VoucherRepoError) -> Self {
        match err {
            VoucherRepoError::ConfigNotFound(module) => {
                Self::VoucherConfigNotFound(module.to_string())
            }
            VoucherRepoError::InvalidConfig { .. } => Self::Internal(err.to_string()),
            VoucherRepoError::Database(db) => map_db_err(db),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Database(db) => map_db_err(db),
        }
    }
}

impl From<CashAccountError> for AppError {
    fn from(err: CashAccountError) -> Self {
        match err {
            CashAccountError::NotFound(id) => Self::NotFound(format!("cash account {id}")),
            CashAccountError::CurrencyMismatch { .. } => Self::Validation(err.to_string()),
            CashAccountError::Database(db) => map_db_err(db),
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::NotFound(id) => Self::NotFound(format!("document {id}")),
            DocumentError::Payload(inner) => Self::Internal(inner.to_string()),
            DocumentError::Database(db) => map_db_err(db),
        }
    }
}
