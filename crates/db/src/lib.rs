//! Database layer with `SeaORM` entities, repositories, and the posting engine.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - The transactional posting engine that orchestrates business events

pub mod engine;
pub mod entities;
pub mod migration;
pub mod repositories;

mod wire;

pub use engine::{PostingEngine, PostingReceipt, VoucherPreview};
pub use repositories::{
    CashAccountRepository, EntryRepository, FixingPriceRepository, FixingRepository,
    FundTransferRepository, MetalTransactionRepository, PartyRepository, RegistryRepository,
    VoucherRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
