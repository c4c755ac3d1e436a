//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the posting engine. All methods
//! are generic over [`sea_orm::ConnectionTrait`] so a whole posting composes
//! inside one database transaction.

pub mod cash_account;
pub mod documents;
pub mod fixing_price;
pub mod party;
pub mod registry;
pub mod voucher;

pub use cash_account::{CashAccountError, CashAccountRepository};
pub use documents::{
    DocumentError, EntryRepository, FixingRepository, FundTransferRepository,
    MetalTransactionRepository,
};
pub use fixing_price::FixingPriceRepository;
pub use party::{PartyError, PartyRepository};
pub use registry::{RegistryError, RegistryRepository};
pub use voucher::{VoucherRepoError, VoucherRepository};
