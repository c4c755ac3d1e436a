//! `SeaORM` entity definitions.
//!
//! Enumerated columns are stored as their wire strings (the serde names of
//! the core types) rather than native database enums; the core enums remain
//! the single source of truth for the value sets.

pub mod account_logs;
pub mod cash_accounts;
pub mod draftings;
pub mod entries;
pub mod fixing_prices;
pub mod fund_transfers;
pub mod metal_stocks;
pub mod metal_transactions;
pub mod parties;
pub mod party_cash_balances;
pub mod registry_rows;
pub mod transaction_fixings;
pub mod voucher_masters;
