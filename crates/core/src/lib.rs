//! Core posting logic for Goldbook.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, posting rules, and calculations live here.
//!
//! # Modules
//!
//! - `events` - Typed business-event payloads (metal, entry, fixing, transfer)
//! - `posting` - Posting rules: event -> registry rows + balance deltas
//! - `registry` - Ledger row model and its one-sided invariant
//! - `balance` - Party balance projection (gold grams + per-currency cash)
//! - `voucher` - Voucher number rendering and configuration cache
//! - `currency` - Multi-currency conversion with banker's rounding
//! - `status` - Business-document status machine

pub mod balance;
pub mod currency;
pub mod events;
pub mod posting;
pub mod registry;
pub mod status;
pub mod voucher;
