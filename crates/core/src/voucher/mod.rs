//! Voucher number rendering, module mapping, and configuration cache.
//!
//! The allocator itself lives in the persistence layer (it has to count
//! committed documents); everything deterministic about voucher identity is
//! here: module resolution, sequence math, number and date rendering, and the
//! TTL-bounded configuration cache.

mod cache;
mod format;
mod types;

pub use cache::VoucherConfigCache;
pub use format::{next_from_count, next_from_draft_codes, render_number};
pub use types::{
    DateFormat, SourceCollection, VoucherAllocation, VoucherConfig, VoucherError, VoucherModule,
};
