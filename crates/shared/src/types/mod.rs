//! Common types used across the application.

pub mod id;
pub mod money;
pub mod weight;

pub use id::*;
pub use money::{CashAmount, CurrencyCode};
pub use weight::pure_weight;
