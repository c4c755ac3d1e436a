//! Party balance projection.
//!
//! A party holds one signed gold balance (grams) and a per-currency cash
//! vector. The projector applies signed deltas mechanically; sign rules and
//! row generation are the posting rules' concern.

mod projector;
mod types;

pub use projector::{apply_delta, AllowNegative, BalanceError, CreditPolicy};
pub use types::{BalanceDelta, CashDelta, CashEntry, PartyBalances};
