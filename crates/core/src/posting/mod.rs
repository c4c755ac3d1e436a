//! Posting rules: the pure heart of the engine.
//!
//! Each supported business event maps to one rule that turns the payload
//! into a [`PostingPlan`]: ledger rows, per-party balance deltas, and
//! collateral writes (fixing prices, cash-account effects). Rules are pure
//! functions of the payload; they never touch storage, which is what makes
//! reverse-and-reapply possible: the original plan can always be re-derived
//! from the stored payload and inverted.

mod entry;
mod error;
mod fixing;
mod metal;
mod plan;
mod validation;

#[cfg(test)]
mod plan_props;

mod transfer;

pub use entry::plan_entry;
pub use error::PostingError;
pub use fixing::plan_fixing;
pub use metal::plan_metal;
pub use plan::{
    AccountAction, AccountLogType, CashAccountEffect, Collateral, FixingPriceDraft, PartyDelta,
    PostingPlan,
};
pub use transfer::plan_transfer;
pub use validation::{validate_entry, validate_fixing, validate_metal, validate_transfer};

use goldbook_shared::types::PartyId;
use serde::{Deserialize, Serialize};

use crate::events::{EntryEvent, FixingEvent, FundTransferEvent, MetalTransactionEvent};
use crate::voucher::VoucherModule;

/// A business event, tagged by kind.
///
/// This is also the shape persisted as the entity's payload; updates and
/// deletes re-derive the original plan from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "payload")]
pub enum BusinessEvent {
    /// Metal purchase/sale or a return thereof.
    Metal(MetalTransactionEvent),
    /// Receipt/payment entry.
    Entry(EntryEvent),
    /// Price lock on unfixed metal.
    Fixing(FixingEvent),
    /// Cash or gold moved between parties.
    Transfer(FundTransferEvent),
}

impl BusinessEvent {
    /// The primary party the event is recorded against. Transfers involve
    /// two parties; the sender is primary.
    #[must_use]
    pub const fn party_id(&self) -> PartyId {
        match self {
            Self::Metal(e) => e.party_id,
            Self::Entry(e) => e.party_id,
            Self::Fixing(e) => e.party_id,
            Self::Transfer(e) => e.sending_party,
        }
    }

    /// The voucher module the event's numbering counts against.
    #[must_use]
    pub const fn voucher_module(&self) -> VoucherModule {
        match self {
            Self::Metal(e) => e.transaction_type.voucher_module(),
            Self::Entry(e) => e.kind.voucher_module(),
            Self::Fixing(e) => e.fixing_type.voucher_module(),
            Self::Transfer(e) => e.transfer_type.voucher_module(),
        }
    }
}

/// Derives the posting plan for any business event.
pub fn plan_for(event: &BusinessEvent, voucher_number: &str) -> Result<PostingPlan, PostingError> {
    match event {
        BusinessEvent::Metal(e) => plan_metal(e, voucher_number),
        BusinessEvent::Entry(e) => plan_entry(e, voucher_number),
        BusinessEvent::Fixing(e) => plan_fixing(e, voucher_number),
        BusinessEvent::Transfer(e) => plan_transfer(e, voucher_number),
    }
}
