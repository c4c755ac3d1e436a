//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `PartyId` where a
//! `CashAccountId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(PartyId, "Unique identifier for a counterparty account.");
typed_id!(CashAccountId, "Unique identifier for a bank/cash account master.");
typed_id!(VoucherConfigId, "Unique identifier for a voucher configuration.");
typed_id!(MetalTransactionId, "Unique identifier for a metal transaction.");
typed_id!(EntryId, "Unique identifier for a receipt/payment entry.");
typed_id!(FixingId, "Unique identifier for a transaction fixing.");
typed_id!(FundTransferId, "Unique identifier for a fund transfer.");
typed_id!(RegistryRowId, "Unique identifier for a registry ledger row.");
typed_id!(ActorId, "Unique identifier for the authenticated actor.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_ids_are_distinct_types() {
        let party = PartyId::new();
        let account = CashAccountId::from_uuid(party.into_inner());
        // Same underlying bytes, distinct types; only the Uuid compares equal.
        assert_eq!(party.into_inner(), account.into_inner());
    }

    #[test]
    fn test_id_round_trips_through_string() {
        let id = FixingId::new();
        let parsed = FixingId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(PartyId::new(), PartyId::new());
    }
}
