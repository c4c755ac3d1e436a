//! Conversion between core enums and their stored wire strings.
//!
//! Enumerated columns hold the serde names of the core types; these two
//! helpers keep the mapping in one place instead of scattering `match`
//! blocks over the repositories.

use sea_orm::DbErr;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serializes a unit-variant enum to its wire string.
pub(crate) fn to_wire<T: Serialize>(value: &T) -> Result<String, DbErr> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => Ok(s),
        Ok(other) => Err(DbErr::Custom(format!(
            "expected a string-encoded enum, got {other}"
        ))),
        Err(err) => Err(DbErr::Custom(err.to_string())),
    }
}

/// Parses a stored wire string back into the core enum.
pub(crate) fn from_wire<T: DeserializeOwned>(s: &str) -> Result<T, DbErr> {
    serde_json::from_value(serde_json::Value::String(s.to_owned()))
        .map_err(|err| DbErr::Custom(format!("invalid stored enum value '{s}': {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldbook_core::events::{FixingType, MetalTransactionType, TransferType};
    use goldbook_core::registry::LedgerType;
    use goldbook_core::status::DocumentStatus;

    #[test]
    fn test_wire_strings_match_stored_values() {
        assert_eq!(to_wire(&LedgerType::PartyGoldBalance).unwrap(), "PARTY_GOLD_BALANCE");
        assert_eq!(to_wire(&LedgerType::SalesFixing).unwrap(), "sales-fixing");
        assert_eq!(to_wire(&MetalTransactionType::Sale).unwrap(), "sale");
        assert_eq!(to_wire(&FixingType::Purchase).unwrap(), "PURCHASE");
        assert_eq!(to_wire(&TransferType::OpeningBalance).unwrap(), "opening-balance");
        assert_eq!(to_wire(&DocumentStatus::Confirmed).unwrap(), "confirmed");
    }

    #[test]
    fn test_round_trip() {
        let status: DocumentStatus = from_wire("draft").unwrap();
        assert_eq!(status, DocumentStatus::Draft);
        let ledger: LedgerType = from_wire("FX_EXCHANGE").unwrap();
        assert_eq!(ledger, LedgerType::FxExchange);
        assert!(from_wire::<DocumentStatus>("posted").is_err());
    }
}
