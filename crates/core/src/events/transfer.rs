//! Fund transfer payloads: cash or gold moved between two accounts or
//! cost centers.

use chrono::NaiveDate;
use goldbook_shared::types::{CurrencyCode, PartyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::voucher::VoucherModule;

/// The ledger axis a transfer moves value on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Cash movement.
    Cash,
    /// Gold movement (grams).
    Gold,
}

/// Transfer type for voucher numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferType {
    /// Ordinary transfer between accounts.
    Transfer,
    /// Opening balance load.
    OpeningBalance,
}

impl TransferType {
    /// The voucher module this transfer type counts against.
    #[must_use]
    pub const fn voucher_module(self) -> VoucherModule {
        match self {
            Self::Transfer => VoucherModule::Transfer,
            Self::OpeningBalance => VoucherModule::OpeningBalance,
        }
    }
}

/// A fund transfer business event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundTransferEvent {
    /// Transfer type.
    pub transfer_type: TransferType,
    /// Asset axis moved.
    pub asset_type: AssetType,
    /// Party the value leaves.
    pub sending_party: PartyId,
    /// Party the value arrives at.
    pub receiving_party: PartyId,
    /// Unsigned value moved (grams for gold, cash otherwise).
    pub value: Decimal,
    /// Currency of a cash transfer; `None` for gold.
    #[serde(default)]
    pub currency: Option<CurrencyCode>,
    /// Cost center the transfer is tracked under.
    #[serde(default)]
    pub cost_center: Option<String>,
    /// Document date.
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voucher_module_mapping() {
        assert_eq!(
            TransferType::Transfer.voucher_module(),
            VoucherModule::Transfer
        );
        assert_eq!(
            TransferType::OpeningBalance.voucher_module(),
            VoucherModule::OpeningBalance
        );
    }
}
