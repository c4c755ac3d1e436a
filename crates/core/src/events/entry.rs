//! Receipt/payment entry payloads.
//!
//! An entry carries either stock lines (metal kind) or cash lines (cash
//! kind), never both; the `EntryLines` variant makes the illegal shape
//! unrepresentable.

use chrono::NaiveDate;
use goldbook_shared::types::{CashAccountId, CurrencyCode, PartyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::voucher::VoucherModule;

/// Entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    /// Metal received from a party.
    MetalReceipt,
    /// Metal paid out to a party.
    MetalPayment,
    /// Cash received from a party.
    CashReceipt,
    /// Cash paid out to a party.
    CashPayment,
    /// Foreign-currency cash received from a party.
    CurrencyReceipt,
}

impl EntryKind {
    /// Returns true for the metal-side kinds.
    #[must_use]
    pub const fn is_metal(self) -> bool {
        matches!(self, Self::MetalReceipt | Self::MetalPayment)
    }

    /// Returns true for receipts (stock or cash flowing towards us).
    #[must_use]
    pub const fn is_receipt(self) -> bool {
        matches!(
            self,
            Self::MetalReceipt | Self::CashReceipt | Self::CurrencyReceipt
        )
    }

    /// The voucher module this entry kind counts against.
    #[must_use]
    pub const fn voucher_module(self) -> VoucherModule {
        match self {
            Self::MetalReceipt => VoucherModule::MetalReceipt,
            Self::MetalPayment => VoucherModule::MetalPayment,
            Self::CashReceipt | Self::CashPayment => VoucherModule::Entry,
            Self::CurrencyReceipt => VoucherModule::CurrencyReceipt,
        }
    }
}

/// One metal line in a metal receipt/payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLine {
    /// Inventory stock code.
    pub stock_code: String,
    /// Gross weight in grams.
    pub gross_weight: Decimal,
    /// Purity fraction.
    pub purity: Decimal,
    /// Pure weight in grams.
    pub purity_weight: Decimal,
}

/// One cash line in a cash receipt/payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashLine {
    /// Currency of the amount.
    pub currency: CurrencyCode,
    /// Unsigned amount; direction comes from the entry kind.
    pub amount: Decimal,
    /// The bank/cash account master receiving or paying the cash.
    pub cash_account_id: CashAccountId,
    /// Free-text note carried to the account log.
    #[serde(default)]
    pub note: Option<String>,
}

/// The lines of an entry: stock or cash, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryLines {
    /// Metal lines.
    Stock(Vec<StockLine>),
    /// Cash lines.
    Cash(Vec<CashLine>),
}

/// A receipt/payment business event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEvent {
    /// Entry kind.
    pub kind: EntryKind,
    /// Counterparty.
    pub party_id: PartyId,
    /// Document date.
    pub date: NaiveDate,
    /// Stock or cash lines.
    pub lines: EntryLines,
}

impl EntryEvent {
    /// Returns true if the kind and the line shape agree.
    #[must_use]
    pub const fn shape_is_consistent(&self) -> bool {
        matches!(
            (&self.lines, self.kind.is_metal()),
            (EntryLines::Stock(_), true) | (EntryLines::Cash(_), false)
        )
    }
}
