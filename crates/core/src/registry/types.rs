//! Registry row types and the one-sided ledger invariant.

use chrono::NaiveDate;
use goldbook_shared::types::{CurrencyCode, PartyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::AssetType;

/// Ledger type: classifies the posting purpose of a row, not the business
/// event that produced it. Wire names match the stored strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerType {
    /// Party-side mirror of a gold movement.
    #[serde(rename = "PARTY_GOLD_BALANCE")]
    PartyGoldBalance,
    /// House-side mirror of a gold movement.
    #[serde(rename = "GOLD")]
    Gold,
    /// Per-stock weight credits (receipts) and debits (payments).
    #[serde(rename = "STOCK_BALANCE")]
    StockBalance,
    /// Party-side cash movement.
    #[serde(rename = "PARTY_CASH_BALANCE")]
    PartyCashBalance,
    /// House-side cash mirror.
    #[serde(rename = "CASH")]
    Cash,
    /// Fixing-specific party posting, purchase side.
    #[serde(rename = "PARTY_PURCHASE_FIX")]
    PartyPurchaseFix,
    /// Fixing-specific party posting, sale side.
    #[serde(rename = "PARTY_SALE_FIX")]
    PartySaleFix,
    /// Fixing-specific house posting, purchase side.
    #[serde(rename = "purchase-fixing")]
    PurchaseFixing,
    /// Fixing-specific house posting, sale side.
    #[serde(rename = "sales-fixing")]
    SalesFixing,
    /// Forex gain or loss attached to a fixing order.
    #[serde(rename = "FX_EXCHANGE")]
    FxExchange,
    /// Analytic: metal value component of a metal transaction.
    #[serde(rename = "GOLD_STOCK")]
    GoldStock,
    /// Analytic: making charges component.
    #[serde(rename = "MAKING_CHARGES")]
    MakingCharges,
    /// Analytic: premium/discount component.
    #[serde(rename = "PREMIUM")]
    Premium,
    /// Analytic: other charges component.
    #[serde(rename = "OTHER_CHARGES")]
    OtherCharges,
    /// Analytic: VAT component.
    #[serde(rename = "VAT")]
    Vat,
}

impl LedgerType {
    /// True for the party-account row types. Party accounts read as
    /// liabilities: a credit grows what we owe the party.
    #[must_use]
    pub const fn is_party_account(self) -> bool {
        matches!(
            self,
            Self::PartyGoldBalance
                | Self::PartyCashBalance
                | Self::PartyPurchaseFix
                | Self::PartySaleFix
        )
    }
}

/// One side of a ledger axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

impl Side {
    /// The opposite side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Back-reference to the business entity a row was posted from.
///
/// Exactly one of the source kinds applies to a given row; retraction is
/// scoped by this reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum SourceRef {
    /// Row posted from a metal transaction.
    MetalTransaction(Uuid),
    /// Row posted from a transaction fixing.
    Fixing(Uuid),
    /// Row posted from a receipt/payment entry.
    Entry(Uuid),
    /// Row posted from a fund transfer.
    FundTransfer(Uuid),
}

impl SourceRef {
    /// The raw entity id behind the reference.
    #[must_use]
    pub const fn entity_id(self) -> Uuid {
        match self {
            Self::MetalTransaction(id)
            | Self::Fixing(id)
            | Self::Entry(id)
            | Self::FundTransfer(id) => id,
        }
    }
}

/// A registry row before persistence.
///
/// The debit/credit pairs of each axis are private; the `with_*` builders are
/// the only way to set them, so a row can never carry both sides of the same
/// axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDraftRow {
    /// Posting purpose of the row.
    pub ledger_type: LedgerType,
    /// Party the row is attributed to; house-side rows may omit it.
    pub party_id: Option<PartyId>,
    /// Human-readable description.
    pub description: String,
    /// Unsigned magnitude of the row's primary value.
    pub value: Decimal,
    gold_debit: Decimal,
    gold_credit: Decimal,
    cash_debit: Decimal,
    cash_credit: Decimal,
    debit: Decimal,
    credit: Decimal,
    /// Bid value at posting time, for fixing rows.
    pub gold_bid_value: Option<Decimal>,
    /// Gross weight carried for stock rows.
    pub gross_weight: Option<Decimal>,
    /// Asset axis, where a row is axis-specific (fund transfers).
    pub asset_type: Option<AssetType>,
    /// Currency of the cash amounts, if any.
    pub currency: Option<CurrencyCode>,
    /// Rate from `currency` to base currency.
    pub currency_rate: Option<Decimal>,
    /// Source voucher number, used for prefix-based grouping in reports.
    pub reference: String,
    /// Cost center tag (inventory, transfers).
    pub cost_center: Option<String>,
    /// Document date.
    pub transaction_date: NaiveDate,
}

impl RegistryDraftRow {
    /// Creates a row with all amounts zeroed.
    #[must_use]
    pub fn new(
        ledger_type: LedgerType,
        description: impl Into<String>,
        reference: impl Into<String>,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            ledger_type,
            party_id: None,
            description: description.into(),
            value: Decimal::ZERO,
            gold_debit: Decimal::ZERO,
            gold_credit: Decimal::ZERO,
            cash_debit: Decimal::ZERO,
            cash_credit: Decimal::ZERO,
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            gold_bid_value: None,
            gross_weight: None,
            asset_type: None,
            currency: None,
            currency_rate: None,
            reference: reference.into(),
            cost_center: None,
            transaction_date,
        }
    }

    /// Attributes the row to a party.
    #[must_use]
    pub fn for_party(mut self, party_id: PartyId) -> Self {
        self.party_id = Some(party_id);
        self
    }

    /// Sets the unsigned magnitude.
    #[must_use]
    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = value;
        self
    }

    /// Sets the gold axis on exactly one side.
    #[must_use]
    pub fn with_gold(mut self, side: Side, grams: Decimal) -> Self {
        match side {
            Side::Debit => {
                self.gold_debit = grams;
                self.gold_credit = Decimal::ZERO;
            }
            Side::Credit => {
                self.gold_credit = grams;
                self.gold_debit = Decimal::ZERO;
            }
        }
        self
    }

    /// Sets the cash axis on exactly one side.
    #[must_use]
    pub fn with_cash(mut self, side: Side, amount: Decimal) -> Self {
        match side {
            Side::Debit => {
                self.cash_debit = amount;
                self.cash_credit = Decimal::ZERO;
            }
            Side::Credit => {
                self.cash_credit = amount;
                self.cash_debit = Decimal::ZERO;
            }
        }
        self
    }

    /// Sets the plain debit/credit axis on exactly one side. Only specific
    /// ledger types (FX rows, transfers) use this axis.
    #[must_use]
    pub fn with_plain(mut self, side: Side, amount: Decimal) -> Self {
        match side {
            Side::Debit => {
                self.debit = amount;
                self.credit = Decimal::ZERO;
            }
            Side::Credit => {
                self.credit = amount;
                self.debit = Decimal::ZERO;
            }
        }
        self
    }

    /// Sets the currency and its rate to base.
    #[must_use]
    pub fn with_currency(mut self, currency: CurrencyCode, rate: Decimal) -> Self {
        self.currency = Some(currency);
        self.currency_rate = Some(rate);
        self
    }

    /// Sets the bid value.
    #[must_use]
    pub fn with_bid_value(mut self, bid: Decimal) -> Self {
        self.gold_bid_value = Some(bid);
        self
    }

    /// Sets the gross weight.
    #[must_use]
    pub fn with_gross_weight(mut self, grams: Decimal) -> Self {
        self.gross_weight = Some(grams);
        self
    }

    /// Sets the asset axis tag.
    #[must_use]
    pub fn with_asset_type(mut self, asset_type: AssetType) -> Self {
        self.asset_type = Some(asset_type);
        self
    }

    /// Sets the cost center tag.
    #[must_use]
    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = Some(cost_center.into());
        self
    }

    /// Gold debit amount.
    #[must_use]
    pub const fn gold_debit(&self) -> Decimal {
        self.gold_debit
    }

    /// Gold credit amount.
    #[must_use]
    pub const fn gold_credit(&self) -> Decimal {
        self.gold_credit
    }

    /// Cash debit amount.
    #[must_use]
    pub const fn cash_debit(&self) -> Decimal {
        self.cash_debit
    }

    /// Cash credit amount.
    #[must_use]
    pub const fn cash_credit(&self) -> Decimal {
        self.cash_credit
    }

    /// Plain debit amount.
    #[must_use]
    pub const fn debit(&self) -> Decimal {
        self.debit
    }

    /// Plain credit amount.
    #[must_use]
    pub const fn credit(&self) -> Decimal {
        self.credit
    }

    /// Signed gold movement of the row (debit minus credit).
    #[must_use]
    pub fn gold_net(&self) -> Decimal {
        self.gold_debit - self.gold_credit
    }

    /// Signed cash movement of the row (debit minus credit).
    #[must_use]
    pub fn cash_net(&self) -> Decimal {
        self.cash_debit - self.cash_credit
    }

    /// The row's signed contribution to the attributed party's gold
    /// balance. Party-account rows follow the liability convention
    /// (credit minus debit); all other rows read debit minus credit.
    #[must_use]
    pub fn party_gold_effect(&self) -> Decimal {
        if self.ledger_type.is_party_account() {
            self.gold_credit - self.gold_debit
        } else {
            self.gold_net()
        }
    }

    /// The row's signed contribution to the attributed party's cash
    /// balance, same convention as [`Self::party_gold_effect`].
    #[must_use]
    pub fn party_cash_effect(&self) -> Decimal {
        if self.ledger_type.is_party_account() {
            self.cash_credit - self.cash_debit
        } else {
            self.cash_net()
        }
    }

    /// Returns the row with every axis flipped to its opposite side.
    ///
    /// Used by reverse-and-reapply; magnitudes are preserved.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let mut row = self.clone();
        std::mem::swap(&mut row.gold_debit, &mut row.gold_credit);
        std::mem::swap(&mut row.cash_debit, &mut row.cash_credit);
        std::mem::swap(&mut row.debit, &mut row.credit);
        row
    }

    /// Checks the one-sided invariant on all three axes.
    #[must_use]
    pub fn is_one_sided(&self) -> bool {
        let split = |a: Decimal, b: Decimal| a > Decimal::ZERO && b > Decimal::ZERO;
        !split(self.gold_debit, self.gold_credit)
            && !split(self.cash_debit, self.cash_credit)
            && !split(self.debit, self.credit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    #[test]
    fn test_builders_keep_rows_one_sided() {
        let row = RegistryDraftRow::new(LedgerType::Gold, "gold leg", "SAL0007", date())
            .with_gold(Side::Debit, dec!(100))
            .with_gold(Side::Credit, dec!(40));
        // Last write wins; the other side is zeroed.
        assert_eq!(row.gold_credit(), dec!(40));
        assert_eq!(row.gold_debit(), Decimal::ZERO);
        assert!(row.is_one_sided());
    }

    #[test]
    fn test_inverted_swaps_all_axes() {
        let row = RegistryDraftRow::new(LedgerType::PartyPurchaseFix, "fix", "PF0123", date())
            .with_gold(Side::Debit, dec!(10))
            .with_cash(Side::Credit, dec!(102))
            .with_plain(Side::Credit, dec!(5));
        let inv = row.inverted();
        assert_eq!(inv.gold_credit(), dec!(10));
        assert_eq!(inv.cash_debit(), dec!(102));
        assert_eq!(inv.debit(), dec!(5));
        assert!(inv.is_one_sided());
        assert_eq!(inv.gold_net(), -row.gold_net());
        assert_eq!(inv.cash_net(), -row.cash_net());
    }

    #[test]
    fn test_source_ref_entity_id() {
        let id = Uuid::new_v4();
        assert_eq!(SourceRef::Fixing(id).entity_id(), id);
        assert_eq!(SourceRef::Entry(id).entity_id(), id);
    }

    #[test]
    fn test_ledger_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&LedgerType::PartyGoldBalance).unwrap(),
            "\"PARTY_GOLD_BALANCE\""
        );
        assert_eq!(
            serde_json::to_string(&LedgerType::SalesFixing).unwrap(),
            "\"sales-fixing\""
        );
        assert_eq!(serde_json::to_string(&LedgerType::Vat).unwrap(), "\"VAT\"");
    }
}
