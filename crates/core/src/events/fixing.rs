//! Transaction fixing payloads: price locks on previously recorded
//! unfixed metal.

use chrono::NaiveDate;
use goldbook_shared::types::{CurrencyCode, PartyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency;
use crate::voucher::VoucherModule;

/// Fixing type: which side of the book the price lock applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FixingType {
    /// Fixing a purchase price.
    Purchase,
    /// Fixing a sale price.
    Sale,
}

impl FixingType {
    /// The voucher module this fixing type counts against.
    #[must_use]
    pub const fn voucher_module(self) -> VoucherModule {
        match self {
            Self::Purchase => VoucherModule::PurchaseFixing,
            Self::Sale => VoucherModule::SalesFixing,
        }
    }
}

/// Forex descriptor attached to a fixing order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForexValue {
    /// Market value of the currency leg at fixing time.
    pub market_value: Decimal,
    /// Value given to the party.
    pub given_value: Decimal,
}

impl ForexValue {
    /// Signed forex result: `market - given`, negated for SALE fixings.
    ///
    /// This is the source system's exact convention; it is never re-derived
    /// from rates.
    #[must_use]
    pub fn fx_for(&self, fixing_type: FixingType) -> Decimal {
        let fx = self.market_value - self.given_value;
        match fixing_type {
            FixingType::Purchase => fx,
            FixingType::Sale => -fx,
        }
    }
}

/// One order within a fixing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixingOrder {
    /// Pure weight being fixed, if supplied directly.
    #[serde(default)]
    pub pure_weight: Option<Decimal>,
    /// Quantity in grams, used when pure weight is absent.
    #[serde(default)]
    pub quantity_gm: Option<Decimal>,
    /// Gross weight, the last-resort weight source.
    #[serde(default)]
    pub gross_weight: Option<Decimal>,
    /// Fixed rate per gram.
    pub one_gram_rate: Decimal,
    /// Market bid value at the fixing moment.
    pub bid_value: Decimal,
    /// Order price in the selected currency.
    pub price: Decimal,
    /// Settlement currency selected for this order.
    pub currency: CurrencyCode,
    /// Rate from the selected currency to base currency.
    pub currency_rate: Decimal,
    /// Effective metal-rate master at the fixing moment.
    #[serde(default)]
    pub metal_rate_id: Option<Uuid>,
    /// Optional forex descriptor.
    #[serde(default)]
    pub forex: Option<ForexValue>,
}

impl FixingOrder {
    /// Resolves the effective pure weight with the source priority:
    /// `pure_weight` > `quantity_gm` > `gross_weight`.
    #[must_use]
    pub fn effective_pure_weight(&self) -> Option<Decimal> {
        self.pure_weight.or(self.quantity_gm).or(self.gross_weight)
    }

    /// Total order value in base currency: `price x currency_rate`.
    #[must_use]
    pub fn total_value_base(&self) -> Decimal {
        currency::convert(self.price, self.currency_rate)
    }
}

/// A price-lock business event on previously recorded unfixed metal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixingEvent {
    /// Fixing type.
    pub fixing_type: FixingType,
    /// Counterparty carrying the unfixed metal.
    pub party_id: PartyId,
    /// Document date.
    pub date: NaiveDate,
    /// Orders; must be non-empty.
    pub orders: Vec<FixingOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pure_weight_priority() {
        let mut order = FixingOrder {
            pure_weight: Some(dec!(10)),
            quantity_gm: Some(dec!(20)),
            gross_weight: Some(dec!(30)),
            one_gram_rate: dec!(250),
            bid_value: dec!(2500),
            price: dec!(2500),
            currency: CurrencyCode::new("AED").unwrap(),
            currency_rate: Decimal::ONE,
            metal_rate_id: None,
            forex: None,
        };
        assert_eq!(order.effective_pure_weight(), Some(dec!(10)));

        order.pure_weight = None;
        assert_eq!(order.effective_pure_weight(), Some(dec!(20)));

        order.quantity_gm = None;
        assert_eq!(order.effective_pure_weight(), Some(dec!(30)));

        order.gross_weight = None;
        assert_eq!(order.effective_pure_weight(), None);
    }

    #[test]
    fn test_total_value_converts_with_rate() {
        let order = FixingOrder {
            pure_weight: Some(dec!(10)),
            quantity_gm: None,
            gross_weight: None,
            one_gram_rate: dec!(10),
            bid_value: dec!(2500),
            price: dec!(100),
            currency: CurrencyCode::new("USD").unwrap(),
            currency_rate: dec!(1.02),
            metal_rate_id: None,
            forex: None,
        };
        assert_eq!(order.total_value_base(), dec!(102.0000));
    }

    #[test]
    fn test_fx_sign_convention() {
        let forex = ForexValue {
            market_value: dec!(105),
            given_value: dec!(100),
        };
        // Purchase: market - given
        assert_eq!(forex.fx_for(FixingType::Purchase), dec!(5));
        // Sale: sign flipped
        assert_eq!(forex.fx_for(FixingType::Sale), dec!(-5));
    }
}
