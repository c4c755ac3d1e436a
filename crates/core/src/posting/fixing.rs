//! Posting rules for transaction fixings.
//!
//! A fixing locks the price of previously recorded unfixed metal. Each order
//! posts a party-side row and its house mirror, plus an `FX_EXCHANGE` row
//! when the order carries a forex result. One fixing-price record is
//! written per order.

use rust_decimal::Decimal;

use super::error::PostingError;
use super::plan::{FixingPriceDraft, PostingPlan};
use super::validation::validate_fixing;
use crate::balance::BalanceDelta;
use crate::events::{FixingEvent, FixingType};
use crate::registry::{LedgerType, RegistryDraftRow, Side};

/// Derives the posting plan for a fixing.
pub fn plan_fixing(event: &FixingEvent, voucher_number: &str) -> Result<PostingPlan, PostingError> {
    validate_fixing(event)?;

    // Fixing consumes unfixed gold whichever direction the trade ran, so
    // the party row always carries a gold debit. Only the cash side turns:
    // a purchase fix credits the party (we owe them the fixed value), a
    // sale fix debits them.
    let (party_type, house_type, cash_side) = match event.fixing_type {
        FixingType::Purchase => (
            LedgerType::PartyPurchaseFix,
            LedgerType::PurchaseFixing,
            Side::Credit,
        ),
        FixingType::Sale => (
            LedgerType::PartySaleFix,
            LedgerType::SalesFixing,
            Side::Debit,
        ),
    };
    let gold_side = Side::Debit;

    let mut plan = PostingPlan::default();
    let mut delta = BalanceDelta::default();

    for order in &event.orders {
        // Validation guarantees a weight is present.
        let pure_weight = order.effective_pure_weight().unwrap_or(Decimal::ZERO);
        let total_value = order.total_value_base();

        plan.push_row(
            RegistryDraftRow::new(
                party_type,
                format!("{:?} fixing {pure_weight}g", event.fixing_type),
                voucher_number,
                event.date,
            )
            .for_party(event.party_id)
            .with_value(total_value)
            .with_gold(gold_side, pure_weight)
            .with_cash(cash_side, total_value)
            .with_bid_value(order.bid_value)
            .with_currency(order.currency.clone(), order.currency_rate),
        );
        plan.push_row(
            RegistryDraftRow::new(
                house_type,
                format!("{:?} fixing {pure_weight}g", event.fixing_type),
                voucher_number,
                event.date,
            )
            .with_value(total_value)
            .with_gold(gold_side.flipped(), pure_weight)
            .with_cash(cash_side.flipped(), total_value)
            .with_bid_value(order.bid_value)
            .with_currency(order.currency.clone(), order.currency_rate),
        );

        if let Some(forex) = order.forex {
            let fx = forex.fx_for(event.fixing_type);
            if !fx.is_zero() {
                let (side, label) = if fx > Decimal::ZERO {
                    (Side::Credit, "Foreign Exchange Gain")
                } else {
                    (Side::Debit, "Foreign Exchange Loss")
                };
                let magnitude = fx.abs();
                plan.push_row(
                    RegistryDraftRow::new(
                        LedgerType::FxExchange,
                        label,
                        voucher_number,
                        event.date,
                    )
                    .with_value(magnitude)
                    .with_plain(side, magnitude)
                    .with_cash(side, magnitude)
                    .with_currency(order.currency.clone(), order.currency_rate),
                );
            }
        }

        plan.collateral.fixing_prices.push(FixingPriceDraft {
            metal_rate_id: order.metal_rate_id,
            bid_value: order.bid_value,
            one_gram_rate: order.one_gram_rate,
            pure_weight,
            currency: order.currency.clone(),
            currency_rate: order.currency_rate,
            price: order.price,
        });

        let cash_sign = match event.fixing_type {
            FixingType::Purchase => Decimal::ONE,
            FixingType::Sale => -Decimal::ONE,
        };
        delta.gold_delta -= pure_weight;
        delta.add_cash(order.currency.clone(), cash_sign * total_value);
    }

    plan.add_delta(event.party_id, &delta);
    Ok(plan.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{FixingOrder, ForexValue};
    use chrono::NaiveDate;
    use goldbook_shared::types::{CurrencyCode, PartyId};
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
    }

    fn aed() -> CurrencyCode {
        CurrencyCode::new("AED").unwrap()
    }

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    fn order(pure_weight: Decimal, price: Decimal, currency: CurrencyCode) -> FixingOrder {
        FixingOrder {
            pure_weight: Some(pure_weight),
            quantity_gm: None,
            gross_weight: None,
            one_gram_rate: dec!(250),
            bid_value: dec!(2500),
            price,
            currency,
            currency_rate: Decimal::ONE,
            metal_rate_id: None,
            forex: None,
        }
    }

    #[test]
    fn test_sale_fixing_rows_and_deltas() {
        let party = PartyId::new();
        let event = FixingEvent {
            fixing_type: FixingType::Sale,
            party_id: party,
            date: date(),
            orders: vec![order(dec!(60), dec!(800), aed())],
        };
        let plan = plan_fixing(&event, "SF0001").unwrap();

        let party_row = plan
            .rows
            .iter()
            .find(|r| r.ledger_type == LedgerType::PartySaleFix)
            .unwrap();
        assert_eq!(party_row.gold_debit(), dec!(60));
        assert_eq!(party_row.cash_debit(), dec!(800.0000));
        assert_eq!(party_row.party_id, Some(party));
        assert_eq!(party_row.gold_bid_value, Some(dec!(2500)));

        let house_row = plan
            .rows
            .iter()
            .find(|r| r.ledger_type == LedgerType::SalesFixing)
            .unwrap();
        assert_eq!(house_row.gold_credit(), dec!(60));
        assert_eq!(house_row.cash_credit(), dec!(800.0000));

        // The fixed weight leaves the party's unfixed gold.
        let delta = plan.delta_for(party);
        assert_eq!(delta.gold_delta, dec!(-60));
        assert_eq!(delta.cash_deltas[0].amount, dec!(-800.0000));

        assert_eq!(plan.collateral.fixing_prices.len(), 1);
        assert_eq!(plan.collateral.fixing_prices[0].pure_weight, dec!(60));
    }

    #[test]
    fn test_purchase_fixing_with_fx_gain() {
        let party = PartyId::new();
        let mut fix_order = order(dec!(10), dec!(100), usd());
        fix_order.currency_rate = dec!(1.02);
        fix_order.forex = Some(ForexValue {
            market_value: dec!(105),
            given_value: dec!(100),
        });
        let event = FixingEvent {
            fixing_type: FixingType::Purchase,
            party_id: party,
            date: date(),
            orders: vec![fix_order],
        };
        let plan = plan_fixing(&event, "PF0123").unwrap();

        let party_row = plan
            .rows
            .iter()
            .find(|r| r.ledger_type == LedgerType::PartyPurchaseFix)
            .unwrap();
        assert_eq!(party_row.gold_debit(), dec!(10));
        assert_eq!(party_row.cash_credit(), dec!(102.0000));

        let fx = plan
            .rows
            .iter()
            .find(|r| r.ledger_type == LedgerType::FxExchange)
            .unwrap();
        assert_eq!(fx.credit(), dec!(5));
        assert_eq!(fx.cash_credit(), dec!(5));
        assert!(fx.description.contains("Foreign Exchange Gain"));

        let delta = plan.delta_for(party);
        assert_eq!(delta.gold_delta, dec!(-10));
        assert_eq!(delta.cash_deltas[0].currency, usd());
        assert_eq!(delta.cash_deltas[0].amount, dec!(102.0000));
    }

    #[test]
    fn test_sale_fixing_fx_sign_is_flipped() {
        let party = PartyId::new();
        let mut fix_order = order(dec!(10), dec!(100), usd());
        fix_order.forex = Some(ForexValue {
            market_value: dec!(105),
            given_value: dec!(100),
        });
        let event = FixingEvent {
            fixing_type: FixingType::Sale,
            party_id: party,
            date: date(),
            orders: vec![fix_order],
        };
        let plan = plan_fixing(&event, "SF0002").unwrap();

        // market - given = 5, negated for SALE: a loss.
        let fx = plan
            .rows
            .iter()
            .find(|r| r.ledger_type == LedgerType::FxExchange)
            .unwrap();
        assert_eq!(fx.debit(), dec!(5));
        assert_eq!(fx.cash_debit(), dec!(5));
        assert!(fx.description.contains("Foreign Exchange Loss"));
    }

    #[test]
    fn test_multi_order_deltas_accumulate() {
        let party = PartyId::new();
        let event = FixingEvent {
            fixing_type: FixingType::Sale,
            party_id: party,
            date: date(),
            orders: vec![
                order(dec!(60), dec!(800), aed()),
                order(dec!(40), dec!(500), aed()),
            ],
        };
        let plan = plan_fixing(&event, "SF0003").unwrap();
        let delta = plan.delta_for(party);
        assert_eq!(delta.gold_delta, dec!(-100));
        assert_eq!(delta.cash_deltas.len(), 1);
        assert_eq!(delta.cash_deltas[0].amount, dec!(-1300.0000));
        assert_eq!(plan.collateral.fixing_prices.len(), 2);
    }
}
