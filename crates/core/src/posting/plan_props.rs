//! Property tests over the posting rules.

use chrono::NaiveDate;
use goldbook_shared::types::{CurrencyCode, PartyId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::plan::PostingPlan;
use super::{plan_fixing, plan_metal};
use crate::events::{
    FixingEvent, FixingOrder, FixingType, ForexValue, ItemTotal, MetalTransactionEvent,
    MetalTransactionType, StockItem,
};

fn money() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn weight() -> impl Strategy<Value = Decimal> {
    (1i64..=5_000_000).prop_map(|n| Decimal::new(n, 3))
}

fn any_metal_type() -> impl Strategy<Value = MetalTransactionType> {
    prop_oneof![
        Just(MetalTransactionType::Purchase),
        Just(MetalTransactionType::Sale),
        Just(MetalTransactionType::PurchaseReturn),
        Just(MetalTransactionType::SaleReturn),
        Just(MetalTransactionType::ExportSale),
        Just(MetalTransactionType::ImportPurchase),
    ]
}

fn stock_item() -> impl Strategy<Value = StockItem> {
    (weight(), money(), money(), money()).prop_map(|(pure, metal_value, making, vat)| StockItem {
        stock_code: "TT995".to_string(),
        description: None,
        gross_weight: pure + Decimal::new(5, 1),
        purity: Decimal::new(995, 3),
        pure_weight: pure,
        metal_rate: Decimal::new(100, 1),
        item_total: ItemTotal {
            metal_value,
            making_charges: making,
            premium: Decimal::ZERO,
            other_charges: Decimal::ZERO,
            vat_amount: vat,
            total_amount: metal_value + making + vat,
        },
    })
}

fn metal_event() -> impl Strategy<Value = MetalTransactionEvent> {
    (any_metal_type(), prop::collection::vec(stock_item(), 1..4)).prop_map(|(tt, items)| {
        let total = items.iter().map(|i| i.item_total.total_amount).sum();
        MetalTransactionEvent {
            transaction_type: tt,
            party_id: PartyId::new(),
            voucher_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            settlement_currency: CurrencyCode::new("AED").unwrap(),
            party_currency_rate: Decimal::ONE,
            stock_items: items,
            total_amount: total,
        }
    })
}

fn fixing_order() -> impl Strategy<Value = FixingOrder> {
    (weight(), money(), prop::option::of((money(), money()))).prop_map(
        |(pure, price, forex)| FixingOrder {
            pure_weight: Some(pure),
            quantity_gm: None,
            gross_weight: None,
            one_gram_rate: Decimal::new(250, 0),
            bid_value: Decimal::new(2500, 0),
            price,
            currency: CurrencyCode::new("AED").unwrap(),
            currency_rate: Decimal::ONE,
            metal_rate_id: None,
            forex: forex.map(|(market, given)| ForexValue {
                market_value: market,
                given_value: given,
            }),
        },
    )
}

fn fixing_event() -> impl Strategy<Value = FixingEvent> {
    (
        prop_oneof![Just(FixingType::Purchase), Just(FixingType::Sale)],
        prop::collection::vec(fixing_order(), 1..4),
    )
        .prop_map(|(ft, orders)| FixingEvent {
            fixing_type: ft,
            party_id: PartyId::new(),
            date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            orders,
        })
}

/// Sum of party-facing row effects per party, compared against the plan's
/// declared deltas.
fn assert_rows_match_deltas(plan: &PostingPlan) {
    for party_delta in &plan.deltas {
        let gold: Decimal = plan
            .rows
            .iter()
            .filter(|r| r.party_id == Some(party_delta.party_id))
            .map(crate::registry::RegistryDraftRow::party_gold_effect)
            .sum();
        assert_eq!(gold, party_delta.delta.gold_delta);

        for cash_delta in &party_delta.delta.cash_deltas {
            let cash: Decimal = plan
                .rows
                .iter()
                .filter(|r| {
                    r.party_id == Some(party_delta.party_id)
                        && r.currency.as_ref() == Some(&cash_delta.currency)
                })
                .map(crate::registry::RegistryDraftRow::party_cash_effect)
                .sum();
            assert_eq!(cash, cash_delta.amount);
        }
    }
}

proptest! {
    #[test]
    fn prop_metal_rows_are_one_sided(event in metal_event()) {
        let plan = plan_metal(&event, "SAL0001").unwrap();
        prop_assert!(plan.rows.iter().all(crate::registry::RegistryDraftRow::is_one_sided));
    }

    #[test]
    fn prop_fixing_rows_are_one_sided(event in fixing_event()) {
        let plan = plan_fixing(&event, "PF0001").unwrap();
        prop_assert!(plan.rows.iter().all(crate::registry::RegistryDraftRow::is_one_sided));
    }

    #[test]
    fn prop_metal_inversion_is_involutive(event in metal_event()) {
        let plan = plan_metal(&event, "SAL0001").unwrap();
        prop_assert_eq!(plan.inverted().inverted(), plan);
    }

    #[test]
    fn prop_metal_delta_plus_inverse_is_empty(event in metal_event()) {
        let plan = plan_metal(&event, "SAL0001").unwrap();
        let undo = plan.inverted();
        for party_delta in &plan.deltas {
            let mut sum = party_delta.delta.clone();
            sum.merge(&undo.delta_for(party_delta.party_id));
            prop_assert!(sum.is_empty());
        }
    }

    #[test]
    fn prop_metal_rows_account_for_deltas(event in metal_event()) {
        let plan = plan_metal(&event, "SAL0001").unwrap();
        assert_rows_match_deltas(&plan);
    }

    #[test]
    fn prop_fixing_rows_account_for_deltas(event in fixing_event()) {
        let plan = plan_fixing(&event, "PF0001").unwrap();
        assert_rows_match_deltas(&plan);
    }

    #[test]
    fn prop_fixing_writes_one_price_per_order(event in fixing_event()) {
        let plan = plan_fixing(&event, "PF0001").unwrap();
        prop_assert_eq!(plan.collateral.fixing_prices.len(), event.orders.len());
    }
}
