//! Payload validation, run before any plan is derived.
//!
//! Rules fail fast on the first violation; nothing is mutated until a
//! payload passes in full.

use rust_decimal::Decimal;

use super::error::PostingError;
use crate::events::{
    EntryEvent, EntryLines, FixingEvent, FundTransferEvent, MetalTransactionEvent,
};

/// Validates a metal purchase/sale payload.
pub fn validate_metal(event: &MetalTransactionEvent) -> Result<(), PostingError> {
    if event.stock_items.is_empty() {
        return Err(PostingError::EmptyLines {
            what: "stock items",
        });
    }
    if event.party_currency_rate <= Decimal::ZERO {
        return Err(PostingError::NonPositiveRate {
            field: "partyCurrencyRate",
            value: event.party_currency_rate,
        });
    }
    for item in &event.stock_items {
        require_positive("grossWeight", item.gross_weight)?;
        require_positive("purity", item.purity)?;
        require_positive("pureWeight", item.pure_weight)?;
        if item.metal_rate < Decimal::ZERO {
            return Err(PostingError::NonPositiveRate {
                field: "metalRate",
                value: item.metal_rate,
            });
        }
    }
    let line_total: Decimal = event
        .stock_items
        .iter()
        .map(|i| i.item_total.total_amount)
        .sum();
    if line_total != event.total_amount {
        return Err(PostingError::TotalMismatch {
            document: event.total_amount,
            lines: line_total,
        });
    }
    Ok(())
}

/// Validates a receipt/payment entry payload.
pub fn validate_entry(event: &EntryEvent) -> Result<(), PostingError> {
    if !event.shape_is_consistent() {
        return Err(PostingError::ShapeMismatch {
            kind: event.kind.voucher_module().as_str(),
        });
    }
    match &event.lines {
        EntryLines::Stock(lines) => {
            if lines.is_empty() {
                return Err(PostingError::EmptyLines {
                    what: "stock lines",
                });
            }
            for line in lines {
                require_positive("grossWeight", line.gross_weight)?;
                require_positive("purity", line.purity)?;
                require_positive("purityWeight", line.purity_weight)?;
            }
        }
        EntryLines::Cash(lines) => {
            if lines.is_empty() {
                return Err(PostingError::EmptyLines { what: "cash lines" });
            }
            for line in lines {
                require_positive("amount", line.amount)?;
            }
        }
    }
    Ok(())
}

/// Validates a fixing payload.
pub fn validate_fixing(event: &FixingEvent) -> Result<(), PostingError> {
    if event.orders.is_empty() {
        return Err(PostingError::EmptyLines { what: "orders" });
    }
    for order in &event.orders {
        let weight = order
            .effective_pure_weight()
            .ok_or(PostingError::MissingWeight)?;
        require_positive("pureWeight", weight)?;
        require_positive("price", order.price)?;
        if order.currency_rate <= Decimal::ZERO {
            return Err(PostingError::NonPositiveRate {
                field: "currencyRate",
                value: order.currency_rate,
            });
        }
        if order.one_gram_rate <= Decimal::ZERO {
            return Err(PostingError::NonPositiveRate {
                field: "oneGramRate",
                value: order.one_gram_rate,
            });
        }
    }
    Ok(())
}

/// Validates a fund transfer payload.
pub fn validate_transfer(event: &FundTransferEvent) -> Result<(), PostingError> {
    if event.sending_party == event.receiving_party {
        return Err(PostingError::SameParty);
    }
    require_positive("value", event.value)?;
    if matches!(event.asset_type, crate::events::AssetType::Cash) && event.currency.is_none() {
        return Err(PostingError::MissingCurrency);
    }
    Ok(())
}

fn require_positive(field: &'static str, value: Decimal) -> Result<(), PostingError> {
    if value <= Decimal::ZERO {
        return Err(PostingError::NonPositiveQuantity { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{
        AssetType, CashLine, EntryKind, FixingOrder, FixingType, ItemTotal, MetalTransactionType,
        StockItem, TransferType,
    };
    use chrono::NaiveDate;
    use goldbook_shared::types::{CashAccountId, CurrencyCode, PartyId};
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    fn aed() -> CurrencyCode {
        CurrencyCode::new("AED").unwrap()
    }

    fn metal_event() -> MetalTransactionEvent {
        MetalTransactionEvent {
            transaction_type: MetalTransactionType::Sale,
            party_id: PartyId::new(),
            voucher_date: date(),
            settlement_currency: aed(),
            party_currency_rate: Decimal::ONE,
            stock_items: vec![StockItem {
                stock_code: "TT995".to_string(),
                description: None,
                gross_weight: dec!(100.5),
                purity: dec!(0.995),
                pure_weight: dec!(100),
                metal_rate: dec!(10),
                item_total: ItemTotal {
                    metal_value: dec!(1000),
                    total_amount: dec!(1000),
                    ..ItemTotal::default()
                },
            }],
            total_amount: dec!(1000),
        }
    }

    #[test]
    fn test_metal_rejects_empty_items() {
        let mut event = metal_event();
        event.stock_items.clear();
        assert!(matches!(
            validate_metal(&event),
            Err(PostingError::EmptyLines { .. })
        ));
    }

    #[test]
    fn test_metal_rejects_total_mismatch() {
        let mut event = metal_event();
        event.total_amount = dec!(999);
        assert!(matches!(
            validate_metal(&event),
            Err(PostingError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn test_metal_rejects_negative_weight() {
        let mut event = metal_event();
        event.stock_items[0].pure_weight = dec!(-1);
        assert!(matches!(
            validate_metal(&event),
            Err(PostingError::NonPositiveQuantity { .. })
        ));
    }

    #[test]
    fn test_entry_rejects_shape_mismatch() {
        let event = EntryEvent {
            kind: EntryKind::MetalReceipt,
            party_id: PartyId::new(),
            date: date(),
            lines: EntryLines::Cash(vec![CashLine {
                currency: aed(),
                amount: dec!(200),
                cash_account_id: CashAccountId::new(),
                note: None,
            }]),
        };
        match validate_entry(&event) {
            Err(PostingError::ShapeMismatch { kind }) => assert_eq!(kind, "metal-receipt"),
            other => panic!("expected shape mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_fixing_requires_a_weight() {
        let event = FixingEvent {
            fixing_type: FixingType::Sale,
            party_id: PartyId::new(),
            date: date(),
            orders: vec![FixingOrder {
                pure_weight: None,
                quantity_gm: None,
                gross_weight: None,
                one_gram_rate: dec!(10),
                bid_value: dec!(2500),
                price: dec!(800),
                currency: aed(),
                currency_rate: Decimal::ONE,
                metal_rate_id: None,
                forex: None,
            }],
        };
        assert!(matches!(
            validate_fixing(&event),
            Err(PostingError::MissingWeight)
        ));
    }

    #[test]
    fn test_transfer_rejects_self_and_missing_currency() {
        let party = PartyId::new();
        let mut event = FundTransferEvent {
            transfer_type: TransferType::Transfer,
            asset_type: AssetType::Cash,
            sending_party: party,
            receiving_party: party,
            value: dec!(100),
            currency: Some(aed()),
            cost_center: None,
            date: date(),
        };
        assert!(matches!(
            validate_transfer(&event),
            Err(PostingError::SameParty)
        ));

        event.receiving_party = PartyId::new();
        event.currency = None;
        assert!(matches!(
            validate_transfer(&event),
            Err(PostingError::MissingCurrency)
        ));
    }
}
