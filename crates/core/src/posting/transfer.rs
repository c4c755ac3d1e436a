//! Posting rule for fund transfers.
//!
//! A transfer moves value between two parties on one asset axis: the sender
//! is debited, the receiver credited. Opening balances post the same way and
//! differ only in voucher numbering.

use super::error::PostingError;
use super::plan::PostingPlan;
use super::validation::validate_transfer;
use crate::balance::BalanceDelta;
use crate::events::{AssetType, FundTransferEvent};
use crate::registry::{LedgerType, RegistryDraftRow, Side};
use goldbook_shared::types::PartyId;
use rust_decimal::Decimal;

/// Derives the posting plan for a fund transfer.
pub fn plan_transfer(
    event: &FundTransferEvent,
    voucher_number: &str,
) -> Result<PostingPlan, PostingError> {
    validate_transfer(event)?;

    let mut plan = PostingPlan::default();
    plan.push_row(transfer_row(event, voucher_number, event.sending_party, Side::Debit));
    plan.push_row(transfer_row(
        event,
        voucher_number,
        event.receiving_party,
        Side::Credit,
    ));

    // Debiting the sender's party row shrinks what we owe them; the credit
    // grows the receiver's.
    let (sender_delta, receiver_delta) = match (event.asset_type, &event.currency) {
        (AssetType::Gold, _) => (
            BalanceDelta::gold(-event.value),
            BalanceDelta::gold(event.value),
        ),
        (AssetType::Cash, Some(currency)) => (
            BalanceDelta::cash(currency.clone(), -event.value),
            BalanceDelta::cash(currency.clone(), event.value),
        ),
        // Rejected by validation.
        (AssetType::Cash, None) => (BalanceDelta::default(), BalanceDelta::default()),
    };
    plan.add_delta(event.sending_party, &sender_delta);
    plan.add_delta(event.receiving_party, &receiver_delta);

    Ok(plan.finalize())
}

fn transfer_row(
    event: &FundTransferEvent,
    voucher_number: &str,
    party: PartyId,
    side: Side,
) -> RegistryDraftRow {
    let (ledger_type, description) = match event.asset_type {
        AssetType::Gold => (LedgerType::PartyGoldBalance, "Gold transfer"),
        AssetType::Cash => (LedgerType::PartyCashBalance, "Cash transfer"),
    };
    let mut row = RegistryDraftRow::new(ledger_type, description, voucher_number, event.date)
        .for_party(party)
        .with_value(event.value)
        .with_asset_type(event.asset_type);
    row = match event.asset_type {
        AssetType::Gold => row.with_gold(side, event.value),
        AssetType::Cash => {
            if let Some(currency) = &event.currency {
                row = row.with_currency(currency.clone(), Decimal::ONE);
            }
            row.with_cash(side, event.value)
        }
    };
    if let Some(cost_center) = &event.cost_center {
        row = row.with_cost_center(cost_center.clone());
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TransferType;
    use chrono::NaiveDate;
    use goldbook_shared::types::CurrencyCode;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
    }

    fn aed() -> CurrencyCode {
        CurrencyCode::new("AED").unwrap()
    }

    fn transfer(asset_type: AssetType, currency: Option<CurrencyCode>) -> FundTransferEvent {
        FundTransferEvent {
            transfer_type: TransferType::Transfer,
            asset_type,
            sending_party: PartyId::new(),
            receiving_party: PartyId::new(),
            value: dec!(100),
            currency,
            cost_center: Some("HQ".to_string()),
            date: date(),
        }
    }

    #[test]
    fn test_gold_transfer_moves_grams() {
        let event = transfer(AssetType::Gold, None);
        let plan = plan_transfer(&event, "TRF0001").unwrap();

        assert_eq!(plan.rows.len(), 2);
        let sender_row = plan
            .rows
            .iter()
            .find(|r| r.party_id == Some(event.sending_party))
            .unwrap();
        assert_eq!(sender_row.ledger_type, LedgerType::PartyGoldBalance);
        assert_eq!(sender_row.gold_debit(), dec!(100));
        assert_eq!(sender_row.cost_center.as_deref(), Some("HQ"));

        let receiver_row = plan
            .rows
            .iter()
            .find(|r| r.party_id == Some(event.receiving_party))
            .unwrap();
        assert_eq!(receiver_row.gold_credit(), dec!(100));

        assert_eq!(plan.delta_for(event.sending_party).gold_delta, dec!(-100));
        assert_eq!(plan.delta_for(event.receiving_party).gold_delta, dec!(100));
    }

    #[test]
    fn test_cash_transfer_moves_one_currency() {
        let event = transfer(AssetType::Cash, Some(aed()));
        let plan = plan_transfer(&event, "TRF0002").unwrap();

        let sender_delta = plan.delta_for(event.sending_party);
        assert_eq!(sender_delta.cash_deltas[0].currency, aed());
        assert_eq!(sender_delta.cash_deltas[0].amount, dec!(-100));
        let receiver_delta = plan.delta_for(event.receiving_party);
        assert_eq!(receiver_delta.cash_deltas[0].amount, dec!(100));

        for row in &plan.rows {
            assert_eq!(row.ledger_type, LedgerType::PartyCashBalance);
            assert_eq!(row.asset_type, Some(AssetType::Cash));
        }
    }

    #[test]
    fn test_transfer_is_balance_neutral_overall() {
        let event = transfer(AssetType::Gold, None);
        let plan = plan_transfer(&event, "TRF0003").unwrap();
        let total: Decimal = plan.deltas.iter().map(|d| d.delta.gold_delta).sum();
        assert_eq!(total, Decimal::ZERO);
    }
}
