//! Posting rule for metal purchases, sales, and their returns.
//!
//! Purchases bring stock in (stock credit, house gold debit); sales mirror
//! them. Returns are a full sign-flip of the base flow across every row and
//! delta. The cash side is carried entirely by the analytic decomposition
//! rows, which sum to the document total in the settlement currency.

use rust_decimal::Decimal;

use super::error::PostingError;
use super::plan::PostingPlan;
use super::validation::validate_metal;
use crate::balance::BalanceDelta;
use crate::events::{MetalFlow, MetalTransactionEvent, StockItem};
use crate::registry::{LedgerType, RegistryDraftRow, Side};

/// Derives the posting plan for a metal transaction.
pub fn plan_metal(
    event: &MetalTransactionEvent,
    voucher_number: &str,
) -> Result<PostingPlan, PostingError> {
    validate_metal(event)?;

    let (flow, is_return) = event.transaction_type.flow();
    // Purchase: stock flows in (credit), cash owed to party (debit side of
    // the expense rows). Sale mirrors. Returns flip whichever base applies.
    let (mut stock_side, mut cash_side) = match flow {
        MetalFlow::Purchase => (Side::Credit, Side::Debit),
        MetalFlow::Sale => (Side::Debit, Side::Credit),
    };
    if is_return {
        stock_side = stock_side.flipped();
        cash_side = cash_side.flipped();
    }

    let mut plan = PostingPlan::default();

    for item in &event.stock_items {
        plan.push_row(
            RegistryDraftRow::new(
                LedgerType::StockBalance,
                format!("Stock movement {}", item.stock_code),
                voucher_number,
                event.voucher_date,
            )
            .for_party(event.party_id)
            .with_value(item.pure_weight)
            .with_gold(stock_side, item.pure_weight)
            .with_gross_weight(item.gross_weight),
        );
        plan.push_row(
            RegistryDraftRow::new(
                LedgerType::Gold,
                format!("Gold {}", item.stock_code),
                voucher_number,
                event.voucher_date,
            )
            .with_value(item.pure_weight)
            .with_gold(stock_side.flipped(), item.pure_weight),
        );
        for (ledger_type, amount) in analytic_components(item) {
            if amount.is_zero() {
                continue;
            }
            plan.push_row(
                RegistryDraftRow::new(
                    ledger_type,
                    format!("{} {}", component_label(ledger_type), item.stock_code),
                    voucher_number,
                    event.voucher_date,
                )
                .for_party(event.party_id)
                .with_value(amount)
                .with_cash(cash_side, amount)
                .with_currency(
                    event.settlement_currency.clone(),
                    event.party_currency_rate,
                ),
            );
        }
    }

    // Purchase: we take the metal (party gold down) and owe the party cash.
    // Sale and returns follow by sign.
    let direction = match (flow, is_return) {
        (MetalFlow::Purchase, false) | (MetalFlow::Sale, true) => -Decimal::ONE,
        (MetalFlow::Sale, false) | (MetalFlow::Purchase, true) => Decimal::ONE,
    };
    let mut delta = BalanceDelta::gold(direction * event.total_pure_weight());
    delta.add_cash(
        event.settlement_currency.clone(),
        -direction * event.total_amount,
    );
    plan.add_delta(event.party_id, &delta);

    Ok(plan.finalize())
}

/// The analytic decomposition of one stock line; components sum to the line
/// total.
fn analytic_components(item: &StockItem) -> [(LedgerType, Decimal); 5] {
    [
        (LedgerType::GoldStock, item.item_total.metal_value),
        (LedgerType::MakingCharges, item.item_total.making_charges),
        (LedgerType::Premium, item.item_total.premium),
        (LedgerType::OtherCharges, item.item_total.other_charges),
        (LedgerType::Vat, item.item_total.vat_amount),
    ]
}

const fn component_label(ledger_type: LedgerType) -> &'static str {
    match ledger_type {
        LedgerType::GoldStock => "Metal value",
        LedgerType::MakingCharges => "Making charges",
        LedgerType::Premium => "Premium",
        LedgerType::OtherCharges => "Other charges",
        LedgerType::Vat => "VAT",
        _ => "Posting",
    }
}
