//! Posting rules for receipt/payment entries.
//!
//! Metal entries move weight between the party and our stock with no cash
//! axis. Cash entries move money between the party and a named bank/cash
//! account; every cash line also mutates the account master and writes an
//! account-log row.

use super::error::PostingError;
use super::plan::{AccountAction, AccountLogType, CashAccountEffect, PostingPlan};
use super::validation::validate_entry;
use crate::balance::BalanceDelta;
use crate::events::{CashLine, EntryEvent, EntryLines, StockLine};
use crate::registry::{LedgerType, RegistryDraftRow, Side};

/// Derives the posting plan for a receipt/payment entry.
pub fn plan_entry(event: &EntryEvent, voucher_number: &str) -> Result<PostingPlan, PostingError> {
    validate_entry(event)?;

    let mut plan = PostingPlan::default();
    match &event.lines {
        EntryLines::Stock(lines) => plan_stock_lines(event, lines, voucher_number, &mut plan),
        EntryLines::Cash(lines) => plan_cash_lines(event, lines, voucher_number, &mut plan),
    }
    Ok(plan.finalize())
}

fn plan_stock_lines(
    event: &EntryEvent,
    lines: &[StockLine],
    voucher_number: &str,
    plan: &mut PostingPlan,
) {
    // Receipt: metal comes in, stock credited; payment mirrors.
    let stock_side = if event.kind.is_receipt() {
        Side::Credit
    } else {
        Side::Debit
    };

    let mut delta = BalanceDelta::default();
    for line in lines {
        plan.push_row(
            RegistryDraftRow::new(
                LedgerType::StockBalance,
                format!("Stock movement {}", line.stock_code),
                voucher_number,
                event.date,
            )
            .for_party(event.party_id)
            .with_value(line.purity_weight)
            .with_gold(stock_side, line.purity_weight)
            .with_gross_weight(line.gross_weight),
        );
        plan.push_row(
            RegistryDraftRow::new(
                LedgerType::Gold,
                format!("Gold {}", line.stock_code),
                voucher_number,
                event.date,
            )
            .with_value(line.purity_weight)
            .with_gold(stock_side.flipped(), line.purity_weight),
        );
        let signed = if event.kind.is_receipt() {
            -line.purity_weight
        } else {
            line.purity_weight
        };
        delta.gold_delta += signed;
    }
    plan.add_delta(event.party_id, &delta);
}

fn plan_cash_lines(
    event: &EntryEvent,
    lines: &[CashLine],
    voucher_number: &str,
    plan: &mut PostingPlan,
) {
    // Receipt: the party's credit on our books grows (credit on the party
    // row), the cash account is debited; payment mirrors.
    let (party_side, action, log_type) = if event.kind.is_receipt() {
        (Side::Credit, AccountAction::Add, AccountLogType::Deposit)
    } else {
        (
            Side::Debit,
            AccountAction::Subtract,
            AccountLogType::Withdrawal,
        )
    };

    let mut delta = BalanceDelta::default();
    for line in lines {
        plan.push_row(
            RegistryDraftRow::new(
                LedgerType::PartyCashBalance,
                format!("Cash {}", line.currency),
                voucher_number,
                event.date,
            )
            .for_party(event.party_id)
            .with_value(line.amount)
            .with_cash(party_side, line.amount)
            .with_currency(line.currency.clone(), rust_decimal::Decimal::ONE),
        );
        plan.push_row(
            RegistryDraftRow::new(
                LedgerType::Cash,
                format!("Cash {}", line.currency),
                voucher_number,
                event.date,
            )
            .with_value(line.amount)
            .with_cash(party_side.flipped(), line.amount)
            .with_currency(line.currency.clone(), rust_decimal::Decimal::ONE),
        );
        let signed = if event.kind.is_receipt() {
            line.amount
        } else {
            -line.amount
        };
        delta.add_cash(line.currency.clone(), signed);
        plan.collateral.cash_account_effects.push(CashAccountEffect {
            account_id: line.cash_account_id,
            currency: line.currency.clone(),
            amount: line.amount,
            action,
            log_type,
            note: line.note.clone(),
        });
    }
    plan.add_delta(event.party_id, &delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EntryKind;
    use chrono::NaiveDate;
    use goldbook_shared::types::{CashAccountId, CurrencyCode, PartyId};
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    }

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    #[test]
    fn test_cash_receipt_double_effect() {
        let party = PartyId::new();
        let account = CashAccountId::new();
        let event = EntryEvent {
            kind: EntryKind::CashReceipt,
            party_id: party,
            date: date(),
            lines: EntryLines::Cash(vec![CashLine {
                currency: usd(),
                amount: dec!(200),
                cash_account_id: account,
                note: Some("cheque 1142".to_string()),
            }]),
        };
        let plan = plan_entry(&event, "ENT0001").unwrap();

        let party_row = plan
            .rows
            .iter()
            .find(|r| r.ledger_type == LedgerType::PartyCashBalance)
            .unwrap();
        assert_eq!(party_row.cash_credit(), dec!(200));
        assert_eq!(party_row.party_id, Some(party));

        let house_row = plan
            .rows
            .iter()
            .find(|r| r.ledger_type == LedgerType::Cash)
            .unwrap();
        assert_eq!(house_row.cash_debit(), dec!(200));

        assert_eq!(plan.delta_for(party).cash_deltas[0].amount, dec!(200));

        let effect = &plan.collateral.cash_account_effects[0];
        assert_eq!(effect.account_id, account);
        assert_eq!(effect.action, AccountAction::Add);
        assert_eq!(effect.log_type, AccountLogType::Deposit);
        assert_eq!(effect.amount, dec!(200));
        assert_eq!(effect.note.as_deref(), Some("cheque 1142"));
    }

    #[test]
    fn test_cash_payment_mirrors_receipt() {
        let party = PartyId::new();
        let event = EntryEvent {
            kind: EntryKind::CashPayment,
            party_id: party,
            date: date(),
            lines: EntryLines::Cash(vec![CashLine {
                currency: usd(),
                amount: dec!(75),
                cash_account_id: CashAccountId::new(),
                note: None,
            }]),
        };
        let plan = plan_entry(&event, "ENT0002").unwrap();

        let party_row = plan
            .rows
            .iter()
            .find(|r| r.ledger_type == LedgerType::PartyCashBalance)
            .unwrap();
        assert_eq!(party_row.cash_debit(), dec!(75));
        assert_eq!(plan.delta_for(party).cash_deltas[0].amount, dec!(-75));

        let effect = &plan.collateral.cash_account_effects[0];
        assert_eq!(effect.action, AccountAction::Subtract);
        assert_eq!(effect.log_type, AccountLogType::Withdrawal);
    }

    #[test]
    fn test_metal_receipt_has_no_cash_axis() {
        let party = PartyId::new();
        let event = EntryEvent {
            kind: EntryKind::MetalReceipt,
            party_id: party,
            date: date(),
            lines: EntryLines::Stock(vec![StockLine {
                stock_code: "KB995".to_string(),
                gross_weight: dec!(50.25),
                purity: dec!(0.995),
                purity_weight: dec!(50),
            }]),
        };
        let plan = plan_entry(&event, "MRC0001").unwrap();

        let stock = plan
            .rows
            .iter()
            .find(|r| r.ledger_type == LedgerType::StockBalance)
            .unwrap();
        assert_eq!(stock.gold_credit(), dec!(50));
        assert_eq!(stock.cash_debit() + stock.cash_credit(), dec!(0));

        let gold = plan
            .rows
            .iter()
            .find(|r| r.ledger_type == LedgerType::Gold)
            .unwrap();
        assert_eq!(gold.gold_debit(), dec!(50));

        let delta = plan.delta_for(party);
        assert_eq!(delta.gold_delta, dec!(-50));
        assert!(delta.cash_deltas.is_empty());
        assert!(plan.collateral.is_empty());
    }

    #[test]
    fn test_metal_payment_flips_receipt() {
        let party = PartyId::new();
        let event = EntryEvent {
            kind: EntryKind::MetalPayment,
            party_id: party,
            date: date(),
            lines: EntryLines::Stock(vec![StockLine {
                stock_code: "KB995".to_string(),
                gross_weight: dec!(50.25),
                purity: dec!(0.995),
                purity_weight: dec!(50),
            }]),
        };
        let plan = plan_entry(&event, "MPY0001").unwrap();
        assert_eq!(plan.delta_for(party).gold_delta, dec!(50));
    }
}
