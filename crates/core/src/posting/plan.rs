//! The posting plan: everything one business event commits atomically.
//!
//! A plan is a pure value derived from the event payload; the persistence
//! layer turns it into row inserts, balance mutations, and collateral
//! writes inside one transaction. Inverting a plan yields the exact undo
//! used by reverse-and-reapply.

use goldbook_shared::types::{CashAccountId, CurrencyCode, PartyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::balance::BalanceDelta;
use crate::registry::{LedgerType, RegistryDraftRow};

/// Balance delta addressed to one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyDelta {
    /// Party whose balances move.
    pub party_id: PartyId,
    /// The signed movement.
    pub delta: BalanceDelta,
}

/// Direction of a cash-account mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountAction {
    /// Balance increases.
    Add,
    /// Balance decreases.
    Subtract,
}

/// Log classification of a cash-account mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountLogType {
    /// Money flowed into the account.
    Deposit,
    /// Money flowed out of the account.
    Withdrawal,
}

/// A mutation of a bank/cash account master, paired with its log row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashAccountEffect {
    /// Account being mutated.
    pub account_id: CashAccountId,
    /// Currency of the movement.
    pub currency: CurrencyCode,
    /// Unsigned amount; direction is carried by `action`.
    pub amount: Decimal,
    /// Whether the balance goes up or down.
    pub action: AccountAction,
    /// Log classification.
    pub log_type: AccountLogType,
    /// Free-text note carried to the account log.
    pub note: Option<String>,
}

impl CashAccountEffect {
    /// The opposite effect, used when a posting is reversed.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let (action, log_type) = match self.action {
            AccountAction::Add => (AccountAction::Subtract, AccountLogType::Withdrawal),
            AccountAction::Subtract => (AccountAction::Add, AccountLogType::Deposit),
        };
        Self {
            action,
            log_type,
            ..self.clone()
        }
    }
}

/// One fixing-price record to persist alongside a fixing posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixingPriceDraft {
    /// Metal-rate master in effect at the fixing moment.
    pub metal_rate_id: Option<Uuid>,
    /// Market bid value at the fixing moment.
    pub bid_value: Decimal,
    /// Fixed rate per gram.
    pub one_gram_rate: Decimal,
    /// Pure weight fixed by the order.
    pub pure_weight: Decimal,
    /// Settlement currency of the order.
    pub currency: CurrencyCode,
    /// Rate from the settlement currency to base.
    pub currency_rate: Decimal,
    /// Order price in the settlement currency.
    pub price: Decimal,
}

/// Collateral side-effects of a plan beyond rows and balances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collateral {
    /// Fixing-price records, one per fixed order.
    pub fixing_prices: Vec<FixingPriceDraft>,
    /// Cash-account mutations with their log rows.
    pub cash_account_effects: Vec<CashAccountEffect>,
}

impl Collateral {
    /// True if the plan carries no collateral.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixing_prices.is_empty() && self.cash_account_effects.is_empty()
    }
}

/// The complete atomic output of one posting rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingPlan {
    /// Ledger rows, in deterministic insertion order.
    pub rows: Vec<RegistryDraftRow>,
    /// Per-party balance deltas, at most one entry per party.
    pub deltas: Vec<PartyDelta>,
    /// Collateral writes.
    pub collateral: Collateral,
}

impl PostingPlan {
    /// Adds a row; ordering is fixed up by [`Self::finalize`].
    pub fn push_row(&mut self, row: RegistryDraftRow) {
        self.rows.push(row);
    }

    /// Merges a delta into the party's accumulated delta.
    pub fn add_delta(&mut self, party_id: PartyId, delta: &BalanceDelta) {
        if let Some(existing) = self.deltas.iter_mut().find(|d| d.party_id == party_id) {
            existing.delta.merge(delta);
        } else {
            self.deltas.push(PartyDelta {
                party_id,
                delta: delta.clone(),
            });
        }
    }

    /// Sorts rows into the canonical insertion order: axes in the order
    /// stock, gold, cash, analytics, party-side before house-side within an
    /// axis. The sort is stable, so construction order breaks ties.
    #[must_use]
    pub fn finalize(mut self) -> Self {
        self.rows.sort_by_key(|row| insertion_rank(row.ledger_type));
        self
    }

    /// The exact undo of this plan: every row flipped, every delta negated,
    /// every cash-account effect reversed. Fixing prices carry no direction;
    /// reversal deletes them by source instead.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            rows: self.rows.iter().map(RegistryDraftRow::inverted).collect(),
            deltas: self
                .deltas
                .iter()
                .map(|d| PartyDelta {
                    party_id: d.party_id,
                    delta: d.delta.inverted(),
                })
                .collect(),
            collateral: Collateral {
                fixing_prices: self.collateral.fixing_prices.clone(),
                cash_account_effects: self
                    .collateral
                    .cash_account_effects
                    .iter()
                    .map(CashAccountEffect::inverted)
                    .collect(),
            },
        }
    }

    /// The accumulated delta for one party, zero if the plan never touches it.
    #[must_use]
    pub fn delta_for(&self, party_id: PartyId) -> BalanceDelta {
        self.deltas
            .iter()
            .find(|d| d.party_id == party_id)
            .map_or_else(BalanceDelta::default, |d| d.delta.clone())
    }
}

/// (axis, side) insertion rank per ledger type.
const fn insertion_rank(ledger_type: LedgerType) -> (u8, u8) {
    match ledger_type {
        LedgerType::StockBalance => (0, 0),
        LedgerType::PartyGoldBalance
        | LedgerType::PartyPurchaseFix
        | LedgerType::PartySaleFix => (1, 0),
        LedgerType::Gold | LedgerType::PurchaseFixing | LedgerType::SalesFixing => (1, 1),
        LedgerType::PartyCashBalance => (2, 0),
        LedgerType::Cash => (2, 1),
        LedgerType::FxExchange
        | LedgerType::GoldStock
        | LedgerType::MakingCharges
        | LedgerType::Premium
        | LedgerType::OtherCharges
        | LedgerType::Vat => (3, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Side;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    fn aed() -> CurrencyCode {
        CurrencyCode::new("AED").unwrap()
    }

    #[test]
    fn test_finalize_orders_axes() {
        let mut plan = PostingPlan::default();
        plan.push_row(RegistryDraftRow::new(LedgerType::Vat, "vat", "SAL0001", date()));
        plan.push_row(RegistryDraftRow::new(LedgerType::Cash, "cash", "SAL0001", date()));
        plan.push_row(RegistryDraftRow::new(
            LedgerType::PartyCashBalance,
            "party cash",
            "SAL0001",
            date(),
        ));
        plan.push_row(RegistryDraftRow::new(
            LedgerType::StockBalance,
            "stock",
            "SAL0001",
            date(),
        ));
        plan.push_row(RegistryDraftRow::new(LedgerType::Gold, "gold", "SAL0001", date()));

        let plan = plan.finalize();
        let order: Vec<LedgerType> = plan.rows.iter().map(|r| r.ledger_type).collect();
        assert_eq!(
            order,
            vec![
                LedgerType::StockBalance,
                LedgerType::Gold,
                LedgerType::PartyCashBalance,
                LedgerType::Cash,
                LedgerType::Vat,
            ]
        );
    }

    #[test]
    fn test_add_delta_merges_per_party() {
        let party = PartyId::new();
        let mut plan = PostingPlan::default();
        plan.add_delta(party, &BalanceDelta::gold(dec!(100)));
        plan.add_delta(party, &BalanceDelta::cash(aed(), dec!(-1000)));
        assert_eq!(plan.deltas.len(), 1);
        assert_eq!(plan.delta_for(party).gold_delta, dec!(100));
        assert_eq!(plan.delta_for(party).cash_deltas[0].amount, dec!(-1000));
    }

    #[test]
    fn test_inverted_is_exact_undo() {
        let party = PartyId::new();
        let mut plan = PostingPlan::default();
        plan.push_row(
            RegistryDraftRow::new(LedgerType::StockBalance, "stock", "SAL0001", date())
                .with_gold(Side::Debit, dec!(100)),
        );
        plan.add_delta(party, &BalanceDelta::gold(dec!(100)));
        plan.collateral.cash_account_effects.push(CashAccountEffect {
            account_id: CashAccountId::new(),
            currency: aed(),
            amount: dec!(200),
            action: AccountAction::Add,
            log_type: AccountLogType::Deposit,
            note: None,
        });

        let undo = plan.inverted();
        assert_eq!(undo.rows[0].gold_credit(), dec!(100));
        assert_eq!(undo.delta_for(party).gold_delta, dec!(-100));
        assert_eq!(
            undo.collateral.cash_account_effects[0].action,
            AccountAction::Subtract
        );
        assert_eq!(
            undo.collateral.cash_account_effects[0].log_type,
            AccountLogType::Withdrawal
        );

        // Inverting twice restores the original.
        assert_eq!(undo.inverted(), plan);
    }
}
