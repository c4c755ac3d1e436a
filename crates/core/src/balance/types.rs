//! Balance snapshot and delta types.

use chrono::{DateTime, Utc};
use goldbook_shared::types::CurrencyCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One currency slot in a party's cash vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashEntry {
    /// Currency of this slot.
    pub currency: CurrencyCode,
    /// Signed amount: positive payable to party, negative receivable.
    pub amount: Decimal,
    /// Whether this is the party's default settlement currency.
    pub is_default: bool,
    /// Last time this slot was touched.
    pub last_updated: DateTime<Utc>,
}

/// A party's live balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyBalances {
    /// Signed gold grams: positive means the party holds gold on our behalf.
    pub gold_grams: Decimal,
    /// Per-currency cash vector, unique by currency.
    pub cash: Vec<CashEntry>,
    /// Monotone timestamp of the last balance mutation.
    pub last_balance_update: DateTime<Utc>,
}

impl PartyBalances {
    /// An all-zero balance snapshot.
    #[must_use]
    pub fn zero(now: DateTime<Utc>) -> Self {
        Self {
            gold_grams: Decimal::ZERO,
            cash: Vec::new(),
            last_balance_update: now,
        }
    }

    /// Looks up the cash amount in a currency; absent slots read as zero.
    #[must_use]
    pub fn cash_in(&self, currency: &CurrencyCode) -> Decimal {
        self.cash
            .iter()
            .find(|e| &e.currency == currency)
            .map_or(Decimal::ZERO, |e| e.amount)
    }
}

/// A signed cash delta in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashDelta {
    /// Currency touched.
    pub currency: CurrencyCode,
    /// Signed amount to apply.
    pub amount: Decimal,
}

/// Delta descriptor applied to one party's balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDelta {
    /// Signed gold delta in grams.
    pub gold_delta: Decimal,
    /// Signed cash deltas, at most one per currency.
    pub cash_deltas: Vec<CashDelta>,
}

impl BalanceDelta {
    /// Delta touching only gold.
    #[must_use]
    pub fn gold(grams: Decimal) -> Self {
        Self {
            gold_delta: grams,
            cash_deltas: Vec::new(),
        }
    }

    /// Delta touching only one cash currency.
    #[must_use]
    pub fn cash(currency: CurrencyCode, amount: Decimal) -> Self {
        Self {
            gold_delta: Decimal::ZERO,
            cash_deltas: vec![CashDelta { currency, amount }],
        }
    }

    /// Merges another delta into this one, combining same-currency entries.
    pub fn merge(&mut self, other: &Self) {
        self.gold_delta += other.gold_delta;
        for delta in &other.cash_deltas {
            self.add_cash(delta.currency.clone(), delta.amount);
        }
    }

    /// Adds a cash amount, combining with an existing entry for the currency.
    pub fn add_cash(&mut self, currency: CurrencyCode, amount: Decimal) {
        if let Some(existing) = self
            .cash_deltas
            .iter_mut()
            .find(|d| d.currency == currency)
        {
            existing.amount += amount;
        } else {
            self.cash_deltas.push(CashDelta { currency, amount });
        }
    }

    /// The fully negated delta.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            gold_delta: -self.gold_delta,
            cash_deltas: self
                .cash_deltas
                .iter()
                .map(|d| CashDelta {
                    currency: d.currency.clone(),
                    amount: -d.amount,
                })
                .collect(),
        }
    }

    /// True if nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gold_delta.is_zero() && self.cash_deltas.iter().all(|d| d.amount.is_zero())
    }
}
