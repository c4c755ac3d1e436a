//! Mechanical application of balance deltas.

use chrono::{DateTime, Utc};
use goldbook_shared::types::{CurrencyCode, PartyId};
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{BalanceDelta, CashEntry, PartyBalances};

/// Errors raised by the balance projector.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// A credit policy refused the resulting balance.
    #[error("Credit policy violation for party {party}: {reason}")]
    PolicyViolation {
        /// Party whose balance was refused.
        party: PartyId,
        /// Policy-supplied reason.
        reason: String,
    },
}

/// Pluggable credit-limit policy, consulted after a delta is applied.
///
/// The core ships only [`AllowNegative`]; stricter policies can be injected
/// without touching the posting rules.
pub trait CreditPolicy {
    /// Checks the post-delta balances; an error aborts the transaction.
    fn check(&self, party: PartyId, after: &PartyBalances) -> Result<(), BalanceError>;
}

/// The default policy: negative balances are allowed, no check is made.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowNegative;

impl CreditPolicy for AllowNegative {
    fn check(&self, _party: PartyId, _after: &PartyBalances) -> Result<(), BalanceError> {
        Ok(())
    }
}

/// Applies a delta to a party's balances in place.
///
/// Currencies absent from the cash vector are materialized at zero with
/// `is_default = false` before the delta lands. Every touched slot and the
/// party-level timestamp move to `now`. Returns the currencies that were
/// newly materialized so the persistence layer can insert rows for them.
pub fn apply_delta<P: CreditPolicy>(
    party: PartyId,
    balances: &mut PartyBalances,
    delta: &BalanceDelta,
    policy: &P,
    now: DateTime<Utc>,
) -> Result<Vec<CurrencyCode>, BalanceError> {
    let mut materialized = Vec::new();

    balances.gold_grams += delta.gold_delta;

    for cash_delta in &delta.cash_deltas {
        let idx = match balances
            .cash
            .iter()
            .position(|e| e.currency == cash_delta.currency)
        {
            Some(idx) => idx,
            None => {
                materialized.push(cash_delta.currency.clone());
                balances.cash.push(CashEntry {
                    currency: cash_delta.currency.clone(),
                    amount: Decimal::ZERO,
                    is_default: false,
                    last_updated: now,
                });
                balances.cash.len() - 1
            }
        };
        let entry = &mut balances.cash[idx];
        entry.amount += cash_delta.amount;
        entry.last_updated = now;
    }

    balances.last_balance_update = now;

    policy.check(party, balances)?;
    Ok(materialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn aed() -> CurrencyCode {
        CurrencyCode::new("AED").unwrap()
    }

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    #[test]
    fn test_apply_gold_and_cash() {
        let now = Utc::now();
        let mut balances = PartyBalances::zero(now);
        let mut delta = BalanceDelta::gold(dec!(100));
        delta.add_cash(aed(), dec!(-1000));

        let materialized =
            apply_delta(PartyId::new(), &mut balances, &delta, &AllowNegative, now).unwrap();

        assert_eq!(balances.gold_grams, dec!(100));
        assert_eq!(balances.cash_in(&aed()), dec!(-1000));
        assert_eq!(materialized, vec![aed()]);
    }

    #[test]
    fn test_missing_currency_materialized_at_zero() {
        let now = Utc::now();
        let mut balances = PartyBalances::zero(now);
        let delta = BalanceDelta::cash(usd(), dec!(500));

        apply_delta(PartyId::new(), &mut balances, &delta, &AllowNegative, now).unwrap();

        let slot = balances.cash.iter().find(|e| e.currency == usd()).unwrap();
        assert_eq!(slot.amount, dec!(500));
        assert!(!slot.is_default);
        // No other currency appears unless the posting touches it.
        assert_eq!(balances.cash.len(), 1);
    }

    #[test]
    fn test_negative_balances_allowed() {
        let now = Utc::now();
        let mut balances = PartyBalances::zero(now);
        let delta = BalanceDelta::cash(aed(), dec!(-99999));
        let result = apply_delta(PartyId::new(), &mut balances, &delta, &AllowNegative, now);
        assert!(result.is_ok());
        assert_eq!(balances.cash_in(&aed()), dec!(-99999));
    }

    #[test]
    fn test_existing_slot_not_rematerialized() {
        let now = Utc::now();
        let mut balances = PartyBalances::zero(now);
        apply_delta(
            PartyId::new(),
            &mut balances,
            &BalanceDelta::cash(aed(), dec!(10)),
            &AllowNegative,
            now,
        )
        .unwrap();
        let materialized = apply_delta(
            PartyId::new(),
            &mut balances,
            &BalanceDelta::cash(aed(), dec!(5)),
            &AllowNegative,
            now,
        )
        .unwrap();
        assert!(materialized.is_empty());
        assert_eq!(balances.cash_in(&aed()), dec!(15));
    }

    #[test]
    fn test_strict_policy_rejects() {
        struct NoNegativeCash;
        impl CreditPolicy for NoNegativeCash {
            fn check(&self, party: PartyId, after: &PartyBalances) -> Result<(), BalanceError> {
                if after.cash.iter().any(|e| e.amount < Decimal::ZERO) {
                    return Err(BalanceError::PolicyViolation {
                        party,
                        reason: "negative cash".into(),
                    });
                }
                Ok(())
            }
        }

        let now = Utc::now();
        let mut balances = PartyBalances::zero(now);
        let result = apply_delta(
            PartyId::new(),
            &mut balances,
            &BalanceDelta::cash(aed(), dec!(-1)),
            &NoNegativeCash,
            now,
        );
        assert!(matches!(
            result,
            Err(BalanceError::PolicyViolation { .. })
        ));
    }
}
