//! Party repository: balance snapshots and their persistence.
//!
//! Balances are projected in memory by the core and written back here; the
//! repository owns the mapping between the snapshot and the `parties` /
//! `party_cash_balances` tables.

use chrono::{DateTime, Utc};
use goldbook_core::balance::{CashEntry, PartyBalances};
use goldbook_shared::types::{CurrencyCode, PartyId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::{parties, party_cash_balances};

/// Error types for party operations.
#[derive(Debug, thiserror::Error)]
pub enum PartyError {
    /// Party not found.
    #[error("Party not found: {0}")]
    NotFound(PartyId),

    /// Stored currency code is malformed.
    #[error("Invalid stored currency '{0}' for party {1}")]
    InvalidCurrency(String, PartyId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository over the party balance tables.
///
/// All methods are generic over the connection so they compose inside one
/// database transaction with the rest of a posting.
pub struct PartyRepository;

impl PartyRepository {
    /// Loads a party's balance snapshot.
    pub async fn load_balances<C: ConnectionTrait>(
        db: &C,
        party_id: PartyId,
    ) -> Result<PartyBalances, PartyError> {
        let party = parties::Entity::find_by_id(party_id.into_inner())
            .one(db)
            .await?
            .ok_or(PartyError::NotFound(party_id))?;

        let slots = party_cash_balances::Entity::find()
            .filter(party_cash_balances::Column::PartyId.eq(party_id.into_inner()))
            .all(db)
            .await?;

        let mut cash = Vec::with_capacity(slots.len());
        for slot in slots {
            let currency = CurrencyCode::new(&slot.currency)
                .map_err(|_| PartyError::InvalidCurrency(slot.currency.clone(), party_id))?;
            cash.push(CashEntry {
                currency,
                amount: slot.amount,
                is_default: slot.is_default,
                last_updated: slot.last_updated.into(),
            });
        }

        Ok(PartyBalances {
            gold_grams: party.gold_grams,
            cash,
            last_balance_update: party.last_balance_update.into(),
        })
    }

    /// Writes a projected snapshot back.
    ///
    /// `materialized` names the currencies the projector created during this
    /// posting; those get fresh rows, every other slot is updated in place.
    pub async fn save_balances<C: ConnectionTrait>(
        db: &C,
        party_id: PartyId,
        balances: &PartyBalances,
        materialized: &[CurrencyCode],
        now: DateTime<Utc>,
    ) -> Result<(), PartyError> {
        let party = parties::Entity::find_by_id(party_id.into_inner())
            .one(db)
            .await?
            .ok_or(PartyError::NotFound(party_id))?;

        let mut active: parties::ActiveModel = party.into();
        active.gold_grams = Set(balances.gold_grams);
        active.last_balance_update = Set(balances.last_balance_update.into());
        active.updated_at = Set(now.into());
        active.update(db).await?;

        for entry in &balances.cash {
            if materialized.contains(&entry.currency) {
                let slot = party_cash_balances::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    party_id: Set(party_id.into_inner()),
                    currency: Set(entry.currency.as_str().to_owned()),
                    amount: Set(entry.amount),
                    is_default: Set(entry.is_default),
                    last_updated: Set(entry.last_updated.into()),
                };
                slot.insert(db).await?;
            } else {
                party_cash_balances::Entity::update_many()
                    .col_expr(
                        party_cash_balances::Column::Amount,
                        sea_orm::sea_query::Expr::value(entry.amount),
                    )
                    .col_expr(
                        party_cash_balances::Column::LastUpdated,
                        sea_orm::sea_query::Expr::value(
                            sea_orm::prelude::DateTimeWithTimeZone::from(entry.last_updated),
                        ),
                    )
                    .filter(party_cash_balances::Column::PartyId.eq(party_id.into_inner()))
                    .filter(party_cash_balances::Column::Currency.eq(entry.currency.as_str()))
                    .exec(db)
                    .await?;
            }
        }

        Ok(())
    }

    /// Verifies a party exists and is active.
    pub async fn ensure_active<C: ConnectionTrait>(
        db: &C,
        party_id: PartyId,
    ) -> Result<parties::Model, PartyError> {
        let party = parties::Entity::find_by_id(party_id.into_inner())
            .one(db)
            .await?
            .filter(|p| p.is_active)
            .ok_or(PartyError::NotFound(party_id))?;
        Ok(party)
    }
}
