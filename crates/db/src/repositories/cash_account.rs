//! Cash account repository: balance mutations with their audit log.
//!
//! Every balance move writes a log row carrying the balance after the move,
//! in the same transaction, so the log replays to the stored balance.

use chrono::{DateTime, Utc};
use goldbook_core::posting::{AccountAction, CashAccountEffect};
use goldbook_shared::types::CashAccountId;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::{account_logs, cash_accounts};
use crate::wire::to_wire;

/// Error types for cash account operations.
#[derive(Debug, thiserror::Error)]
pub enum CashAccountError {
    /// Account not found or inactive.
    #[error("Cash account not found: {0}")]
    NotFound(CashAccountId),

    /// Effect currency does not match the account currency.
    #[error("Cash account {account} is denominated in {expected}, got {got}")]
    CurrencyMismatch {
        /// Account being mutated.
        account: CashAccountId,
        /// Account's currency.
        expected: String,
        /// Currency of the attempted movement.
        got: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository over cash account masters and their logs.
pub struct CashAccountRepository;

impl CashAccountRepository {
    /// Applies one effect: moves the balance and appends the log row.
    ///
    /// Returns the balance after the move.
    pub async fn apply_effect<C: ConnectionTrait>(
        db: &C,
        effect: &CashAccountEffect,
        created_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Decimal, CashAccountError> {
        let account = cash_accounts::Entity::find_by_id(effect.account_id.into_inner())
            .one(db)
            .await?
            .filter(|a| a.is_active)
            .ok_or(CashAccountError::NotFound(effect.account_id))?;

        if account.currency != effect.currency.as_str() {
            return Err(CashAccountError::CurrencyMismatch {
                account: effect.account_id,
                expected: account.currency,
                got: effect.currency.as_str().to_owned(),
            });
        }

        let balance_after = match effect.action {
            AccountAction::Add => account.balance + effect.amount,
            AccountAction::Subtract => account.balance - effect.amount,
        };

        let mut active: cash_accounts::ActiveModel = account.into();
        active.balance = Set(balance_after);
        active.updated_at = Set(now.into());
        active.update(db).await?;

        let log = account_logs::ActiveModel {
            id: Set(Uuid::now_v7()),
            account_id: Set(effect.account_id.into_inner()),
            action: Set(to_wire(&effect.action)?),
            transaction_type: Set(to_wire(&effect.log_type)?),
            amount: Set(effect.amount),
            balance_after: Set(balance_after),
            note: Set(effect.note.clone()),
            created_by: Set(created_by),
            created_at: Set(now.into()),
        };
        log.insert(db).await?;

        Ok(balance_after)
    }
}
