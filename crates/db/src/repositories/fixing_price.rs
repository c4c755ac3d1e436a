//! Fixing price repository.
//!
//! One price record per fixed order, inserted with the fixing's posting and
//! deleted wholesale when the fixing is reversed.

use chrono::{DateTime, Utc};
use goldbook_core::posting::FixingPriceDraft;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::fixing_prices;

/// Repository over per-order fixing prices.
pub struct FixingPriceRepository;

impl FixingPriceRepository {
    /// Inserts the price records for one fixing.
    pub async fn insert_for_fixing<C: ConnectionTrait>(
        db: &C,
        fixing_id: Uuid,
        drafts: &[FixingPriceDraft],
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        for draft in drafts {
            let model = fixing_prices::ActiveModel {
                id: Set(Uuid::now_v7()),
                fixing_transaction_id: Set(fixing_id),
                metal_rate_id: Set(draft.metal_rate_id),
                bid_value: Set(draft.bid_value),
                one_gram_rate: Set(draft.one_gram_rate),
                pure_weight: Set(draft.pure_weight),
                currency: Set(draft.currency.as_str().to_owned()),
                currency_rate: Set(draft.currency_rate),
                price: Set(draft.price),
                created_at: Set(now.into()),
            };
            model.insert(db).await?;
        }
        Ok(())
    }

    /// Deletes every price record of one fixing.
    pub async fn delete_for_fixing<C: ConnectionTrait>(
        db: &C,
        fixing_id: Uuid,
    ) -> Result<u64, DbErr> {
        let result = fixing_prices::Entity::delete_many()
            .filter(fixing_prices::Column::FixingTransactionId.eq(fixing_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
