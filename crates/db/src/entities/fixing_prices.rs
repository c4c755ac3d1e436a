//! `SeaORM` entity for per-order fixing prices.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fixing_prices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fixing_transaction_id: Uuid,
    pub metal_rate_id: Option<Uuid>,
    pub bid_value: Decimal,
    pub one_gram_rate: Decimal,
    pub pure_weight: Decimal,
    pub currency: String,
    pub currency_rate: Decimal,
    pub price: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
