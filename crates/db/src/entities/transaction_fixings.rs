//! `SeaORM` entity for transaction fixings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction_fixings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-facing code of shape `PUR#####` or `SEL#####`.
    #[sea_orm(unique)]
    pub transaction_code: String,
    #[sea_orm(unique)]
    pub voucher_number: String,
    pub fixing_type: String,
    pub party_id: Uuid,
    pub fixing_date: Date,
    pub payload: Json,
    pub status: String,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
