//! `SeaORM` entity for bank/cash account masters.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cash_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub account_code: String,
    pub name: String,
    pub currency: String,
    /// Running balance, moved only by posted cash entries.
    pub balance: Decimal,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_logs::Entity")]
    AccountLogs,
}

impl Related<super::account_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
