//! `SeaORM` entity for counterparty accounts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "parties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Unique uppercase account code.
    #[sea_orm(unique)]
    pub account_code: String,
    /// Account class (customer, supplier, internal).
    pub account_type: String,
    /// Signed gold balance in grams; positive is payable to the party.
    pub gold_grams: Decimal,
    /// Denormalized valuation cache, never authoritative.
    pub gold_value: Decimal,
    pub last_balance_update: DateTimeWithTimeZone,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::party_cash_balances::Entity")]
    PartyCashBalances,
}

impl Related<super::party_cash_balances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartyCashBalances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
