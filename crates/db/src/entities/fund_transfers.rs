//! `SeaORM` entity for fund transfers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fund_transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human-facing code of shape `TXN-YYYY-NNN`.
    #[sea_orm(unique)]
    pub transaction_code: String,
    #[sea_orm(unique)]
    pub voucher_number: String,
    pub transfer_type: String,
    pub asset_type: String,
    pub sending_party: Uuid,
    pub receiving_party: Uuid,
    pub value: Decimal,
    pub currency: Option<String>,
    pub cost_center: Option<String>,
    /// Running balance of the cost center after this transfer.
    pub running_balance: Option<Decimal>,
    pub transfer_date: Date,
    pub payload: Json,
    pub status: String,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
