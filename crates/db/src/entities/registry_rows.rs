//! `SeaORM` entity for registry ledger rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "registry_rows")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Internal row code, unique per generator scheme.
    #[sea_orm(unique)]
    pub row_code: String,
    /// Ledger type wire string (`PARTY_GOLD_BALANCE`, `sales-fixing`, ...).
    pub ledger_type: String,
    pub party_id: Option<Uuid>,
    /// Back-references to the source document; exactly one is set.
    pub metal_transaction_id: Option<Uuid>,
    pub fixing_transaction_id: Option<Uuid>,
    pub entry_transaction_id: Option<Uuid>,
    pub fund_transfer_id: Option<Uuid>,
    pub description: String,
    pub value: Decimal,
    pub gold_debit: Decimal,
    pub gold_credit: Decimal,
    pub cash_debit: Decimal,
    pub cash_credit: Decimal,
    pub debit: Decimal,
    pub credit: Decimal,
    pub gold_bid_value: Option<Decimal>,
    pub gross_weight: Option<Decimal>,
    pub asset_type: Option<String>,
    pub currency: Option<String>,
    pub currency_rate: Option<Decimal>,
    /// Source voucher number, used for prefix grouping in reports.
    pub reference: String,
    pub cost_center: Option<String>,
    pub transaction_date: Date,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
