//! `SeaORM` entity for voucher configurations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "voucher_masters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Lowercase module name the configuration applies to.
    pub module: String,
    /// Human-facing voucher type label.
    pub voucher_type: String,
    /// Uppercase alphanumeric prefix, 1-5 characters.
    pub prefix: String,
    /// Zero-padded number width.
    pub number_length: i32,
    /// One of `DD/MM/YYYY`, `MM/DD/YYYY`, `YYYY-MM-DD`.
    pub date_format: String,
    pub is_auto_increment: bool,
    /// Advisory counter; the rendered voucher string is authoritative.
    pub sequence: i64,
    pub is_active: bool,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
