//! Registry repository: appending ledger rows and source-scoped retraction.
//!
//! Rows are immutable once appended. The only delete path is `retract`,
//! which removes every row carrying the given source back-reference; that is
//! the persistence half of reverse-and-reapply.

use chrono::{DateTime, Utc};
use goldbook_core::registry::{RegistryDraftRow, SourceRef};
use goldbook_shared::types::PartyId;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::registry_rows;
use crate::wire::to_wire;

/// Error types for registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository over the registry ledger.
pub struct RegistryRepository;

impl RegistryRepository {
    /// Appends a plan's rows under one source reference.
    ///
    /// Returns the number of rows inserted.
    pub async fn append<C: ConnectionTrait>(
        db: &C,
        source: SourceRef,
        rows: &[RegistryDraftRow],
        created_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, RegistryError> {
        for row in rows {
            let id = Uuid::now_v7();
            let (metal_id, fixing_id, entry_id, transfer_id) = source_columns(source);

            let model = registry_rows::ActiveModel {
                id: Set(id),
                row_code: Set(row_code(id)),
                ledger_type: Set(to_wire(&row.ledger_type)?),
                party_id: Set(row.party_id.map(PartyId::into_inner)),
                metal_transaction_id: Set(metal_id),
                fixing_transaction_id: Set(fixing_id),
                entry_transaction_id: Set(entry_id),
                fund_transfer_id: Set(transfer_id),
                description: Set(row.description.clone()),
                value: Set(row.value),
                gold_debit: Set(row.gold_debit()),
                gold_credit: Set(row.gold_credit()),
                cash_debit: Set(row.cash_debit()),
                cash_credit: Set(row.cash_credit()),
                debit: Set(row.debit()),
                credit: Set(row.credit()),
                gold_bid_value: Set(row.gold_bid_value),
                gross_weight: Set(row.gross_weight),
                asset_type: Set(match row.asset_type {
                    Some(asset) => Some(to_wire(&asset)?),
                    None => None,
                }),
                currency: Set(row.currency.as_ref().map(|c| c.as_str().to_owned())),
                currency_rate: Set(row.currency_rate),
                reference: Set(row.reference.clone()),
                cost_center: Set(row.cost_center.clone()),
                transaction_date: Set(row.transaction_date),
                is_active: Set(true),
                created_by: Set(created_by),
                created_at: Set(now.into()),
            };
            model.insert(db).await?;
        }
        Ok(rows.len())
    }

    /// Deletes every row posted from the given source.
    ///
    /// Returns the number of rows removed.
    pub async fn retract<C: ConnectionTrait>(
        db: &C,
        source: SourceRef,
    ) -> Result<u64, RegistryError> {
        let column = match source {
            SourceRef::MetalTransaction(_) => registry_rows::Column::MetalTransactionId,
            SourceRef::Fixing(_) => registry_rows::Column::FixingTransactionId,
            SourceRef::Entry(_) => registry_rows::Column::EntryTransactionId,
            SourceRef::FundTransfer(_) => registry_rows::Column::FundTransferId,
        };
        let result = registry_rows::Entity::delete_many()
            .filter(column.eq(source.entity_id()))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Loads the rows posted from a source, for audit surfaces.
    pub async fn find_by_source<C: ConnectionTrait>(
        db: &C,
        source: SourceRef,
    ) -> Result<Vec<registry_rows::Model>, RegistryError> {
        let column = match source {
            SourceRef::MetalTransaction(_) => registry_rows::Column::MetalTransactionId,
            SourceRef::Fixing(_) => registry_rows::Column::FixingTransactionId,
            SourceRef::Entry(_) => registry_rows::Column::EntryTransactionId,
            SourceRef::FundTransfer(_) => registry_rows::Column::FundTransferId,
        };
        let rows = registry_rows::Entity::find()
            .filter(column.eq(source.entity_id()))
            .all(db)
            .await?;
        Ok(rows)
    }
}

/// The back-reference column values for one source.
const fn source_columns(
    source: SourceRef,
) -> (Option<Uuid>, Option<Uuid>, Option<Uuid>, Option<Uuid>) {
    match source {
        SourceRef::MetalTransaction(id) => (Some(id), None, None, None),
        SourceRef::Fixing(id) => (None, Some(id), None, None),
        SourceRef::Entry(id) => (None, None, Some(id), None),
        SourceRef::FundTransfer(id) => (None, None, None, Some(id)),
    }
}

/// Row code derived from the row's own id, so it is unique by construction.
///
/// The first 48 bits of a v7 id are its millisecond timestamp and repeat
/// across rows inserted in one loop; the tail holds the random bits.
fn row_code(id: Uuid) -> String {
    let hex = id.simple().to_string();
    format!("RR{}", hex[hex.len() - 12..].to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_code_shape() {
        let code = row_code(Uuid::now_v7());
        assert_eq!(code.len(), 14);
        assert!(code.starts_with("RR"));
        assert!(code[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_row_codes_differ_within_one_millisecond() {
        // A multi-row plan draws all its ids back to back.
        let codes: Vec<String> = (0..8).map(|_| row_code(Uuid::now_v7())).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_source_columns_set_exactly_one() {
        let id = Uuid::now_v7();
        for source in [
            SourceRef::MetalTransaction(id),
            SourceRef::Fixing(id),
            SourceRef::Entry(id),
            SourceRef::FundTransfer(id),
        ] {
            let (a, b, c, d) = source_columns(source);
            let set = [a, b, c, d].iter().filter(|v| v.is_some()).count();
            assert_eq!(set, 1);
        }
    }
}
