//! Document repositories for the four business entity tables.
//!
//! Every document stores its full event payload as JSON. Updates and
//! deletes re-derive the originally posted plan from that payload, so these
//! repositories never need to reconstruct a posting from ledger rows.

use chrono::{DateTime, Utc};
use goldbook_core::events::{
    EntryEvent, FixingEvent, FundTransferEvent, MetalTransactionEvent,
};
use goldbook_core::status::DocumentStatus;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{entries, fund_transfers, metal_transactions, transaction_fixings};
use crate::wire::to_wire;

/// Error types for document operations.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Document not found.
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    /// Payload (de)serialization failure.
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

// ========== Metal transactions ==========

/// Repository over metal purchase/sale documents.
pub struct MetalTransactionRepository;

impl MetalTransactionRepository {
    /// Inserts a new document.
    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        event: &MetalTransactionEvent,
        voucher_number: &str,
        status: DocumentStatus,
        created_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<metal_transactions::Model, DocumentError> {
        let model = metal_transactions::ActiveModel {
            id: Set(id),
            voucher_number: Set(voucher_number.to_owned()),
            transaction_type: Set(to_wire(&event.transaction_type)?),
            party_id: Set(event.party_id.into_inner()),
            voucher_date: Set(event.voucher_date),
            settlement_currency: Set(event.settlement_currency.as_str().to_owned()),
            total_amount: Set(event.total_amount),
            payload: Set(serde_json::to_value(event)?),
            status: Set(to_wire(&status)?),
            created_by: Set(created_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(model.insert(db).await?)
    }

    /// Finds a document by id.
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<metal_transactions::Model, DocumentError> {
        metal_transactions::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// Finds a document by voucher number.
    pub async fn find_by_voucher<C: ConnectionTrait>(
        db: &C,
        voucher_number: &str,
    ) -> Result<Option<metal_transactions::Model>, DocumentError> {
        Ok(metal_transactions::Entity::find()
            .filter(metal_transactions::Column::VoucherNumber.eq(voucher_number))
            .one(db)
            .await?)
    }

    /// Replaces the payload and denormalized columns of an amended document.
    pub async fn replace_payload<C: ConnectionTrait>(
        db: &C,
        model: metal_transactions::Model,
        event: &MetalTransactionEvent,
        now: DateTime<Utc>,
    ) -> Result<metal_transactions::Model, DocumentError> {
        let mut active: metal_transactions::ActiveModel = model.into();
        active.transaction_type = Set(to_wire(&event.transaction_type)?);
        active.party_id = Set(event.party_id.into_inner());
        active.voucher_date = Set(event.voucher_date);
        active.settlement_currency = Set(event.settlement_currency.as_str().to_owned());
        active.total_amount = Set(event.total_amount);
        active.payload = Set(serde_json::to_value(event)?);
        active.updated_at = Set(now.into());
        Ok(active.update(db).await?)
    }

    /// Stores a new status.
    pub async fn set_status<C: ConnectionTrait>(
        db: &C,
        model: metal_transactions::Model,
        status: DocumentStatus,
        now: DateTime<Utc>,
    ) -> Result<metal_transactions::Model, DocumentError> {
        let mut active: metal_transactions::ActiveModel = model.into();
        active.status = Set(to_wire(&status)?);
        active.updated_at = Set(now.into());
        Ok(active.update(db).await?)
    }

    /// Deletes a document.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), DocumentError> {
        metal_transactions::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}

// ========== Entries ==========

/// Repository over receipt/payment entry documents.
pub struct EntryRepository;

impl EntryRepository {
    /// Inserts a new document.
    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        event: &EntryEvent,
        voucher_number: &str,
        status: DocumentStatus,
        created_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<entries::Model, DocumentError> {
        let model = entries::ActiveModel {
            id: Set(id),
            voucher_number: Set(voucher_number.to_owned()),
            entry_type: Set(to_wire(&event.kind)?),
            party_id: Set(event.party_id.into_inner()),
            entry_date: Set(event.date),
            payload: Set(serde_json::to_value(event)?),
            status: Set(to_wire(&status)?),
            created_by: Set(created_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(model.insert(db).await?)
    }

    /// Finds a document by id.
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<entries::Model, DocumentError> {
        entries::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// Replaces the payload and denormalized columns of an amended document.
    pub async fn replace_payload<C: ConnectionTrait>(
        db: &C,
        model: entries::Model,
        event: &EntryEvent,
        now: DateTime<Utc>,
    ) -> Result<entries::Model, DocumentError> {
        let mut active: entries::ActiveModel = model.into();
        active.entry_type = Set(to_wire(&event.kind)?);
        active.party_id = Set(event.party_id.into_inner());
        active.entry_date = Set(event.date);
        active.payload = Set(serde_json::to_value(event)?);
        active.updated_at = Set(now.into());
        Ok(active.update(db).await?)
    }

    /// Stores a new status.
    pub async fn set_status<C: ConnectionTrait>(
        db: &C,
        model: entries::Model,
        status: DocumentStatus,
        now: DateTime<Utc>,
    ) -> Result<entries::Model, DocumentError> {
        let mut active: entries::ActiveModel = model.into();
        active.status = Set(to_wire(&status)?);
        active.updated_at = Set(now.into());
        Ok(active.update(db).await?)
    }

    /// Deletes a document.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), DocumentError> {
        entries::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}

// ========== Transaction fixings ==========

/// Repository over transaction fixing documents.
pub struct FixingRepository;

impl FixingRepository {
    /// Inserts a new document.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        event: &FixingEvent,
        transaction_code: &str,
        voucher_number: &str,
        status: DocumentStatus,
        created_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<transaction_fixings::Model, DocumentError> {
        let model = transaction_fixings::ActiveModel {
            id: Set(id),
            transaction_code: Set(transaction_code.to_owned()),
            voucher_number: Set(voucher_number.to_owned()),
            fixing_type: Set(to_wire(&event.fixing_type)?),
            party_id: Set(event.party_id.into_inner()),
            fixing_date: Set(event.date),
            payload: Set(serde_json::to_value(event)?),
            status: Set(to_wire(&status)?),
            created_by: Set(created_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(model.insert(db).await?)
    }

    /// Finds a document by id.
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<transaction_fixings::Model, DocumentError> {
        transaction_fixings::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// True if a transaction code is already taken.
    pub async fn code_exists<C: ConnectionTrait>(
        db: &C,
        transaction_code: &str,
    ) -> Result<bool, DocumentError> {
        Ok(transaction_fixings::Entity::find()
            .filter(transaction_fixings::Column::TransactionCode.eq(transaction_code))
            .one(db)
            .await?
            .is_some())
    }

    /// Replaces the payload and denormalized columns of an amended document.
    pub async fn replace_payload<C: ConnectionTrait>(
        db: &C,
        model: transaction_fixings::Model,
        event: &FixingEvent,
        now: DateTime<Utc>,
    ) -> Result<transaction_fixings::Model, DocumentError> {
        let mut active: transaction_fixings::ActiveModel = model.into();
        active.fixing_type = Set(to_wire(&event.fixing_type)?);
        active.party_id = Set(event.party_id.into_inner());
        active.fixing_date = Set(event.date);
        active.payload = Set(serde_json::to_value(event)?);
        active.updated_at = Set(now.into());
        Ok(active.update(db).await?)
    }

    /// Stores a new status.
    pub async fn set_status<C: ConnectionTrait>(
        db: &C,
        model: transaction_fixings::Model,
        status: DocumentStatus,
        now: DateTime<Utc>,
    ) -> Result<transaction_fixings::Model, DocumentError> {
        let mut active: transaction_fixings::ActiveModel = model.into();
        active.status = Set(to_wire(&status)?);
        active.updated_at = Set(now.into());
        Ok(active.update(db).await?)
    }

    /// Deletes a document.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), DocumentError> {
        transaction_fixings::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}

// ========== Fund transfers ==========

/// Repository over fund transfer documents.
pub struct FundTransferRepository;

impl FundTransferRepository {
    /// Inserts a new document.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        event: &FundTransferEvent,
        transaction_code: &str,
        voucher_number: &str,
        status: DocumentStatus,
        created_by: Uuid,
        now: DateTime<Utc>,
    ) -> Result<fund_transfers::Model, DocumentError> {
        // Running balance accumulates per cost center across transfers.
        let running_balance = match &event.cost_center {
            Some(cost_center) => {
                let prior = Self::latest_running_balance(db, cost_center).await?;
                Some(prior + event.value)
            }
            None => None,
        };

        let model = fund_transfers::ActiveModel {
            id: Set(id),
            transaction_code: Set(transaction_code.to_owned()),
            voucher_number: Set(voucher_number.to_owned()),
            transfer_type: Set(to_wire(&event.transfer_type)?),
            asset_type: Set(to_wire(&event.asset_type)?),
            sending_party: Set(event.sending_party.into_inner()),
            receiving_party: Set(event.receiving_party.into_inner()),
            value: Set(event.value),
            currency: Set(event.currency.as_ref().map(|c| c.as_str().to_owned())),
            cost_center: Set(event.cost_center.clone()),
            running_balance: Set(running_balance),
            transfer_date: Set(event.date),
            payload: Set(serde_json::to_value(event)?),
            status: Set(to_wire(&status)?),
            created_by: Set(created_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        Ok(model.insert(db).await?)
    }

    /// Running balance of the most recent transfer for a cost center.
    async fn latest_running_balance<C: ConnectionTrait>(
        db: &C,
        cost_center: &str,
    ) -> Result<Decimal, DocumentError> {
        let prior = fund_transfers::Entity::find()
            .filter(fund_transfers::Column::CostCenter.eq(cost_center))
            .order_by_desc(fund_transfers::Column::CreatedAt)
            .one(db)
            .await?;
        Ok(prior.and_then(|m| m.running_balance).unwrap_or(Decimal::ZERO))
    }

    /// Finds a document by id.
    pub async fn find<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<fund_transfers::Model, DocumentError> {
        fund_transfers::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    /// True if a transaction code is already taken.
    pub async fn code_exists<C: ConnectionTrait>(
        db: &C,
        transaction_code: &str,
    ) -> Result<bool, DocumentError> {
        Ok(fund_transfers::Entity::find()
            .filter(fund_transfers::Column::TransactionCode.eq(transaction_code))
            .one(db)
            .await?
            .is_some())
    }

    /// Replaces the payload and denormalized columns of an amended document.
    pub async fn replace_payload<C: ConnectionTrait>(
        db: &C,
        model: fund_transfers::Model,
        event: &FundTransferEvent,
        now: DateTime<Utc>,
    ) -> Result<fund_transfers::Model, DocumentError> {
        let mut active: fund_transfers::ActiveModel = model.into();
        active.transfer_type = Set(to_wire(&event.transfer_type)?);
        active.asset_type = Set(to_wire(&event.asset_type)?);
        active.sending_party = Set(event.sending_party.into_inner());
        active.receiving_party = Set(event.receiving_party.into_inner());
        active.value = Set(event.value);
        active.currency = Set(event.currency.as_ref().map(|c| c.as_str().to_owned()));
        active.cost_center = Set(event.cost_center.clone());
        active.transfer_date = Set(event.date);
        active.payload = Set(serde_json::to_value(event)?);
        active.updated_at = Set(now.into());
        Ok(active.update(db).await?)
    }

    /// Stores a new status.
    pub async fn set_status<C: ConnectionTrait>(
        db: &C,
        model: fund_transfers::Model,
        status: DocumentStatus,
        now: DateTime<Utc>,
    ) -> Result<fund_transfers::Model, DocumentError> {
        let mut active: fund_transfers::ActiveModel = model.into();
        active.status = Set(to_wire(&status)?);
        active.updated_at = Set(now.into());
        Ok(active.update(db).await?)
    }

    /// Deletes a document.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), DocumentError> {
        fund_transfers::Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
