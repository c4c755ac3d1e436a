//! The posting engine: transactional orchestration of business events.
//!
//! Every operation runs as one database transaction: voucher allocation,
//! document write, ledger rows, balance mutations, and collateral commit or
//! roll back together. Updates and deletes reverse the originally posted
//! plan (re-derived from the stored payload) before applying the new state,
//! always under the document's original voucher number.

mod error;
mod ids;
mod retry;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use goldbook_core::balance::{apply_delta, AllowNegative};
use goldbook_core::events::FixingType;
use goldbook_core::posting::{plan_for, BusinessEvent, PostingPlan};
use goldbook_core::registry::SourceRef;
use goldbook_core::status::DocumentStatus;
use goldbook_core::voucher::{
    render_number, VoucherAllocation, VoucherConfig, VoucherConfigCache, VoucherModule,
};
use goldbook_shared::config::EngineConfig;
use goldbook_shared::error::{AppError, AppResult};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::Serialize;
use uuid::Uuid;

use crate::repositories::{
    CashAccountRepository, EntryRepository, FixingPriceRepository, FixingRepository,
    FundTransferRepository, MetalTransactionRepository, PartyRepository, RegistryRepository,
    VoucherRepository,
};
use crate::wire::from_wire;
use error::map_db_err;

/// Attempts at drawing a free random transaction code before giving up.
const CODE_ATTEMPTS: u32 = 8;

/// What a successful posting hands back to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingReceipt {
    /// Id of the business document.
    pub document_id: Uuid,
    /// Allocated (or retained, on update) voucher number.
    pub voucher_number: String,
    /// Human-facing transaction code, for fixings and transfers.
    pub transaction_code: Option<String>,
    /// Ledger rows written by this posting.
    pub rows_posted: usize,
}

/// A voucher configuration together with the next number it would hand out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherPreview {
    /// Module previewed.
    pub module: VoucherModule,
    /// Voucher type label.
    pub voucher_type: String,
    /// Configured prefix.
    pub prefix: String,
    /// The number the next allocation would produce.
    pub next_number: String,
    /// The sequence behind that number.
    pub next_sequence: u64,
}

/// The transactional posting engine.
pub struct PostingEngine {
    db: DatabaseConnection,
    cache: VoucherConfigCache,
    config: EngineConfig,
}

impl PostingEngine {
    /// Creates an engine over an established connection.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: EngineConfig) -> Self {
        let cache = VoucherConfigCache::with_ttl(config.voucher_cache_ttl_secs);
        Self { db, cache, config }
    }

    // ========== Posting operations ==========

    /// Posts a business event: allocates a voucher, writes the document,
    /// its ledger rows, balance mutations, and collateral.
    pub async fn post(
        &self,
        event: &BusinessEvent,
        created_by: Uuid,
    ) -> AppResult<PostingReceipt> {
        validate(event)?;
        retry::with_retry(&self.config, || self.post_once(event, created_by)).await
    }

    /// Amends a posted document: reverses the original plan and applies the
    /// amended one under the same voucher number.
    pub async fn amend(
        &self,
        source: SourceRef,
        event: &BusinessEvent,
        created_by: Uuid,
    ) -> AppResult<PostingReceipt> {
        validate(event)?;
        if !kinds_match(source, event) {
            return Err(AppError::Validation(
                "amended event kind does not match the document".into(),
            ));
        }
        retry::with_retry(&self.config, || self.amend_once(source, event, created_by)).await
    }

    /// Deletes a posted document, reversing its ledger and balance effects.
    ///
    /// Returns the number of ledger rows retracted. The voucher number is
    /// not reusable afterwards for draft-metal documents only; counted
    /// modules reassign it to the next posting by construction.
    pub async fn delete(&self, source: SourceRef, created_by: Uuid) -> AppResult<u64> {
        retry::with_retry(&self.config, || self.delete_once(source, created_by)).await
    }

    /// Cancels a draft document. Pure status change; anything that posted
    /// must be deleted (reversed) instead.
    pub async fn cancel(&self, source: SourceRef) -> AppResult<()> {
        self.change_status(source, DocumentStatus::Cancelled).await
    }

    /// Approves a confirmed document. Pure status change.
    pub async fn approve(&self, source: SourceRef) -> AppResult<()> {
        self.change_status(source, DocumentStatus::Approved).await
    }

    /// Restores a cancelled document back to draft. The exact inverse of
    /// cancel, and the only way out of the cancelled state.
    pub async fn restore(&self, source: SourceRef) -> AppResult<()> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let current = load_status(&txn, source).await?;
        if !current.can_restore() {
            return Err(AppError::State(format!(
                "document {} is not cancelled and cannot be restored",
                source.entity_id()
            )));
        }
        store_status(&txn, source, DocumentStatus::Draft, now).await?;
        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }

    // ========== Voucher operations ==========

    /// Previews the next voucher number for a module without allocating it.
    pub async fn voucher_info(&self, module: VoucherModule) -> AppResult<VoucherPreview> {
        let config = self.resolve_config(&self.db, module).await?;
        let next_sequence = VoucherRepository::next_sequence(&self.db, module, &config).await?;
        Ok(VoucherPreview {
            module,
            voucher_type: config.voucher_type.clone(),
            prefix: config.prefix.clone(),
            next_number: render_number(&config.prefix, next_sequence, config.number_length),
            next_sequence,
        })
    }

    /// Allocates a voucher number outside a posting (draft numbering).
    pub async fn voucher_generate(
        &self,
        module: VoucherModule,
        date: NaiveDate,
    ) -> AppResult<VoucherAllocation> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let config = self.resolve_config(&txn, module).await?;
        let allocation = VoucherRepository::allocate(&txn, module, &config, date).await?;
        txn.commit().await.map_err(map_db_err)?;
        Ok(allocation)
    }

    /// Drops a cached voucher configuration after an out-of-band edit.
    pub fn invalidate_voucher_config(&self, module: VoucherModule) {
        self.cache.invalidate(module);
    }

    // ========== Single attempts ==========

    async fn post_once(&self, event: &BusinessEvent, created_by: Uuid) -> AppResult<PostingReceipt> {
        let now = Utc::now();
        let module = event.voucher_module();
        let txn = self.db.begin().await.map_err(map_db_err)?;

        PartyRepository::ensure_active(&txn, event.party_id()).await?;
        if let BusinessEvent::Transfer(transfer) = event {
            PartyRepository::ensure_active(&txn, transfer.receiving_party).await?;
        }

        let config = self.resolve_config(&txn, module).await?;
        let allocation =
            VoucherRepository::allocate(&txn, module, &config, event_date(event)).await?;
        let plan = plan_for(event, &allocation.voucher_number)
            .map_err(|err| AppError::Validation(err.to_string()))?;

        let document_id = Uuid::now_v7();
        let (source, transaction_code) = match event {
            BusinessEvent::Metal(e) => {
                MetalTransactionRepository::insert(
                    &txn,
                    document_id,
                    e,
                    &allocation.voucher_number,
                    DocumentStatus::Confirmed,
                    created_by,
                    now,
                )
                .await?;
                (SourceRef::MetalTransaction(document_id), None)
            }
            BusinessEvent::Entry(e) => {
                EntryRepository::insert(
                    &txn,
                    document_id,
                    e,
                    &allocation.voucher_number,
                    DocumentStatus::Confirmed,
                    created_by,
                    now,
                )
                .await?;
                (SourceRef::Entry(document_id), None)
            }
            BusinessEvent::Fixing(e) => {
                let code = unique_fixing_code(&txn, e.fixing_type).await?;
                FixingRepository::insert(
                    &txn,
                    document_id,
                    e,
                    &code,
                    &allocation.voucher_number,
                    DocumentStatus::Confirmed,
                    created_by,
                    now,
                )
                .await?;
                (SourceRef::Fixing(document_id), Some(code))
            }
            BusinessEvent::Transfer(e) => {
                let code = unique_transfer_code(&txn, e.date.year()).await?;
                FundTransferRepository::insert(
                    &txn,
                    document_id,
                    e,
                    &code,
                    &allocation.voucher_number,
                    DocumentStatus::Confirmed,
                    created_by,
                    now,
                )
                .await?;
                (SourceRef::FundTransfer(document_id), Some(code))
            }
        };

        let rows_posted = apply_plan(&txn, source, &plan, created_by, now).await?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(
            voucher = %allocation.voucher_number,
            module = %module,
            rows = rows_posted,
            "posted business event"
        );
        Ok(PostingReceipt {
            document_id,
            voucher_number: allocation.voucher_number,
            transaction_code,
            rows_posted,
        })
    }

    async fn amend_once(
        &self,
        source: SourceRef,
        event: &BusinessEvent,
        created_by: Uuid,
    ) -> AppResult<PostingReceipt> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let (stored, voucher_number, transaction_code) = load_stored(&txn, source).await?;
        ensure_reversible(&txn, source).await?;
        if stored.voucher_module() != event.voucher_module() {
            return Err(AppError::Validation(
                "the voucher module of a document cannot change on update".into(),
            ));
        }

        let old_plan = plan_for(&stored, &voucher_number)
            .map_err(|err| AppError::Internal(format!("stored payload no longer plans: {err}")))?;
        reverse_plan(&txn, source, &old_plan, created_by, now).await?;

        let new_plan = plan_for(event, &voucher_number)
            .map_err(|err| AppError::Validation(err.to_string()))?;
        let rows_posted = apply_plan(&txn, source, &new_plan, created_by, now).await?;

        replace_document(&txn, source, event, now).await?;
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(voucher = %voucher_number, rows = rows_posted, "amended business event");
        Ok(PostingReceipt {
            document_id: source.entity_id(),
            voucher_number,
            transaction_code,
            rows_posted,
        })
    }

    async fn delete_once(&self, source: SourceRef, created_by: Uuid) -> AppResult<u64> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let (stored, voucher_number, _) = load_stored(&txn, source).await?;
        ensure_reversible(&txn, source).await?;
        let old_plan = plan_for(&stored, &voucher_number)
            .map_err(|err| AppError::Internal(format!("stored payload no longer plans: {err}")))?;
        let retracted = reverse_plan(&txn, source, &old_plan, created_by, now).await?;

        match source {
            SourceRef::MetalTransaction(id) => MetalTransactionRepository::delete(&txn, id).await?,
            SourceRef::Entry(id) => EntryRepository::delete(&txn, id).await?,
            SourceRef::Fixing(id) => FixingRepository::delete(&txn, id).await?,
            SourceRef::FundTransfer(id) => FundTransferRepository::delete(&txn, id).await?,
        }
        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(voucher = %voucher_number, rows = retracted, "deleted business event");
        Ok(retracted)
    }

    async fn change_status(&self, source: SourceRef, to: DocumentStatus) -> AppResult<()> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let current = load_status(&txn, source).await?;
        let next = current
            .transition(to)
            .map_err(|err| AppError::State(err.to_string()))?;
        store_status(&txn, source, next, now).await?;
        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }

    /// Resolves a voucher configuration through the TTL cache.
    async fn resolve_config<C: ConnectionTrait>(
        &self,
        db: &C,
        module: VoucherModule,
    ) -> AppResult<VoucherConfig> {
        if let Some(config) = self.cache.get(module) {
            return Ok((*config).clone());
        }
        let config = VoucherRepository::load_config(db, module).await?;
        self.cache.insert(module, config.clone());
        Ok(config)
    }
}

// ========== Plan application ==========

/// Writes one plan: ledger rows, balance mutations, collateral.
async fn apply_plan<C: ConnectionTrait>(
    db: &C,
    source: SourceRef,
    plan: &PostingPlan,
    created_by: Uuid,
    now: DateTime<Utc>,
) -> AppResult<usize> {
    let rows = RegistryRepository::append(db, source, &plan.rows, created_by, now).await?;

    for party_delta in &plan.deltas {
        let mut balances = PartyRepository::load_balances(db, party_delta.party_id).await?;
        let materialized = apply_delta(
            party_delta.party_id,
            &mut balances,
            &party_delta.delta,
            &AllowNegative,
            now,
        )
        .map_err(|err| AppError::State(err.to_string()))?;
        PartyRepository::save_balances(db, party_delta.party_id, &balances, &materialized, now)
            .await?;
    }

    if let SourceRef::Fixing(fixing_id) = source {
        FixingPriceRepository::insert_for_fixing(db, fixing_id, &plan.collateral.fixing_prices, now)
            .await
            .map_err(map_db_err)?;
    }
    for effect in &plan.collateral.cash_account_effects {
        CashAccountRepository::apply_effect(db, effect, created_by, now).await?;
    }

    Ok(rows)
}

/// Undoes one previously applied plan.
///
/// Rows are retracted by source (not re-posted inverted), fixing prices are
/// deleted by source, and balances and cash accounts take the inverted
/// deltas and effects.
async fn reverse_plan<C: ConnectionTrait>(
    db: &C,
    source: SourceRef,
    original: &PostingPlan,
    created_by: Uuid,
    now: DateTime<Utc>,
) -> AppResult<u64> {
    let retracted = RegistryRepository::retract(db, source).await?;

    let inverted = original.inverted();
    for party_delta in &inverted.deltas {
        let mut balances = PartyRepository::load_balances(db, party_delta.party_id).await?;
        let materialized = apply_delta(
            party_delta.party_id,
            &mut balances,
            &party_delta.delta,
            &AllowNegative,
            now,
        )
        .map_err(|err| AppError::State(err.to_string()))?;
        PartyRepository::save_balances(db, party_delta.party_id, &balances, &materialized, now)
            .await?;
    }

    if let SourceRef::Fixing(fixing_id) = source {
        FixingPriceRepository::delete_for_fixing(db, fixing_id)
            .await
            .map_err(map_db_err)?;
    }
    for effect in &inverted.collateral.cash_account_effects {
        CashAccountRepository::apply_effect(db, effect, created_by, now).await?;
    }

    Ok(retracted)
}

// ========== Document plumbing ==========

/// Loads a document's stored event, voucher number, and transaction code.
async fn load_stored<C: ConnectionTrait>(
    db: &C,
    source: SourceRef,
) -> AppResult<(BusinessEvent, String, Option<String>)> {
    let loaded = match source {
        SourceRef::MetalTransaction(id) => {
            let model = MetalTransactionRepository::find(db, id).await?;
            let event = serde_json::from_value(model.payload)
                .map_err(|err| AppError::Internal(format!("corrupt stored payload: {err}")))?;
            (BusinessEvent::Metal(event), model.voucher_number, None)
        }
        SourceRef::Entry(id) => {
            let model = EntryRepository::find(db, id).await?;
            let event = serde_json::from_value(model.payload)
                .map_err(|err| AppError::Internal(format!("corrupt stored payload: {err}")))?;
            (BusinessEvent::Entry(event), model.voucher_number, None)
        }
        SourceRef::Fixing(id) => {
            let model = FixingRepository::find(db, id).await?;
            let event = serde_json::from_value(model.payload)
                .map_err(|err| AppError::Internal(format!("corrupt stored payload: {err}")))?;
            (
                BusinessEvent::Fixing(event),
                model.voucher_number,
                Some(model.transaction_code),
            )
        }
        SourceRef::FundTransfer(id) => {
            let model = FundTransferRepository::find(db, id).await?;
            let event = serde_json::from_value(model.payload)
                .map_err(|err| AppError::Internal(format!("corrupt stored payload: {err}")))?;
            (
                BusinessEvent::Transfer(event),
                model.voucher_number,
                Some(model.transaction_code),
            )
        }
    };
    Ok(loaded)
}

/// Loads a document's current status.
async fn load_status<C: ConnectionTrait>(db: &C, source: SourceRef) -> AppResult<DocumentStatus> {
    let status = match source {
        SourceRef::MetalTransaction(id) => MetalTransactionRepository::find(db, id).await?.status,
        SourceRef::Entry(id) => EntryRepository::find(db, id).await?.status,
        SourceRef::Fixing(id) => FixingRepository::find(db, id).await?.status,
        SourceRef::FundTransfer(id) => FundTransferRepository::find(db, id).await?.status,
    };
    from_wire(&status).map_err(map_db_err)
}

/// Writes a new status onto a document row.
async fn store_status<C: ConnectionTrait>(
    db: &C,
    source: SourceRef,
    status: DocumentStatus,
    now: DateTime<Utc>,
) -> AppResult<()> {
    match source {
        SourceRef::MetalTransaction(id) => {
            let model = MetalTransactionRepository::find(db, id).await?;
            MetalTransactionRepository::set_status(db, model, status, now).await?;
        }
        SourceRef::Entry(id) => {
            let model = EntryRepository::find(db, id).await?;
            EntryRepository::set_status(db, model, status, now).await?;
        }
        SourceRef::Fixing(id) => {
            let model = FixingRepository::find(db, id).await?;
            FixingRepository::set_status(db, model, status, now).await?;
        }
        SourceRef::FundTransfer(id) => {
            let model = FundTransferRepository::find(db, id).await?;
            FundTransferRepository::set_status(db, model, status, now).await?;
        }
    }
    Ok(())
}

/// Rejects reversal of documents in a terminal state.
async fn ensure_reversible<C: ConnectionTrait>(db: &C, source: SourceRef) -> AppResult<()> {
    let status = load_status(db, source).await?;
    if status.is_terminal() {
        return Err(AppError::State(format!(
            "document {} is cancelled and cannot be reversed",
            source.entity_id()
        )));
    }
    Ok(())
}

/// Writes an amended event back onto its document row.
async fn replace_document<C: ConnectionTrait>(
    db: &C,
    source: SourceRef,
    event: &BusinessEvent,
    now: DateTime<Utc>,
) -> AppResult<()> {
    match (source, event) {
        (SourceRef::MetalTransaction(id), BusinessEvent::Metal(e)) => {
            let model = MetalTransactionRepository::find(db, id).await?;
            MetalTransactionRepository::replace_payload(db, model, e, now).await?;
        }
        (SourceRef::Entry(id), BusinessEvent::Entry(e)) => {
            let model = EntryRepository::find(db, id).await?;
            EntryRepository::replace_payload(db, model, e, now).await?;
        }
        (SourceRef::Fixing(id), BusinessEvent::Fixing(e)) => {
            let model = FixingRepository::find(db, id).await?;
            FixingRepository::replace_payload(db, model, e, now).await?;
        }
        (SourceRef::FundTransfer(id), BusinessEvent::Transfer(e)) => {
            let model = FundTransferRepository::find(db, id).await?;
            FundTransferRepository::replace_payload(db, model, e, now).await?;
        }
        _ => {
            return Err(AppError::Validation(
                "amended event kind does not match the document".into(),
            ));
        }
    }
    Ok(())
}

// ========== Helpers ==========

/// Validates an event before any transaction is opened.
fn validate(event: &BusinessEvent) -> AppResult<()> {
    use goldbook_core::posting::{
        validate_entry, validate_fixing, validate_metal, validate_transfer,
    };
    let result = match event {
        BusinessEvent::Metal(e) => validate_metal(e),
        BusinessEvent::Entry(e) => validate_entry(e),
        BusinessEvent::Fixing(e) => validate_fixing(e),
        BusinessEvent::Transfer(e) => validate_transfer(e),
    };
    result.map_err(|err| AppError::Validation(err.to_string()))
}

/// True if the event variant matches the source kind.
const fn kinds_match(source: SourceRef, event: &BusinessEvent) -> bool {
    matches!(
        (source, event),
        (SourceRef::MetalTransaction(_), BusinessEvent::Metal(_))
            | (SourceRef::Entry(_), BusinessEvent::Entry(_))
            | (SourceRef::Fixing(_), BusinessEvent::Fixing(_))
            | (SourceRef::FundTransfer(_), BusinessEvent::Transfer(_))
    )
}

/// The document date a voucher allocation is stamped with.
const fn event_date(event: &BusinessEvent) -> NaiveDate {
    match event {
        BusinessEvent::Metal(e) => e.voucher_date,
        BusinessEvent::Entry(e) => e.date,
        BusinessEvent::Fixing(e) => e.date,
        BusinessEvent::Transfer(e) => e.date,
    }
}

/// Draws a fixing code not yet taken.
async fn unique_fixing_code<C: ConnectionTrait>(
    db: &C,
    fixing_type: FixingType,
) -> AppResult<String> {
    for _ in 0..CODE_ATTEMPTS {
        let code = ids::fixing_code(fixing_type);
        if !FixingRepository::code_exists(db, &code).await? {
            return Ok(code);
        }
    }
    Err(AppError::Internal(
        "could not draw a free fixing transaction code".into(),
    ))
}

/// Draws a transfer code not yet taken.
async fn unique_transfer_code<C: ConnectionTrait>(db: &C, year: i32) -> AppResult<String> {
    for _ in 0..CODE_ATTEMPTS {
        let code = ids::transfer_code(year);
        if !FundTransferRepository::code_exists(db, &code).await? {
            return Ok(code);
        }
    }
    Err(AppError::Internal(
        "could not draw a free transfer transaction code".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldbook_core::events::{FundTransferEvent, TransferType};
    use goldbook_core::events::AssetType;
    use goldbook_shared::types::PartyId;
    use rust_decimal_macros::dec;

    fn transfer_event() -> BusinessEvent {
        BusinessEvent::Transfer(FundTransferEvent {
            transfer_type: TransferType::Transfer,
            asset_type: AssetType::Gold,
            sending_party: PartyId::new(),
            receiving_party: PartyId::new(),
            value: dec!(10),
            currency: None,
            cost_center: None,
            date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        })
    }

    #[test]
    fn test_kinds_match() {
        let event = transfer_event();
        assert!(kinds_match(SourceRef::FundTransfer(Uuid::now_v7()), &event));
        assert!(!kinds_match(SourceRef::Fixing(Uuid::now_v7()), &event));
    }

    #[test]
    fn test_event_date_picks_document_date() {
        let event = transfer_event();
        assert_eq!(
            event_date(&event),
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
        );
    }

    #[test]
    fn test_validation_errors_are_not_retryable() {
        let bad = BusinessEvent::Transfer(FundTransferEvent {
            transfer_type: TransferType::Transfer,
            asset_type: AssetType::Cash,
            sending_party: PartyId::new(),
            receiving_party: PartyId::new(),
            value: dec!(10),
            // Cash transfers must name a currency.
            currency: None,
            cost_center: None,
            date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        });
        let err = validate(&bad).unwrap_err();
        assert!(!err.is_retryable());
        assert_eq!(err.status_code(), 400);
    }
}
