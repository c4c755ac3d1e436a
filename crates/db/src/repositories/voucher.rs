//! Voucher repository: configuration lookup and gapless allocation.
//!
//! Sequences are not stored counters. The next number is derived from the
//! committed documents themselves (`count + 1` inside the allocating
//! transaction), so a rolled-back posting never burns a number. Draft metal
//! documents are the one exception: deleted drafts keep their numbers, so
//! that module scans for the highest used suffix instead.

use chrono::NaiveDate;
use goldbook_core::voucher::{
    next_from_count, next_from_draft_codes, render_number, DateFormat, SourceCollection,
    VoucherAllocation, VoucherConfig, VoucherModule,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};

use crate::entities::{
    draftings, entries, fund_transfers, metal_stocks, metal_transactions, registry_rows,
    transaction_fixings, voucher_masters,
};
use crate::wire::from_wire;

/// Error types for voucher operations.
#[derive(Debug, thiserror::Error)]
pub enum VoucherRepoError {
    /// No active configuration for the module.
    #[error("Voucher configuration not found for module '{0}'")]
    ConfigNotFound(VoucherModule),

    /// The stored configuration is malformed.
    #[error("Invalid voucher configuration for module '{module}': {reason}")]
    InvalidConfig {
        /// Module whose configuration failed to load.
        module: VoucherModule,
        /// What was wrong with it.
        reason: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository over voucher configurations and numbering.
pub struct VoucherRepository;

impl VoucherRepository {
    /// Loads the active configuration for a module.
    pub async fn load_config<C: ConnectionTrait>(
        db: &C,
        module: VoucherModule,
    ) -> Result<VoucherConfig, VoucherRepoError> {
        let master = voucher_masters::Entity::find()
            .filter(voucher_masters::Column::Module.eq(module.as_str()))
            .filter(voucher_masters::Column::IsActive.eq(true))
            .one(db)
            .await?
            .ok_or(VoucherRepoError::ConfigNotFound(module))?;

        let date_format: DateFormat =
            from_wire(&master.date_format).map_err(|err| VoucherRepoError::InvalidConfig {
                module,
                reason: err.to_string(),
            })?;
        let number_length =
            u32::try_from(master.number_length).map_err(|_| VoucherRepoError::InvalidConfig {
                module,
                reason: format!("negative number length {}", master.number_length),
            })?;

        let config = VoucherConfig {
            prefix: master.prefix,
            number_length,
            date_format,
            is_auto_increment: master.is_auto_increment,
            sequence: master.sequence,
            voucher_type: master.voucher_type,
        };
        config
            .validate_prefix()
            .map_err(|err| VoucherRepoError::InvalidConfig {
                module,
                reason: err.to_string(),
            })?;
        Ok(config)
    }

    /// Allocates the next voucher number for a module.
    ///
    /// Must run inside the same transaction that inserts the document; the
    /// unique index on the voucher column turns a concurrent allocation of
    /// the same number into a retryable conflict.
    pub async fn allocate<C: ConnectionTrait>(
        db: &C,
        module: VoucherModule,
        config: &VoucherConfig,
        date: NaiveDate,
    ) -> Result<VoucherAllocation, VoucherRepoError> {
        let sequence = Self::next_sequence(db, module, config).await?;
        let voucher_number = render_number(&config.prefix, sequence, config.number_length);

        if config.is_auto_increment {
            Self::bump_sequence(db, module).await?;
        }

        Ok(VoucherAllocation {
            voucher_number,
            sequence,
            voucher_type: config.voucher_type.clone(),
            prefix: config.prefix.clone(),
            date,
            formatted_date: config.date_format.render(date),
        })
    }

    /// Derives the next sequence from the module's source collection.
    pub async fn next_sequence<C: ConnectionTrait>(
        db: &C,
        module: VoucherModule,
        config: &VoucherConfig,
    ) -> Result<u64, VoucherRepoError> {
        let sequence = match module.collection() {
            SourceCollection::Entries => {
                let count = entries::Entity::find()
                    .filter(entries::Column::EntryType.is_in(type_filters(module).iter().copied()))
                    .count(db)
                    .await?;
                next_from_count(count)
            }
            SourceCollection::MetalTransactions => {
                let count = metal_transactions::Entity::find()
                    .filter(
                        metal_transactions::Column::TransactionType.is_in(type_filters(module).iter().copied()),
                    )
                    .count(db)
                    .await?;
                next_from_count(count)
            }
            SourceCollection::Fixings => {
                let count = transaction_fixings::Entity::find()
                    .filter(transaction_fixings::Column::FixingType.is_in(type_filters(module).iter().copied()))
                    .count(db)
                    .await?;
                next_from_count(count)
            }
            SourceCollection::FundTransfers => {
                let count = fund_transfers::Entity::find()
                    .filter(fund_transfers::Column::TransferType.is_in(type_filters(module).iter().copied()))
                    .count(db)
                    .await?;
                next_from_count(count)
            }
            SourceCollection::MetalStocks => {
                let count = metal_stocks::Entity::find()
                    .filter(metal_stocks::Column::ReferenceType.is_in(type_filters(module).iter().copied()))
                    .count(db)
                    .await?;
                next_from_count(count)
            }
            SourceCollection::Registry => {
                let count = registry_rows::Entity::find()
                    .filter(registry_rows::Column::Reference.starts_with(&config.prefix))
                    .count(db)
                    .await?;
                next_from_count(count)
            }
            SourceCollection::Draftings => {
                let codes: Vec<String> = draftings::Entity::find()
                    .select_only()
                    .column(draftings::Column::VoucherCode)
                    .filter(draftings::Column::VoucherCode.starts_with(&config.prefix))
                    .into_tuple()
                    .all(db)
                    .await?;
                next_from_draft_codes(codes.iter().map(String::as_str), &config.prefix)
            }
        };
        Ok(sequence)
    }

    /// Bumps the advisory sequence counter.
    async fn bump_sequence<C: ConnectionTrait>(
        db: &C,
        module: VoucherModule,
    ) -> Result<(), VoucherRepoError> {
        voucher_masters::Entity::update_many()
            .col_expr(
                voucher_masters::Column::Sequence,
                Expr::col(voucher_masters::Column::Sequence).add(1),
            )
            .filter(voucher_masters::Column::Module.eq(module.as_str()))
            .filter(voucher_masters::Column::IsActive.eq(true))
            .exec(db)
            .await?;
        Ok(())
    }
}

/// The stored type strings a module's documents carry.
///
/// Counting is per module, and several document types fold into one module
/// (import purchases count as metal purchases, both cash entry kinds count
/// as plain entries).
const fn type_filters(module: VoucherModule) -> &'static [&'static str] {
    match module {
        VoucherModule::MetalPurchase => &["purchase", "importPurchase"],
        VoucherModule::MetalSale => &["sale", "exportSale"],
        VoucherModule::PurchaseReturn => &["purchaseReturn", "importPurchaseReturn"],
        VoucherModule::SalesReturn => &["saleReturn", "exportSaleReturn"],
        VoucherModule::Entry => &["cash-receipt", "cash-payment"],
        VoucherModule::MetalReceipt => &["metal-receipt"],
        VoucherModule::MetalPayment => &["metal-payment"],
        VoucherModule::CurrencyReceipt => &["currency-receipt"],
        VoucherModule::CurrencyPayment => &["currency-payment"],
        VoucherModule::SalesFixing => &["SALE"],
        VoucherModule::PurchaseFixing => &["PURCHASE"],
        VoucherModule::Transfer => &["transfer"],
        VoucherModule::OpeningBalance => &["opening-balance"],
        VoucherModule::MetalStock => &["metal-stock"],
        // Counted by reference prefix, not a type column.
        VoucherModule::OpeningStockBalance | VoucherModule::DraftMetal => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goldbook_core::events::{EntryKind, MetalTransactionType};
    use serde_json::Value;

    fn wire_name<T: serde::Serialize>(value: &T) -> String {
        match serde_json::to_value(value) {
            Ok(Value::String(s)) => s,
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn test_type_filters_match_event_wire_names() {
        assert!(type_filters(VoucherModule::MetalPurchase)
            .contains(&wire_name(&MetalTransactionType::Purchase).as_str()));
        assert!(type_filters(VoucherModule::MetalPurchase)
            .contains(&wire_name(&MetalTransactionType::ImportPurchase).as_str()));
        assert!(type_filters(VoucherModule::SalesReturn)
            .contains(&wire_name(&MetalTransactionType::SaleReturn).as_str()));
        assert!(type_filters(VoucherModule::Entry)
            .contains(&wire_name(&EntryKind::CashReceipt).as_str()));
        assert!(type_filters(VoucherModule::Entry)
            .contains(&wire_name(&EntryKind::CashPayment).as_str()));
        assert!(type_filters(VoucherModule::CurrencyReceipt)
            .contains(&wire_name(&EntryKind::CurrencyReceipt).as_str()));
    }

    #[test]
    fn test_every_counted_module_folds_each_type_once() {
        // A document type must count towards exactly one module, otherwise
        // two modules would hand out overlapping numbers from one table.
        let metal_modules = [
            VoucherModule::MetalPurchase,
            VoucherModule::MetalSale,
            VoucherModule::PurchaseReturn,
            VoucherModule::SalesReturn,
        ];
        let mut seen = Vec::new();
        for module in metal_modules {
            for ty in type_filters(module) {
                assert!(!seen.contains(ty), "type {ty} counted twice");
                seen.push(ty);
            }
        }
        assert_eq!(seen.len(), 8);
    }
}
