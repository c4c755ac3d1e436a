//! Metal purchase/sale transaction payloads.

use chrono::NaiveDate;
use goldbook_shared::types::{CurrencyCode, PartyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::voucher::VoucherModule;

/// Metal transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetalTransactionType {
    /// Purchase of metal from a party.
    Purchase,
    /// Sale of metal to a party.
    Sale,
    /// Return of a prior purchase.
    PurchaseReturn,
    /// Return of a prior sale.
    SaleReturn,
    /// Export sale (posted like a sale).
    ExportSale,
    /// Import purchase (posted like a purchase).
    ImportPurchase,
    /// Return of an export sale.
    ExportSaleReturn,
    /// Return of an import purchase.
    ImportPurchaseReturn,
}

/// The posting direction of a metal transaction: either stock flows in
/// (purchase side) or out (sale side).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetalFlow {
    /// Metal flows into our stock.
    Purchase,
    /// Metal flows out of our stock.
    Sale,
}

impl MetalTransactionType {
    /// Splits the type into its base flow and whether it is a return.
    ///
    /// Returns are posted as a full sign-flip of the base flow.
    #[must_use]
    pub const fn flow(self) -> (MetalFlow, bool) {
        match self {
            Self::Purchase | Self::ImportPurchase => (MetalFlow::Purchase, false),
            Self::Sale | Self::ExportSale => (MetalFlow::Sale, false),
            Self::PurchaseReturn | Self::ImportPurchaseReturn => (MetalFlow::Purchase, true),
            Self::SaleReturn | Self::ExportSaleReturn => (MetalFlow::Sale, true),
        }
    }

    /// Returns true if this is a return type.
    #[must_use]
    pub const fn is_return(self) -> bool {
        self.flow().1
    }

    /// The voucher module this transaction type counts against.
    #[must_use]
    pub const fn voucher_module(self) -> VoucherModule {
        match self.flow() {
            (MetalFlow::Purchase, false) => VoucherModule::MetalPurchase,
            (MetalFlow::Sale, false) => VoucherModule::MetalSale,
            (MetalFlow::Purchase, true) => VoucherModule::PurchaseReturn,
            (MetalFlow::Sale, true) => VoucherModule::SalesReturn,
        }
    }
}

/// Monetary decomposition of one stock item, used for analytic ledger rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTotal {
    /// Value of the metal itself (pure weight x rate).
    pub metal_value: Decimal,
    /// Making charges component.
    pub making_charges: Decimal,
    /// Premium (positive) or discount (negative) component.
    pub premium: Decimal,
    /// Other charges component.
    pub other_charges: Decimal,
    /// VAT component.
    pub vat_amount: Decimal,
    /// Item total amount in base currency.
    pub total_amount: Decimal,
}

/// One line of metal in a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    /// Inventory stock code this line refers to.
    pub stock_code: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Gross weight in grams.
    pub gross_weight: Decimal,
    /// Purity fraction (0.995 for 995 fineness).
    pub purity: Decimal,
    /// Pure weight in grams (gross x purity, pre-computed by the caller).
    pub pure_weight: Decimal,
    /// Metal rate per gram applied to this line.
    pub metal_rate: Decimal,
    /// Monetary decomposition for analytic rows.
    pub item_total: ItemTotal,
}

/// A metal purchase/sale business event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalTransactionEvent {
    /// Transaction type.
    pub transaction_type: MetalTransactionType,
    /// Counterparty.
    pub party_id: PartyId,
    /// Voucher date of the document.
    pub voucher_date: NaiveDate,
    /// Settlement currency for the cash side.
    pub settlement_currency: CurrencyCode,
    /// Rate from the settlement currency to base currency.
    pub party_currency_rate: Decimal,
    /// Stock lines; must be non-empty.
    pub stock_items: Vec<StockItem>,
    /// Total amount in the settlement currency.
    pub total_amount: Decimal,
}

impl MetalTransactionEvent {
    /// Sum of pure weights across all stock lines.
    #[must_use]
    pub fn total_pure_weight(&self) -> Decimal {
        self.stock_items.iter().map(|i| i.pure_weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_base_types() {
        assert_eq!(
            MetalTransactionType::Purchase.flow(),
            (MetalFlow::Purchase, false)
        );
        assert_eq!(MetalTransactionType::Sale.flow(), (MetalFlow::Sale, false));
        assert_eq!(
            MetalTransactionType::ImportPurchase.flow(),
            (MetalFlow::Purchase, false)
        );
        assert_eq!(
            MetalTransactionType::ExportSale.flow(),
            (MetalFlow::Sale, false)
        );
    }

    #[test]
    fn test_flow_returns() {
        assert!(MetalTransactionType::PurchaseReturn.is_return());
        assert!(MetalTransactionType::SaleReturn.is_return());
        assert!(MetalTransactionType::ExportSaleReturn.is_return());
        assert!(MetalTransactionType::ImportPurchaseReturn.is_return());
        assert!(!MetalTransactionType::Purchase.is_return());
    }

    #[test]
    fn test_voucher_module_mapping() {
        assert_eq!(
            MetalTransactionType::Purchase.voucher_module(),
            VoucherModule::MetalPurchase
        );
        assert_eq!(
            MetalTransactionType::ExportSale.voucher_module(),
            VoucherModule::MetalSale
        );
        assert_eq!(
            MetalTransactionType::PurchaseReturn.voucher_module(),
            VoucherModule::PurchaseReturn
        );
        assert_eq!(
            MetalTransactionType::SaleReturn.voucher_module(),
            VoucherModule::SalesReturn
        );
    }
}
