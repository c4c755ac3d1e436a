//! Voucher configuration and module types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by voucher resolution and rendering.
#[derive(Debug, Error)]
pub enum VoucherError {
    /// No active voucher configuration exists for the module.
    #[error("Voucher configuration not found for module '{0}'")]
    ConfigNotFound(String),

    /// The module name is not one the allocator knows.
    #[error("Unknown voucher module '{0}'")]
    UnknownModule(String),

    /// The configured prefix is malformed.
    #[error("Invalid voucher prefix '{0}': expected 1-5 uppercase alphanumerics")]
    InvalidPrefix(String),
}

/// The collection a module's "prior transactions" are counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCollection {
    /// Receipt/payment entries, filtered by entry type.
    Entries,
    /// Metal transactions, filtered by transaction type.
    MetalTransactions,
    /// Transaction fixings, filtered by fixing type.
    Fixings,
    /// Fund transfers, filtered by transfer type.
    FundTransfers,
    /// Metal stock definitions, filtered by reference type.
    MetalStocks,
    /// Registry rows scoped to inventory opening balances.
    Registry,
    /// Draft metal documents; uses the max-suffix scan, not a count.
    Draftings,
}

/// Voucher module: the per-document-kind numbering domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoucherModule {
    /// Metal payment entries.
    MetalPayment,
    /// Metal receipt entries.
    MetalReceipt,
    /// Currency payment entries.
    CurrencyPayment,
    /// Currency receipt entries.
    CurrencyReceipt,
    /// Generic cash entries.
    Entry,
    /// Metal purchases.
    MetalPurchase,
    /// Metal sales.
    MetalSale,
    /// Purchase returns.
    PurchaseReturn,
    /// Sales returns.
    SalesReturn,
    /// Sale fixings.
    SalesFixing,
    /// Purchase fixings.
    PurchaseFixing,
    /// Fund transfers.
    Transfer,
    /// Opening balance transfers.
    OpeningBalance,
    /// Metal stock definitions.
    MetalStock,
    /// Opening stock balances, counted in the registry.
    OpeningStockBalance,
    /// Draft metal documents; max-suffix numbering.
    DraftMetal,
}

impl VoucherModule {
    /// The canonical lowercase module name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MetalPayment => "metal-payment",
            Self::MetalReceipt => "metal-receipt",
            Self::CurrencyPayment => "currency-payment",
            Self::CurrencyReceipt => "currency-receipt",
            Self::Entry => "entry",
            Self::MetalPurchase => "metal-purchase",
            Self::MetalSale => "metal-sale",
            Self::PurchaseReturn => "purchase-return",
            Self::SalesReturn => "sales-return",
            Self::SalesFixing => "sales-fixing",
            Self::PurchaseFixing => "purchase-fixing",
            Self::Transfer => "transfer",
            Self::OpeningBalance => "opening-balance",
            Self::MetalStock => "metal-stock",
            Self::OpeningStockBalance => "opening-stock-balance",
            Self::DraftMetal => "draft-metal",
        }
    }

    /// The collection prior documents are counted in (exhaustive map).
    #[must_use]
    pub const fn collection(self) -> SourceCollection {
        match self {
            Self::MetalPayment
            | Self::MetalReceipt
            | Self::CurrencyPayment
            | Self::CurrencyReceipt
            | Self::Entry => SourceCollection::Entries,
            Self::MetalPurchase
            | Self::MetalSale
            | Self::PurchaseReturn
            | Self::SalesReturn => SourceCollection::MetalTransactions,
            Self::SalesFixing | Self::PurchaseFixing => SourceCollection::Fixings,
            Self::Transfer | Self::OpeningBalance => SourceCollection::FundTransfers,
            Self::MetalStock => SourceCollection::MetalStocks,
            Self::OpeningStockBalance => SourceCollection::Registry,
            Self::DraftMetal => SourceCollection::Draftings,
        }
    }

    /// True if numbering uses the draft max-suffix scan instead of a count.
    #[must_use]
    pub const fn uses_max_suffix(self) -> bool {
        matches!(self, Self::DraftMetal)
    }
}

impl std::fmt::Display for VoucherModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoucherModule {
    type Err = VoucherError;

    /// Case-insensitive, anchored match on the module name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let module = match normalized.as_str() {
            "metal-payment" => Self::MetalPayment,
            "metal-receipt" => Self::MetalReceipt,
            "currency-payment" => Self::CurrencyPayment,
            "currency-receipt" => Self::CurrencyReceipt,
            "entry" => Self::Entry,
            "metal-purchase" => Self::MetalPurchase,
            "metal-sale" => Self::MetalSale,
            "purchase-return" => Self::PurchaseReturn,
            "sales-return" => Self::SalesReturn,
            "sales-fixing" => Self::SalesFixing,
            "purchase-fixing" => Self::PurchaseFixing,
            "transfer" => Self::Transfer,
            "opening-balance" => Self::OpeningBalance,
            "metal-stock" => Self::MetalStock,
            "opening-stock-balance" => Self::OpeningStockBalance,
            "draft-metal" => Self::DraftMetal,
            _ => return Err(VoucherError::UnknownModule(s.to_string())),
        };
        Ok(module)
    }
}

/// Date format configured per voucher module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFormat {
    /// `DD/MM/YYYY`
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    /// `MM/DD/YYYY`
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    /// `YYYY-MM-DD` (ISO), the default.
    #[default]
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
}

impl DateFormat {
    /// Renders a date in this format.
    #[must_use]
    pub fn render(self, date: NaiveDate) -> String {
        match self {
            Self::DayMonthYear => date.format("%d/%m/%Y").to_string(),
            Self::MonthDayYear => date.format("%m/%d/%Y").to_string(),
            Self::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// A voucher configuration, as read from the voucher master.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherConfig {
    /// Uppercase alphanumeric prefix, 1-5 characters.
    pub prefix: String,
    /// Zero-padded number length, default 4.
    pub number_length: u32,
    /// Date format stamped onto allocations.
    pub date_format: DateFormat,
    /// Whether the advisory sequence counter is bumped on generate.
    pub is_auto_increment: bool,
    /// Advisory sequence counter; the rendered string is authoritative.
    pub sequence: i64,
    /// Human-facing voucher type label.
    pub voucher_type: String,
}

impl VoucherConfig {
    /// Validates the configured prefix shape.
    pub fn validate_prefix(&self) -> Result<(), VoucherError> {
        let ok = (1..=5).contains(&self.prefix.len())
            && self
                .prefix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if ok {
            Ok(())
        } else {
            Err(VoucherError::InvalidPrefix(self.prefix.clone()))
        }
    }
}

/// The result of a voucher allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherAllocation {
    /// The rendered voucher number, e.g. `SAL0007`.
    pub voucher_number: String,
    /// The sequence the number was rendered from.
    pub sequence: u64,
    /// Voucher type label from the configuration.
    pub voucher_type: String,
    /// Prefix used.
    pub prefix: String,
    /// The allocation date.
    pub date: NaiveDate,
    /// The date rendered in the configured format.
    pub formatted_date: String,
}
