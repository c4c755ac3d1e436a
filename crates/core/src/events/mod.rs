//! Typed business-event payloads.
//!
//! Each event kind the posting engine reacts to is a tagged type here, so the
//! posting rules can match exhaustively instead of sniffing payload shapes.

pub mod entry;
pub mod fixing;
pub mod metal;
pub mod transfer;

pub use entry::{CashLine, EntryEvent, EntryKind, EntryLines, StockLine};
pub use fixing::{FixingEvent, FixingOrder, FixingType, ForexValue};
pub use metal::{ItemTotal, MetalFlow, MetalTransactionEvent, MetalTransactionType, StockItem};
pub use transfer::{AssetType, FundTransferEvent, TransferType};
