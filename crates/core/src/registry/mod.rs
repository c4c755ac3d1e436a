//! Registry ledger row model.
//!
//! The Registry is the append-mostly ledger; every business event projects
//! into one or more rows defined here. Rows are immutable once appended and
//! are only ever removed by a source-scoped retraction.

mod types;

pub use types::{LedgerType, RegistryDraftRow, Side, SourceRef};
