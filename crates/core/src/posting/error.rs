//! Posting-rule validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating an event payload or deriving its plan.
///
/// Every variant is a caller mistake; the engine maps them to validation
/// failures before any mutation happens.
#[derive(Debug, Error)]
pub enum PostingError {
    // ========== Shape ==========
    /// A line collection that must be non-empty is empty.
    #[error("{what} must contain at least one line")]
    EmptyLines {
        /// What was empty (stock items, orders, cash lines).
        what: &'static str,
    },

    /// An entry's kind and its line shape disagree.
    #[error("Entry kind '{kind}' does not match the supplied line shape")]
    ShapeMismatch {
        /// The offending entry kind.
        kind: &'static str,
    },

    // ========== Numerics ==========
    /// A quantity that must be positive is zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositiveQuantity {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },

    /// A rate that must be positive is zero or negative.
    #[error("{field} must be a positive rate, got {value}")]
    NonPositiveRate {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },

    /// The document total does not equal the sum of its line totals.
    #[error("Document total {document} does not match line total {lines}")]
    TotalMismatch {
        /// Total carried on the document.
        document: Decimal,
        /// Sum of the line totals.
        lines: Decimal,
    },

    // ========== Fixing ==========
    /// A fixing order carries no usable weight.
    #[error("Fixing order carries neither pure weight, quantity, nor gross weight")]
    MissingWeight,

    // ========== Transfer ==========
    /// A cash transfer without a currency.
    #[error("Cash transfers must name a currency")]
    MissingCurrency,

    /// A transfer between a party and itself.
    #[error("Sending and receiving party must differ")]
    SameParty,
}
