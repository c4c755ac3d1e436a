//! Randomized human-facing transaction codes.
//!
//! Codes are drawn at random and checked for collisions by the engine;
//! uniqueness is ultimately enforced by the database indexes.

use goldbook_core::events::FixingType;
use rand::Rng;

/// A fund transfer code of shape `TXN-{year}-{NNN}`.
pub(crate) fn transfer_code(year: i32) -> String {
    format!("TXN-{year}-{:03}", rand::rng().random_range(0..1000_u32))
}

/// A fixing code of shape `PUR#####` or `SEL#####`.
pub(crate) fn fixing_code(fixing_type: FixingType) -> String {
    let prefix = match fixing_type {
        FixingType::Purchase => "PUR",
        FixingType::Sale => "SEL",
    };
    format!("{prefix}{:05}", rand::rng().random_range(0..100_000_u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_code_shape() {
        let code = transfer_code(2026);
        assert!(code.starts_with("TXN-2026-"));
        assert_eq!(code.len(), 12);
        assert!(code[9..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_fixing_code_shape() {
        let purchase = fixing_code(FixingType::Purchase);
        assert!(purchase.starts_with("PUR"));
        assert_eq!(purchase.len(), 8);
        assert!(purchase[3..].chars().all(|c| c.is_ascii_digit()));

        let sale = fixing_code(FixingType::Sale);
        assert!(sale.starts_with("SEL"));
    }
}
