//! Metal weight helpers.
//!
//! Weights are expressed in grams with `Decimal` precision. Pure weight is
//! gross weight scaled by purity (grams of the underlying precious metal).

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for gram weights.
pub const WEIGHT_DECIMALS: u32 = 3;

/// Computes the pure weight from a gross weight and a purity fraction.
///
/// Purity is a fraction (0.995 for 995 fineness), not a percentage. The
/// result is rounded to 3 decimal places with banker's rounding to keep
/// aggregated stock weights stable.
#[must_use]
pub fn pure_weight(gross_weight: Decimal, purity: Decimal) -> Decimal {
    (gross_weight * purity)
        .round_dp_with_strategy(WEIGHT_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pure_weight() {
        // 100g of 995 fineness holds 99.5g of fine gold
        assert_eq!(pure_weight(dec!(100), dec!(0.995)), dec!(99.500));
    }

    #[test]
    fn test_pure_weight_rounds_to_three_places() {
        assert_eq!(pure_weight(dec!(11.117), dec!(0.9166)), dec!(10.190));
    }

    #[test]
    fn test_full_purity_is_identity() {
        assert_eq!(pure_weight(dec!(250.125), Decimal::ONE), dec!(250.125));
    }
}
