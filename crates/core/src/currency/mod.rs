//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Always round converted cash to 4 decimal places
//! - Use banker's rounding (round half to even)
//! - Store both original and converted amounts

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for cash amounts.
pub const CASH_DECIMALS: u32 = 4;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
#[must_use]
pub fn convert(amount: Decimal, rate: Decimal) -> Decimal {
    (amount * rate).round_dp_with_strategy(CASH_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

/// Rounds a cash value to the standard 4 decimal places.
#[must_use]
pub fn round_cash(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CASH_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_basic() {
        assert_eq!(convert(dec!(100), dec!(1.5)), dec!(150.0000));
    }

    #[test]
    fn test_convert_same_currency_rate_one() {
        assert_eq!(convert(dec!(100.50), Decimal::ONE), dec!(100.5000));
    }

    #[test]
    fn test_convert_rounds_to_4_decimals() {
        assert_eq!(convert(dec!(100), dec!(1.23456789)), dec!(123.4568));
    }

    #[test]
    fn test_bankers_rounding_midpoint_to_even() {
        // 0.00025 -> 0.0002 (nearest even), 0.00035 -> 0.0004
        assert_eq!(round_cash(dec!(0.00025)), dec!(0.0002));
        assert_eq!(round_cash(dec!(0.00035)), dec!(0.0004));
    }
}
