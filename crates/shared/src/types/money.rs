//! Monetary value types with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! These types wrap `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ISO-4217-style currency code, stored uppercase.
///
/// The set of currencies is data-driven (party account definitions), so this
/// is a validated newtype rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a currency code, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not 3-5 ASCII alphabetic characters.
    pub fn new(code: &str) -> Result<Self, String> {
        let trimmed = code.trim();
        if !(3..=5).contains(&trimmed.len()) || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Invalid currency code: {code}"));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A signed cash amount in a specific currency.
///
/// Positive means payable to the party, negative means receivable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashAmount {
    /// Currency of the amount.
    pub currency: CurrencyCode,
    /// Signed amount.
    pub amount: Decimal,
}

impl CashAmount {
    /// Creates a new cash amount.
    #[must_use]
    pub const fn new(currency: CurrencyCode, amount: Decimal) -> Self {
        Self { currency, amount }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            currency,
            amount: Decimal::ZERO,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns the negated amount in the same currency.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            currency: self.currency.clone(),
            amount: -self.amount,
        }
    }
}
