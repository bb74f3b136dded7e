//! # Money Module
//!
//! Provides the `Money` type used to *display* prices and cart totals.
//!
//! ## Where Floats Stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The product API reports prices as JSON numbers (floats):              │
//! │    { "price": 109.95 }                                                  │
//! │                                                                         │
//! │  Product.price (f64) ──► Cart::total() (f64 sum)                        │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                    Money::from_price() ← rounds ONCE to cents           │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                         "$109.95" in the view                          │
//! │                                                                         │
//! │  Arithmetic on the source values stays in f64 so totals match the      │
//! │  API's own numbers; rounding happens at the display edge only.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_price(109.95);
//! assert_eq!(price.cents(), 10995);
//! assert_eq!(price.to_string(), "$109.95");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// A monetary value in cents (USD implied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts an API price (dollars as a float) to cents.
    ///
    /// Rounds half away from zero, matching `toFixed(2)` for the values
    /// the catalog API produces. Non-finite input maps to zero.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_price(22.3).cents(), 2230);
    /// assert_eq!(Money::from_price(0.1 + 0.2).cents(), 30);
    /// assert_eq!(Money::from_price(f64::NAN).cents(), 0);
    /// ```
    pub fn from_price(price: f64) -> Self {
        if !price.is_finite() {
            return Money::zero();
        }
        Money((price * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Formats with an arbitrary currency symbol, two decimals.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1234).format_with("€"), "€12.34");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_price_rounds_to_cents() {
        assert_eq!(Money::from_price(109.95).cents(), 10995);
        assert_eq!(Money::from_price(7.95).cents(), 795);
        assert_eq!(Money::from_price(9.85).cents(), 985);
        assert_eq!(Money::from_price(0.0).cents(), 0);
    }

    #[test]
    fn test_from_price_absorbs_float_noise() {
        // 0.1 + 0.2 = 0.30000000000000004
        assert_eq!(Money::from_price(0.1 + 0.2).cents(), 30);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert!(Money::from_price(f64::NAN).is_zero());
        assert!(Money::from_price(f64::INFINITY).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
    }
}
