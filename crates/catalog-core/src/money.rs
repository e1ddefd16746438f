//! # Money Module
//!
//! Provides the `Money` type for handling prices and discounts exactly.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing discounts as doubles:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    "1.99" is parsed straight into 199, never through an f64             │
//! │    Discount totals per rating are exact sums of integers                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::money::Money;
//!
//! let price: Money = "1.99".parse().unwrap();
//! assert_eq!(price.cents(), 199);
//!
//! let mut total = price;
//! total += Money::from_cents(1);
//! assert_eq!(total.cents(), 200);
//! ```

use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents, pence, kopeks...).
///
/// The catalog is currency-agnostic: the locale formatter decides which
/// symbol to print next to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns `rate_bps` basis points of this amount, rounded half-up to the
    /// minor unit.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::money::Money;
    ///
    /// // 10% of 1.99 = 0.199 → 0.20
    /// let discount = Money::from_cents(199).percentage(1000);
    /// assert_eq!(discount.cents(), 20);
    /// ```
    pub fn percentage(&self, rate_bps: u32) -> Money {
        // i128 so large prices cannot overflow before the division
        let scaled = self.0 as i128 * rate_bps as i128;
        let rounded = if scaled >= 0 {
            (scaled + 5000) / 10000
        } else {
            (scaled - 5000) / 10000
        };
        Money(rounded as i64)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a plain decimal string ("12", "1.9", "1.99", "-0.50").
///
/// At most two fractional digits are accepted; anything finer would need
/// rounding and is rejected instead.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: format!("'{}' {}", s, reason),
        };

        let text = s.trim();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("is not a decimal number"));
        }
        if minor_str.len() > 2 || !minor_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("must have at most two decimal places"));
        }

        let major: i64 = major_str
            .parse()
            .map_err(|_| invalid("is out of range"))?;
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid("is invalid"))? * 10,
            _ => minor_str.parse().map_err(|_| invalid("is invalid"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("is out of range"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering ("10.99"), no currency symbol.
///
/// Record files use this; user-facing text goes through a locale formatter.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
    }

    #[test]
    fn test_parse_exact() {
        assert_eq!("1.99".parse::<Money>().unwrap().cents(), 199);
        assert_eq!("2.5".parse::<Money>().unwrap().cents(), 250);
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!(" 0.10 ".parse::<Money>().unwrap().cents(), 10);
        assert_eq!("-0.50".parse::<Money>().unwrap().cents(), -50);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.999".parse::<Money>().is_err());
        assert!(".5".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("1e3".parse::<Money>().is_err());
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(Money::from_cents(1000).percentage(1000).cents(), 100);
        // 0.195 → 0.20
        assert_eq!(Money::from_cents(195).percentage(1000).cents(), 20);
        // 0.194 → 0.19
        assert_eq!(Money::from_cents(194).percentage(1000).cents(), 19);
        assert_eq!(Money::from_cents(1000).percentage(0).cents(), 0);
    }

    #[test]
    fn test_add_assign() {
        let mut total = Money::default();
        for cents in [100, 200, 300] {
            total += Money::from_cents(cents);
        }
        assert_eq!(total.cents(), 600);
        assert!(Money::default().is_zero());
    }
}
