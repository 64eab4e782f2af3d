//! # Money Module
//!
//! Provides the `Money` type for handling menu prices and order totals.
//!
//! ## Representation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WIRE (JSON)              CORE                    STORAGE (SQLite)      │
//! │                                                                         │
//! │  "price": 25.5   ──────►  Money(2550)  ──────►   price_cents = 2550    │
//! │  "price": 25.5   ◄──────  Money(2550)  ◄──────   price_cents = 2550    │
//! │                                                                         │
//! │  Inbound prices are parsed from the decimal text of the number.        │
//! │  No float arithmetic ever touches a stored amount.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tableside_core::money::Money;
//!
//! let price = Money::parse_decimal("12.90").unwrap();
//! let line_total = price.multiply_quantity(3).unwrap();
//! assert_eq!(line_total.cents(), 3870);
//! assert_eq!(line_total.to_string(), "38.70");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::ValidationError;

/// Number of fractional digits carried by a price.
const SCALE: u32 = 2;
const CENTS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► Order.price (snapshot at order time)
///                        │
///                        ▼
///              OrderLine.total = price × quantity
///                        │
///                        ▼
///              SessionSummary.total = Σ totals
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use tableside_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Returns `None` when the product does not fit in an `i64` of cents.
    ///
    /// ```rust
    /// use tableside_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).unwrap().cents(), 897);
    /// assert!(Money::from_cents(i64::MAX).multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Parses a decimal string in major units into cents.
    ///
    /// ## Rules
    /// - Optional leading `-`
    /// - Digits, optionally followed by `.` and at most two digits
    /// - Must fit in an `i64` number of cents
    ///
    /// ## Example
    /// ```rust
    /// use tableside_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("25.5").unwrap().cents(), 2550);
    /// assert_eq!(Money::parse_decimal("7").unwrap().cents(), 700);
    /// assert!(Money::parse_decimal("1.999").is_err());
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(ValidationError::invalid_format("price", "must be a decimal number"));
        }

        if fraction.len() > SCALE as usize {
            return Err(ValidationError::invalid_format(
                "price",
                "must have at most two decimal places",
            ));
        }

        let overflow = || ValidationError::invalid_format("price", "is too large");

        let whole: i64 = whole.parse().map_err(|_| overflow())?;
        // "5" → 50 cents, "05" → 5 cents
        let fraction_cents: i64 = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", fraction, width = SCALE as usize);
            padded.parse().map_err(|_| overflow())?
        };

        let cents = whole
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(fraction_cents))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders major units with two decimals, e.g. `25.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / CENTS_PER_UNIT as u64,
            abs % CENTS_PER_UNIT as u64
        )
    }
}

// =============================================================================
// JSON Representation
// =============================================================================

/// Serializes as a JSON number in major units.
///
/// Whole amounts are written as integers (`51`), others as the shortest
/// decimal (`25.5`).
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % CENTS_PER_UNIT == 0 {
            serializer.serialize_i64(self.0 / CENTS_PER_UNIT)
        } else {
            serializer.serialize_f64(self.0 as f64 / CENTS_PER_UNIT as f64)
        }
    }
}

/// Accepts JSON numbers only. Floats are read back through their shortest
/// decimal rendering so that `25.5` becomes exactly 2550 cents.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number with at most two decimal places")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(CENTS_PER_UNIT)
            .map(Money)
            .ok_or_else(|| E::custom("price is too large"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map_err(|_| E::custom("price is too large"))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("price must be a finite number"));
        }
        // f64 Display never uses exponent notation
        Money::parse_decimal(&v.to_string()).map_err(E::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("25.50").unwrap().cents(), 2550);
        assert_eq!(Money::parse_decimal("25.5").unwrap().cents(), 2550);
        assert_eq!(Money::parse_decimal("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse_decimal("12").unwrap().cents(), 1200);
        assert_eq!(Money::parse_decimal("-3.10").unwrap().cents(), -310);
    }

    #[test]
    fn test_parse_decimal_rejects_bad_input() {
        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal(".5").is_err());
        assert!(Money::parse_decimal("1.234").is_err());
        assert!(Money::parse_decimal("1,50").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(2550).to_string(), "25.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_serialize_as_major_units() {
        assert_eq!(serde_json::to_string(&Money::from_cents(2550)).unwrap(), "25.5");
        assert_eq!(serde_json::to_string(&Money::from_cents(5100)).unwrap(), "51");
        assert_eq!(serde_json::to_string(&Money::from_cents(10)).unwrap(), "0.1");
        assert_eq!(serde_json::to_string(&Money::zero()).unwrap(), "0");
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let m: Money = serde_json::from_str("25.5").unwrap();
        assert_eq!(m.cents(), 2550);

        let m: Money = serde_json::from_str("0.1").unwrap();
        assert_eq!(m.cents(), 10);

        let m: Money = serde_json::from_str("19.99").unwrap();
        assert_eq!(m.cents(), 1999);

        let m: Money = serde_json::from_str("8").unwrap();
        assert_eq!(m.cents(), 800);
    }

    #[test]
    fn test_deserialize_rejects_strings_and_excess_precision() {
        assert!(serde_json::from_str::<Money>("\"25.50\"").is_err());
        assert!(serde_json::from_str::<Money>("25.555").is_err());
        assert!(serde_json::from_str::<Money>("null").is_err());
    }

    #[test]
    fn test_checked_arithmetic() {
        let line = Money::from_cents(2550).multiply_quantity(2).unwrap();
        let total = line.checked_add(Money::from_cents(300)).unwrap();
        assert_eq!(total.cents(), 5400);

        // 5e16 in major units times 2 no longer fits in cents
        let huge = Money::from_cents(5_000_000_000_000_000_000);
        assert!(huge.multiply_quantity(2).is_none());
        assert!(Money::from_cents(i64::MAX)
            .checked_add(Money::from_cents(1))
            .is_none());
    }

    #[test]
    fn test_largest_price_times_largest_quantity_fits() {
        let price = Money::from_cents(crate::MAX_PRICE_CENTS);
        let total = price.multiply_quantity(crate::MAX_ORDER_QUANTITY).unwrap();
        assert_eq!(total.cents(), 99_900_000_000);
    }
}
