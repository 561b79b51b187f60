//! # Money Module
//!
//! Provides the `Money` type for handling monetary values exactly.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A budget check "sum <= 0.30" would then reject 0.10 + 0.20.            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 20 = 30 cents, and 30 <= 30 ✓                                   │
//! │                                                                         │
//! │  Prices carry at most 2 fraction digits, so cents are exact.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//! let total = price + Money::from_cents(500);
//! assert_eq!(total.to_string(), "15.99");
//!
//! let parsed: Money = "15.99".parse().unwrap();
//! assert_eq!(parsed, total);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of minor units in one major unit.
const CENTS_PER_UNIT: i128 = 100;

/// Longest integer part we bother parsing before treating the value as out of range.
const MAX_PARSED_INTEGER_DIGITS: usize = 24;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: budgets may be zero or negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as cents**: every amount on the wire is an integer
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──┬──► Combination.total (sum of 2-3 prices)
///                       │
///                       └──► × stock_quantity ──► InventoryValue (i128)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the integer (major unit) portion, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).units(), 10);
    /// assert_eq!(Money::from_cents(-550).units(), -5);
    /// ```
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// let a = Money::from_cents(1000);
    /// assert_eq!(a.checked_add(Money::from_cents(500)), Some(Money::from_cents(1500)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_add(a), None);
    /// ```
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Value of `qty` units at this price. Exact for any `i64` inputs.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000); // 10.00
    /// assert_eq!(unit_price.times_quantity(5).cents(), 5000);
    /// ```
    #[inline]
    pub const fn times_quantity(self, qty: i64) -> InventoryValue {
        // |i64::MIN|² = 2^126 still fits in i128
        InventoryValue(self.0 as i128 * qty as i128)
    }

    /// Parses a decimal amount with at most two fraction digits.
    ///
    /// Accepts `12`, `12.5`, `12.50`, `-3.25`, `+7`. Rejects `1.234`,
    /// `1.`, `.`, `abc` and amounts that do not fit in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal_str("12.5").unwrap().cents(), 1250);
    /// assert!(Money::from_decimal_str("12.345").is_err());
    /// ```
    pub fn from_decimal_str(input: &str) -> Result<Money, ValidationError> {
        let parts = DecimalParts::parse(input)?;

        if parts.fraction.len() > 2 {
            return Err(invalid_amount("at most 2 decimal places are allowed"));
        }

        parts
            .truncated_cents()
            .and_then(|cents| i64::try_from(cents).ok())
            .map(Money)
            .ok_or_else(|| invalid_amount("amount is out of range"))
    }

    /// Parses a decimal amount of any scale, rounding down to whole cents.
    ///
    /// Used for budgets: every price sum is a whole number of cents, so
    /// `sum <= budget` holds exactly when `sum <= floor_cents(budget)`.
    /// Budgets outside the `i64` range saturate.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// assert_eq!(Money::floor_from_decimal_str("30.009").unwrap().cents(), 3000);
    /// assert_eq!(Money::floor_from_decimal_str("-0.001").unwrap().cents(), -1);
    /// ```
    pub fn floor_from_decimal_str(input: &str) -> Result<Money, ValidationError> {
        let parts = DecimalParts::parse(input)?;

        let Some(truncated) = parts.truncated_cents() else {
            return Ok(if parts.negative {
                Money(i64::MIN)
            } else {
                Money(i64::MAX)
            });
        };

        let has_remainder = parts.fraction.bytes().skip(2).any(|b| b != b'0');
        let floored = if parts.negative && has_remainder {
            truncated - 1
        } else {
            truncated
        };

        let clamped = floored.clamp(i64::MIN as i128, i64::MAX as i128);
        Ok(Money(clamped as i64))
    }
}

// =============================================================================
// Inventory Value
// =============================================================================

/// A stock valuation in cents: `price × quantity`, or a sum of those.
///
/// Prices go up to 9,999,999,999.99 and stock up to 2^31 - 1, so a single
/// product can be worth ~2.1 × 10^21 cents, past `i64`. Valuations are
/// kept in `i128`, leaving room for ~8 × 10^16 such products.
///
/// ```text
/// MAX_PRICE_CENTS × MAX_STOCK_QUANTITY = 2_147_483_646_997_852_516_353
/// i64::MAX                             =         9_223_372_036_854_775_807
/// ```
///
/// Serializes as a plain JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryValue(i128);

impl InventoryValue {
    /// Creates a valuation from cents.
    #[inline]
    pub const fn from_cents(cents: i128) -> Self {
        InventoryValue(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i128 {
        self.0
    }

    /// Zero valuation.
    #[inline]
    pub const fn zero() -> Self {
        InventoryValue(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two valuations, saturating at the `i128` bounds.
    ///
    /// Sums of validated products never get near them.
    #[inline]
    pub const fn saturating_add(self, other: InventoryValue) -> InventoryValue {
        InventoryValue(self.0.saturating_add(other.0))
    }
}

impl From<Money> for InventoryValue {
    fn from(money: Money) -> Self {
        InventoryValue(money.0 as i128)
    }
}

/// Same rendering as [`Money`]: `21474836469978525163.53`.
impl fmt::Display for InventoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
    }
}

// =============================================================================
// Decimal Parsing
// =============================================================================

/// A syntactically valid decimal literal split into its pieces.
struct DecimalParts<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
}

impl<'a> DecimalParts<'a> {
    fn parse(input: &'a str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => {
                if fraction.is_empty() {
                    return Err(invalid_amount("missing digits after decimal point"));
                }
                (integer, fraction)
            }
            None => (unsigned, ""),
        };

        if integer.is_empty() && fraction.is_empty() {
            return Err(invalid_amount("no digits"));
        }

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(integer) || !all_digits(fraction) {
            return Err(invalid_amount("must be a decimal number like 12.50"));
        }

        Ok(DecimalParts {
            negative,
            integer,
            fraction,
        })
    }

    /// Signed cents with fraction digits past the second dropped.
    /// `None` when the integer part is too long to represent.
    fn truncated_cents(&self) -> Option<i128> {
        let integer = self.integer.trim_start_matches('0');
        if integer.len() > MAX_PARSED_INTEGER_DIGITS {
            return None;
        }

        let units: i128 = if integer.is_empty() {
            0
        } else {
            integer.parse().ok()?
        };

        let mut minor: i128 = 0;
        for (place, b) in [10i128, 1].iter().zip(self.fraction.bytes().chain(std::iter::repeat(b'0'))) {
            minor += place * i128::from(b - b'0');
        }

        let magnitude = units.checked_mul(CENTS_PER_UNIT)?.checked_add(minor)?;
        Some(if self.negative { -magnitude } else { magnitude })
    }
}

fn invalid_amount(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as a plain decimal with two fraction digits (`-12.05`).
///
/// Currency symbols and grouping are left to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Strict parsing, see [`Money::from_decimal_str`].
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_decimal_str(s)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
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
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
    }

    #[test]
    fn test_checked_add_reports_overflow() {
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_times_quantity_past_i64() {
        let value = Money::from_cents(999_999_999_999).times_quantity(i32::MAX as i64);
        assert_eq!(value.cents(), 2_147_483_646_997_852_516_353);
        assert_eq!(value.to_string(), "21474836469978525163.53");

        let extreme = Money::from_cents(i64::MIN).times_quantity(i64::MIN);
        assert_eq!(extreme.cents(), 1i128 << 126);
    }

    #[test]
    fn test_inventory_value_display_and_json() {
        assert_eq!(InventoryValue::from_cents(59_000).to_string(), "590.00");
        assert_eq!(InventoryValue::from_cents(-5).to_string(), "-0.05");
        assert_eq!(InventoryValue::from(Money::from_cents(1099)).cents(), 1099);

        let json = serde_json::to_string(&InventoryValue::from_cents(4_294_967_293_995_705_032_706))
            .unwrap();
        assert_eq!(json, "4294967293995705032706");
    }

    #[test]
    fn test_inventory_value_saturates() {
        let max = InventoryValue::from_cents(i128::MAX);
        assert_eq!(max.saturating_add(InventoryValue::from_cents(1)), max);
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(Money::from_decimal_str("10").unwrap().cents(), 1000);
        assert_eq!(Money::from_decimal_str("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::from_decimal_str("10.05").unwrap().cents(), 1005);
        assert_eq!(Money::from_decimal_str("0.30").unwrap().cents(), 30);
        assert_eq!(Money::from_decimal_str(".75").unwrap().cents(), 75);
        assert_eq!(Money::from_decimal_str(" -3.25 ").unwrap().cents(), -325);
        assert_eq!(Money::from_decimal_str("+7").unwrap().cents(), 700);
        assert_eq!(
            Money::from_decimal_str("9999999999.99").unwrap().cents(),
            999_999_999_999
        );
    }

    #[test]
    fn test_parse_strict_rejects() {
        assert!(matches!(
            Money::from_decimal_str(""),
            Err(ValidationError::Required { .. })
        ));
        for bad in ["1.234", "1.", ".", "-", "abc", "1,50", "1e3", "--1", "1.-5"] {
            assert!(
                matches!(
                    Money::from_decimal_str(bad),
                    Err(ValidationError::InvalidFormat { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
        assert!(Money::from_decimal_str("100000000000000000000").is_err());
    }

    #[test]
    fn test_parse_floor_for_budgets() {
        assert_eq!(Money::floor_from_decimal_str("30").unwrap().cents(), 3000);
        assert_eq!(Money::floor_from_decimal_str("30.00").unwrap().cents(), 3000);
        assert_eq!(Money::floor_from_decimal_str("30.009").unwrap().cents(), 3000);
        assert_eq!(Money::floor_from_decimal_str("30.0000").unwrap().cents(), 3000);
        assert_eq!(Money::floor_from_decimal_str("-0.001").unwrap().cents(), -1);
        assert_eq!(Money::floor_from_decimal_str("-2.500").unwrap().cents(), -250);
        assert_eq!(Money::floor_from_decimal_str("0").unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_floor_saturates() {
        let huge = "9".repeat(40);
        assert_eq!(
            Money::floor_from_decimal_str(&huge).unwrap(),
            Money::from_cents(i64::MAX)
        );
        assert_eq!(
            Money::floor_from_decimal_str(&format!("-{huge}")).unwrap(),
            Money::from_cents(i64::MIN)
        );
        assert!(Money::floor_from_decimal_str("ten").is_err());
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(3000)).unwrap();
        assert_eq!(json, "3000");
    }
}
