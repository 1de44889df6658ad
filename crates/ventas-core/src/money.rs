//! # Money Module
//!
//! Provides the `Money` type used to accumulate sale totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The gateway sends costs as JSON numbers (f64):                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: convert once at the boundary, add in cents               │
//! │    Money::from_decimal(0.1) + Money::from_decimal(0.2) = 30 cents  ✅   │
//! │    (30 cents).to_decimal() = 0.3                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ventas_core::money::Money;
//!
//! let cost = Money::from_decimal(10.0).unwrap();
//! let total = cost + Money::from_decimal(5.5).unwrap();
//! assert_eq!(total.cents(), 1550);
//! assert_eq!(total.to_decimal(), 15.5);
//!
//! // NaN and infinities are not money
//! assert!(Money::from_decimal(f64::NAN).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.unit_cost (f64) ──► Product::cost() ──► line cost × quantity
///                                                       │
///                         SaleDraft.total (Money) ◄─────┘ (sum)
///                                 │
///                                 ▼
///                  Sale.total (f64) on the wire via to_decimal()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount received from the gateway, rounding to the
    /// nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the `i64` cent
    /// range. Callers decide what an invalid amount means; the sale total
    /// treats it as zero.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(10.99).unwrap().cents(), 1099);
    /// assert_eq!(Money::from_decimal(0.005).unwrap().cents(), 1);
    /// assert!(Money::from_decimal(f64::INFINITY).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the amount as the decimal number the gateway expects.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// `None` when the sum leaves the cent range.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Line cost × quantity, `None` when the product leaves the cent range.
    ///
    /// ## Example
    /// ```rust
    /// use ventas_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(550).checked_mul(3), Some(Money::from_cents(1650)));
    /// assert!(Money::from_cents(i64::MAX / 2).checked_mul(3).is_none());
    /// ```
    #[inline]
    pub const fn checked_mul(self, qty: u32) -> Option<Money> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `$x.xx` rendering for logs. Tables go through the CLI's display
/// settings.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturates at the ends of the cent range.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

/// Line cost × quantity, saturating.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0.saturating_mul(i64::from(qty)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
