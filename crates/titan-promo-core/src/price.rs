//! # Price Module
//!
//! Provides the `Price` type for monetary amounts flowing through the
//! discount pipeline.
//!
//! ## Why Not Integer Cents Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CAMPAIGN MATH IS FRACTIONAL                                            │
//! │                                                                         │
//! │  Campaign sources publish rates and amounts as decimals:               │
//! │    discountRate: 12.5   amount: 19.99                                  │
//! │                                                                         │
//! │  "Buy 3, cheapest free" averages across the line:                      │
//! │    90.00 × 2 / 3 = 60.00                                               │
//! │    10.00 × 2 / 3 = 6.666…  ← no exact cent value exists                │
//! │                                                                         │
//! │  We keep the full f64 result and let the presentation layer round.     │
//! │  Currency handling (rounding, symbols) is out of scope here.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use titan_promo_core::price::Price;
//!
//! let unit = Price::new(12.5);
//! let line = unit.multiply_quantity(4);   // 50.00
//! let after = (line - Price::new(60.0)).clamp_non_negative();
//! assert!(after.is_zero());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

// =============================================================================
// Price Type
// =============================================================================

/// A monetary amount in the catalog's currency unit.
///
/// ## Design Decisions
/// - **f64**: campaign parameters are decimal and results may be fractional
/// - **Single field tuple struct**: serializes as a bare JSON number
/// - **No Ord**: f64 is only partially ordered; comparisons use `PartialOrd`
///
/// ## Where Price is Used
/// ```text
/// CartLine.unit_price ──► × quantity ──► line original ──► Discount ──► line total
///                                                                          │
/// Catalog price ──► Discount Calculator ──► discounted price              ▼
///                                                                 CartTotals.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Price(f64);

impl Price {
    /// Creates a price from a raw amount.
    ///
    /// No validation happens here; inputs from callers are checked by
    /// [`crate::validation`] before they become prices.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Price(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Returns a zero price.
    #[inline]
    pub const fn zero() -> Self {
        Price(0.0)
    }

    /// Checks if the amount is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Raises negative amounts to zero.
    ///
    /// ## Example
    /// ```rust
    /// use titan_promo_core::price::Price;
    ///
    /// assert_eq!(Price::new(-10.0).clamp_non_negative(), Price::zero());
    /// assert_eq!(Price::new(7.5).clamp_non_negative(), Price::new(7.5));
    /// ```
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        Price(self.0.max(0.0))
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use titan_promo_core::price::Price;
    ///
    /// let line_total = Price::new(2.5).multiply_quantity(3);
    /// assert_eq!(line_total.value(), 7.5);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Price(self.0 * qty as f64)
    }

    /// Checks that the amount is finite and not negative.
    #[inline]
    pub fn is_valid_amount(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two decimal places, no currency symbol.
///
/// Currency formatting belongs to the frontend.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Price(self.0 + other.0)
    }
}

impl Sub for Price {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Price(self.0 - other.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
