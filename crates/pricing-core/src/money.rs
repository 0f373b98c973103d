//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On a tax invoice that is not a rounding quirk, it is a compliance     │
//! │  defect: CGST + SGST must equal the stated total to the paisa.         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹10.00 = 1000 paise. Every GST component is computed in integer     │
//! │    paise with round-half-up, so each figure on the invoice is exact    │
//! │    and independently verifiable.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Discipline
//! Every monetary component (CGST, SGST, IGST, discount) is rounded
//! half-up to the paisa **independently, before summing**. The summed total
//! can therefore differ from `round(subtotal × rate)` by at most one paisa.
//! That tolerance is accepted and load-bearing: it keeps every line of an
//! invoice independently verifiable, and it must not be "fixed" without
//! re-baselining invoice compatibility.
//!
//! ## Usage
//! ```rust
//! use pricing_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(1099); // ₹10.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // ₹21.98
//! let total = price + Money::from_paise(500); // ₹15.99
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the engine flows through this type: product
/// subtotals, discounts, GST components, shipping fees, grand totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

/// Integer division of `n / d` rounded half-up, for non-negative `n`.
///
/// `(2n + d) / (2d)` adds exactly half the divisor before truncating, which
/// is round-half-up regardless of whether `d` is even. i128 intermediates
/// prevent overflow on large amounts.
#[inline]
const fn div_round_half_up(n: i128, d: i128) -> i64 {
    ((2 * n + d) / (2 * d)) as i64
}

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // Represents ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    ///
    /// let price = Money::from_rupees(1000); // ₹1000.00
    /// assert_eq!(price.paise(), 100_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_rupees_paise(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// A basis-point share of this amount, rounded half-up.
    ///
    /// `1 bps = 0.01%`, so `bps_share(1800)` is 18% of the amount. This is
    /// the single rounding primitive behind IGST, percentage discounts, and
    /// everything else that takes "x% of an amount".
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    ///
    /// let subtotal = Money::from_rupees(1000);
    /// // 18% of ₹1000.00 = ₹180.00
    /// assert_eq!(subtotal.bps_share(1800), Money::from_paise(18_000));
    /// ```
    pub fn bps_share(&self, bps: u32) -> Money {
        Money(div_round_half_up(self.0 as i128 * bps as i128, 10_000))
    }

    /// Half of a basis-point share, rounded half-up.
    ///
    /// CGST and SGST are each half the nominal rate; rounding the half-share
    /// directly (instead of halving a rounded full share) is what keeps
    /// `cgst == sgst` exact for odd totals.
    pub fn half_bps_share(&self, bps: u32) -> Money {
        Money(div_round_half_up(self.0 as i128 * bps as i128, 20_000))
    }

    /// Full GST at the given rate, rounded half-up.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    /// use pricing_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupees(1000);
    /// let igst = subtotal.gst_at(TaxRate::from_bps(1800)); // 18%
    /// assert_eq!(igst, Money::from_paise(18_000)); // ₹180.00
    /// ```
    #[inline]
    pub fn gst_at(&self, rate: TaxRate) -> Money {
        self.bps_share(rate.bps())
    }

    /// Half GST at the given rate (one of the CGST/SGST pair), rounded
    /// half-up.
    #[inline]
    pub fn gst_half_at(&self, rate: TaxRate) -> Money {
        self.half_bps_share(rate.bps())
    }

    /// Strips GST at the given rate from a tax-inclusive amount, returning
    /// the pre-tax amount rounded half-up.
    ///
    /// `before = inclusive / (1 + rate)`, in integer paise:
    /// `inclusive × 10000 / (10000 + bps)`.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::money::Money;
    /// use pricing_core::types::TaxRate;
    ///
    /// let inclusive = Money::from_rupees(1180);
    /// let before = inclusive.before_tax(TaxRate::from_bps(1800));
    /// assert_eq!(before, Money::from_rupees(1000));
    /// ```
    pub fn before_tax(&self, rate: TaxRate) -> Money {
        let divisor = 10_000 + rate.bps() as i128;
        Money(div_round_half_up(self.0 as i128 * 10_000, divisor))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and error messages. Storefront display formatting
/// (locale, lakh/crore grouping) lives in the frontend.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
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

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
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

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
