//! # Error Types
//!
//! Domain-specific error types for pricing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pricing-core errors (this file)                                       │
//! │  ├── PricingError     - Tax/totals computation failures                │
//! │  ├── CouponError      - Coupon rejections (recoverable)                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → API layer → Storefront         │
//! │                                                                         │
//! │  CouponError is special: it is surfaced to the shopper as a rejection  │
//! │  message and the checkout continues WITHOUT a discount. It never       │
//! │  aborts an order.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (coupon code, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Pricing Error
// =============================================================================

/// Pricing computation errors.
///
/// For a well-formed, non-negative order amount the engine is total: none of
/// these fire on the happy path. They exist to reject caller bugs early
/// instead of producing a nonsense invoice.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A monetary input was negative.
    ///
    /// ## When This Occurs
    /// - A caller passes a negative subtotal into tax or totals assembly
    /// - A refund flow hands a negative tax-inclusive amount to the
    ///   reverse calculator
    ///
    /// Negative amounts are always a caller bug; the engine refuses to
    /// compute on them rather than silently producing a negative invoice.
    #[error("invalid monetary amount: {amount}")]
    InvalidAmount { amount: Money },

    /// A rate table was constructed without the mandatory `default` entry.
    ///
    /// Unknown categories fall back to the `default` rate, so a table
    /// without one cannot answer every lookup.
    #[error("rate table must define a 'default' category entry")]
    MissingDefaultRate,

    /// Seller configuration failed validation at startup.
    #[error("invalid seller configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Coupon rejection (wraps CouponError).
    #[error("coupon rejected: {0}")]
    Coupon(#[from] CouponError),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Coupon Error
// =============================================================================

/// Coupon rejection reasons.
///
/// These are recoverable: the storefront shows the message and the order
/// proceeds without a discount. `Clone`/`PartialEq` so the totals assembler
/// can carry the rejection alongside the computed totals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    /// The coupon's validity window does not cover the current time.
    /// Covers both a past `valid_until` and a future `valid_from`.
    #[error("coupon {code} has expired or is not yet valid")]
    Expired { code: String },

    /// The coupon has been deactivated by an administrator.
    #[error("coupon {code} is not active")]
    Inactive { code: String },

    /// The coupon's redemption budget is spent.
    #[error("coupon {code} has reached its usage limit of {limit}")]
    UsageExceeded { code: String, limit: u32 },

    /// The order is too small for this coupon.
    #[error("coupon {code} requires a minimum order of {minimum}, order is {order_amount}")]
    MinimumNotMet {
        code: String,
        minimum: Money,
        order_amount: Money,
    },

    /// No coupon with this code exists.
    #[error("coupon code '{code}' not found")]
    NotFound { code: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller-supplied data doesn't meet requirements.
/// Used for early validation before any money math runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed GSTIN).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PricingError::InvalidAmount {
            amount: Money::from_paise(-100),
        };
        assert_eq!(err.to_string(), "invalid monetary amount: -₹1.00");

        let err = CouponError::MinimumNotMet {
            code: "FEST10".to_string(),
            minimum: Money::from_rupees(500),
            order_amount: Money::from_rupees(300),
        };
        assert_eq!(
            err.to_string(),
            "coupon FEST10 requires a minimum order of ₹500.00, order is ₹300.00"
        );
    }

    #[test]
    fn test_coupon_error_converts_to_pricing_error() {
        let coupon_err = CouponError::Inactive {
            code: "OLD".to_string(),
        };
        let err: PricingError = coupon_err.into();
        assert!(matches!(err, PricingError::Coupon(_)));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "state".to_string(),
        };
        assert_eq!(err.to_string(), "state is required");

        let err = ValidationError::InvalidFormat {
            field: "gstin".to_string(),
            reason: "must be 15 characters".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "gstin has invalid format: must be 15 characters"
        );
    }
}
