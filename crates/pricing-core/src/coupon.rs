//! # Coupon Engine
//!
//! Validates coupon snapshots against an order amount and computes bounded
//! discounts. Consumed **before** tax in the pricing pipeline.
//!
//! ## Validation Gauntlet
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate(coupon, order_amount)                                         │
//! │       │                                                                 │
//! │       ├── outside validity window?  → Err(Expired)                     │
//! │       ├── deactivated?              → Err(Inactive)                    │
//! │       ├── usage budget spent?       → Err(UsageExceeded)               │
//! │       ├── order below minimum?      → Err(MinimumNotMet)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  raw discount (percentage share or fixed amount)                        │
//! │       │                                                                 │
//! │       ├── cap at maximum_discount_amount (if set)                      │
//! │       └── cap at order_amount (final total never goes negative)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(DiscountResult { coupon, discount_amount, final_amount })          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership of State
//! The engine reads a coupon *snapshot* and never mutates `used_count`;
//! persisting usage increments after a successful checkout is the calling
//! service's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CouponError;
use crate::money::Money;
use crate::validation::validate_coupon_code;

// =============================================================================
// Coupon Value
// =============================================================================

/// How a coupon's discount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CouponValue {
    /// A percentage of the order amount, in basis points (1000 = 10%).
    Percentage { bps: u32 },

    /// A flat amount off the order.
    Fixed { amount: Money },
}

// =============================================================================
// Coupon
// =============================================================================

/// A coupon snapshot as read from the coupon store.
///
/// All optional fields default to "unbounded" when absent. The engine only
/// ever reads these fields; lifecycle (creation, deactivation, usage
/// counting) belongs to the admin/persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Redemption code shoppers type at checkout.
    pub code: String,

    /// Discount computation.
    pub value: CouponValue,

    /// Orders below this amount are rejected with `MinimumNotMet`.
    pub minimum_order_amount: Option<Money>,

    /// Upper bound on the computed discount.
    pub maximum_discount_amount: Option<Money>,

    /// Total number of redemptions allowed across all shoppers.
    pub usage_limit: Option<u32>,

    /// Redemptions so far. Maintained by the caller, read here.
    pub used_count: u32,

    /// Administrative kill switch.
    pub is_active: bool,

    /// Start of the validity window.
    #[ts(as = "Option<String>")]
    pub valid_from: Option<DateTime<Utc>>,

    /// End of the validity window.
    #[ts(as = "Option<String>")]
    pub valid_until: Option<DateTime<Utc>>,
}

impl Coupon {
    /// Creates an active, unbounded coupon with the given code and value.
    /// Bounds are layered on with the `with_*` methods.
    pub fn new(code: impl Into<String>, value: CouponValue) -> Self {
        Coupon {
            id: Uuid::new_v4().to_string(),
            code: code.into(),
            value,
            minimum_order_amount: None,
            maximum_discount_amount: None,
            usage_limit: None,
            used_count: 0,
            is_active: true,
            valid_from: None,
            valid_until: None,
        }
    }

    /// Sets the minimum qualifying order amount.
    pub fn with_minimum_order(mut self, minimum: Money) -> Self {
        self.minimum_order_amount = Some(minimum);
        self
    }

    /// Sets the discount cap.
    pub fn with_maximum_discount(mut self, maximum: Money) -> Self {
        self.maximum_discount_amount = Some(maximum);
        self
    }

    /// Sets the redemption budget.
    pub fn with_usage_limit(mut self, limit: u32, used: u32) -> Self {
        self.usage_limit = Some(limit);
        self.used_count = used;
        self
    }

    /// Sets the validity window. Either bound may be open.
    pub fn with_validity(
        mut self,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Self {
        self.valid_from = from;
        self.valid_until = until;
        self
    }

    /// Deactivates the coupon.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

// =============================================================================
// Discount Result
// =============================================================================

/// A successfully computed discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountResult {
    /// The coupon that produced the discount.
    pub coupon: Coupon,

    /// Bounded discount, never negative, never above the order amount.
    pub discount_amount: Money,

    /// `order_amount - discount_amount`, never negative.
    pub final_amount: Money,
}

impl DiscountResult {
    /// Storefront banner text for the best-coupon endpoint.
    pub fn savings_message(&self) -> String {
        format!("Apply {} to save {}", self.coupon.code, self.discount_amount)
    }
}

// =============================================================================
// Coupon Engine
// =============================================================================

/// Stateless coupon validation and selection.
pub struct CouponEngine;

impl CouponEngine {
    /// Validates a coupon against an order amount at the current time.
    pub fn validate(coupon: &Coupon, order_amount: Money) -> Result<DiscountResult, CouponError> {
        Self::validate_at(coupon, order_amount, Utc::now())
    }

    /// Validates a coupon against an order amount at an explicit instant.
    ///
    /// Checks run in a fixed order so a coupon that fails several rules
    /// reports the same rejection every time: validity window, active
    /// flag, usage budget, minimum order.
    pub fn validate_at(
        coupon: &Coupon,
        order_amount: Money,
        now: DateTime<Utc>,
    ) -> Result<DiscountResult, CouponError> {
        if let Some(until) = coupon.valid_until {
            if now > until {
                return Err(CouponError::Expired {
                    code: coupon.code.clone(),
                });
            }
        }
        if let Some(from) = coupon.valid_from {
            if now < from {
                return Err(CouponError::Expired {
                    code: coupon.code.clone(),
                });
            }
        }

        if !coupon.is_active {
            return Err(CouponError::Inactive {
                code: coupon.code.clone(),
            });
        }

        if let Some(limit) = coupon.usage_limit {
            if coupon.used_count >= limit {
                return Err(CouponError::UsageExceeded {
                    code: coupon.code.clone(),
                    limit,
                });
            }
        }

        if let Some(minimum) = coupon.minimum_order_amount {
            if order_amount < minimum {
                return Err(CouponError::MinimumNotMet {
                    code: coupon.code.clone(),
                    minimum,
                    order_amount,
                });
            }
        }

        let raw = match coupon.value {
            CouponValue::Percentage { bps } => order_amount.bps_share(bps),
            CouponValue::Fixed { amount } => amount,
        };

        let mut discount = raw;
        if let Some(cap) = coupon.maximum_discount_amount {
            discount = discount.min(cap);
        }
        // A discount can never push the payable amount below zero
        discount = discount.min(order_amount);
        if discount.is_negative() {
            discount = Money::zero();
        }

        Ok(DiscountResult {
            coupon: coupon.clone(),
            discount_amount: discount,
            final_amount: order_amount - discount,
        })
    }

    /// Validates a coupon looked up by code, for the storefront's
    /// code-entry box. Unknown codes fail with `NotFound`.
    ///
    /// The entered code is trimmed; the comparison itself is
    /// case-sensitive, matching how codes are stored. A code that can't
    /// even be a stored code (empty, too long, bad characters) short
    /// circuits to `NotFound` without scanning candidates.
    pub fn validate_code(
        code: &str,
        candidates: &[Coupon],
        order_amount: Money,
    ) -> Result<DiscountResult, CouponError> {
        let code = code.trim();
        if validate_coupon_code(code).is_err() {
            return Err(CouponError::NotFound {
                code: code.to_string(),
            });
        }

        let coupon = candidates
            .iter()
            .find(|c| c.code == code)
            .ok_or_else(|| CouponError::NotFound {
                code: code.to_string(),
            })?;

        Self::validate(coupon, order_amount)
    }

    /// Picks the eligible coupon with the largest discount at the current
    /// time. See [`CouponEngine::select_best_at`].
    pub fn select_best(candidates: &[Coupon], order_amount: Money) -> Option<DiscountResult> {
        Self::select_best_at(candidates, order_amount, Utc::now())
    }

    /// Picks the eligible coupon with the largest discount.
    ///
    /// Ties break to the lexicographically smallest code, so selection is
    /// deterministic and independent of candidate order. Returns `None`
    /// when no candidate validates or the order amount is not positive.
    pub fn select_best_at(
        candidates: &[Coupon],
        order_amount: Money,
        now: DateTime<Utc>,
    ) -> Option<DiscountResult> {
        if !order_amount.is_positive() {
            return None;
        }

        candidates
            .iter()
            .filter_map(|c| Self::validate_at(c, order_amount, now).ok())
            .max_by(|a, b| {
                a.discount_amount
                    .cmp(&b.discount_amount)
                    // smaller code is "greater" so it wins the tie
                    .then_with(|| b.coupon.code.cmp(&a.coupon.code))
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
