//! # Order Totals Assembler
//!
//! Orchestrates the full pricing pipeline in a fixed order.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal                                                               │
//! │     │                                                                   │
//! │     ├──► coupon discount (rejections recorded, never fatal)             │
//! │     ▼                                                                   │
//! │  taxable base = subtotal - discount                                     │
//! │     │                                                                   │
//! │     ├──► exemption check (on the taxable base)                          │
//! │     ├──► GST on the taxable base          ◄── POST-discount, always     │
//! │     ▼                                                                   │
//! │  shipping from the PRE-discount subtotal                                │
//! │     ▼                                                                   │
//! │  grand total = taxable base + tax + shipping                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two orderings here are load-bearing:
//! - Tax is computed on the **post-discount** base. Taxing the raw subtotal
//!   yields a different (wrong) grand total.
//! - Free-shipping eligibility looks at the **pre-discount** subtotal. A
//!   coupon does not cost a shopper their free shipping. The asymmetry with
//!   the tax step is intentional.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::coupon::{Coupon, CouponEngine};
use crate::error::PricingResult;
use crate::exemption::ExemptionPolicy;
use crate::money::Money;
use crate::rates::DEFAULT_CATEGORY;
use crate::tax::TaxCalculator;
use crate::types::{Address, TaxBreakdown};
use crate::validation::validate_amount;

/// Orders strictly above this subtotal ship free (₹999.00).
pub const FREE_SHIPPING_THRESHOLD_PAISE: i64 = 99_900;

/// Flat shipping fee below the threshold (₹99.00).
pub const FLAT_SHIPPING_FEE_PAISE: i64 = 9_900;

// =============================================================================
// Shipping Policy
// =============================================================================

/// Threshold-based flat shipping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPolicy {
    /// Subtotals strictly above this ship free.
    pub free_over: Money,

    /// Fee charged otherwise.
    pub flat_fee: Money,
}

impl ShippingPolicy {
    /// Fee for an order, judged on the pre-discount subtotal.
    pub fn fee_for(&self, subtotal: Money) -> Money {
        if subtotal > self.free_over {
            Money::zero()
        } else {
            self.flat_fee
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        ShippingPolicy {
            free_over: Money::from_paise(FREE_SHIPPING_THRESHOLD_PAISE),
            flat_fee: Money::from_paise(FLAT_SHIPPING_FEE_PAISE),
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Fully assembled order pricing, ready for display and payment capture.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Pre-discount merchandise subtotal.
    pub subtotal: Money,

    /// Discount actually applied (zero when no coupon, or rejected).
    pub discount: Money,

    /// Code of the coupon that produced `discount`.
    pub applied_coupon: Option<String>,

    /// Rejection message when a supplied coupon failed validation. The
    /// order still prices; the shopper just sees why the code didn't take.
    pub coupon_rejection: Option<String>,

    /// Amount tax was levied on: `subtotal - discount`.
    pub taxable_base: Money,

    /// Matched exemption rule, if any. When set, `tax` is zero.
    pub exemption_reason: Option<String>,

    /// GST component split on the taxable base.
    pub tax: TaxBreakdown,

    /// Total tax (`tax.total`).
    pub tax_total: Money,

    /// Shipping fee, judged on the pre-discount subtotal.
    pub shipping: Money,

    /// `taxable_base + tax_total + shipping`.
    pub grand_total: Money,
}

// =============================================================================
// Order Totals Assembler
// =============================================================================

/// Runs the subtotal → discount → tax → shipping → grand-total pipeline.
#[derive(Debug, Clone)]
pub struct OrderTotalsAssembler {
    tax: TaxCalculator,
    exemptions: ExemptionPolicy,
    shipping: ShippingPolicy,
}

impl OrderTotalsAssembler {
    /// Creates an assembler with the default exemption and shipping rules.
    pub fn new(tax: TaxCalculator) -> Self {
        OrderTotalsAssembler {
            tax,
            exemptions: ExemptionPolicy::default(),
            shipping: ShippingPolicy::default(),
        }
    }

    /// Replaces the shipping policy.
    pub fn with_shipping(mut self, shipping: ShippingPolicy) -> Self {
        self.shipping = shipping;
        self
    }

    /// Replaces the exemption policy.
    pub fn with_exemptions(mut self, exemptions: ExemptionPolicy) -> Self {
        self.exemptions = exemptions;
        self
    }

    /// Assembles the totals for one order.
    ///
    /// A failing coupon never fails the order: the rejection reason is
    /// recorded on the result and pricing continues without a discount.
    ///
    /// ## Errors
    /// [`crate::error::PricingError::InvalidAmount`] on a negative
    /// subtotal only.
    pub fn assemble(
        &self,
        subtotal: Money,
        coupon: Option<&Coupon>,
        address: &Address,
        category: Option<&str>,
    ) -> PricingResult<OrderTotals> {
        validate_amount(subtotal)?;

        let category = category.unwrap_or(DEFAULT_CATEGORY);

        let (discount, applied_coupon, coupon_rejection) = match coupon {
            Some(coupon) => match CouponEngine::validate(coupon, subtotal) {
                Ok(result) => (result.discount_amount, Some(coupon.code.clone()), None),
                Err(reason) => {
                    debug!(code = %coupon.code, %reason, "coupon rejected, pricing without discount");
                    (Money::zero(), None, Some(reason.to_string()))
                }
            },
            None => (Money::zero(), None, None),
        };

        let taxable_base = subtotal - discount;

        let exemption = self.exemptions.check_exemption(taxable_base, category);
        let (tax, exemption_reason) = if exemption.exempt {
            (TaxBreakdown::zero(), exemption.reason)
        } else {
            let result = self.tax.calculate_gst(taxable_base, address, Some(category))?;
            (result.breakdown, None)
        };

        let shipping = self.shipping.fee_for(subtotal);

        Ok(OrderTotals {
            subtotal,
            discount,
            applied_coupon,
            coupon_rejection,
            taxable_base,
            exemption_reason,
            tax_total: tax.total,
            tax,
            shipping,
            grand_total: taxable_base + tax.total + shipping,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupon::CouponValue;
    use crate::rates::RateTable;
    use std::sync::Arc;

    fn assembler() -> OrderTotalsAssembler {
        OrderTotalsAssembler::new(TaxCalculator::new(
            Arc::new(RateTable::india()),
            "Maharashtra",
        ))
    }

    #[test]
    fn test_pipeline_with_coupon_intrastate() {
        // ₹1500 gifts, 10% coupon, Maharashtra billing:
        // discount 150 → base 1350 → 18% intrastate = 121.50 + 121.50
        // shipping free (subtotal > 999) → grand 1593.00
        let coupon = Coupon::new("SAVE10", CouponValue::Percentage { bps: 1000 });
        let totals = assembler()
            .assemble(
                Money::from_rupees(1500),
                Some(&coupon),
                &Address::in_state("Maharashtra"),
                Some("gifts"),
            )
            .unwrap();

        assert_eq!(totals.discount, Money::from_rupees(150));
        assert_eq!(totals.applied_coupon.as_deref(), Some("SAVE10"));
        assert_eq!(totals.taxable_base, Money::from_rupees(1350));
        assert_eq!(totals.tax.cgst, Money::from_paise(12_150));
        assert_eq!(totals.tax.sgst, Money::from_paise(12_150));
        assert_eq!(totals.tax_total, Money::from_rupees(243));
        assert_eq!(totals.shipping, Money::zero());
        assert_eq!(totals.grand_total, Money::from_rupees(1593));
    }

    #[test]
    fn test_tax_runs_on_post_discount_base() {
        let coupon = Coupon::new("SAVE10", CouponValue::Percentage { bps: 1000 });
        let with_coupon = assembler()
            .assemble(
                Money::from_rupees(2000),
                Some(&coupon),
                &Address::in_state("Karnataka"),
                Some("gifts"),
            )
            .unwrap();
        let without = assembler()
            .assemble(
                Money::from_rupees(2000),
                None,
                &Address::in_state("Karnataka"),
                Some("gifts"),
            )
            .unwrap();

        // 18% of 1800, not of 2000
        assert_eq!(with_coupon.tax_total, Money::from_rupees(324));
        assert_eq!(without.tax_total, Money::from_rupees(360));
    }

    #[test]
    fn test_shipping_judged_on_pre_discount_subtotal() {
        // ₹1000 subtotal discounted to ₹900: still ships free, because
        // eligibility looks at the pre-discount subtotal
        let coupon = Coupon::new("SAVE10", CouponValue::Percentage { bps: 1000 });
        let totals = assembler()
            .assemble(
                Money::from_rupees(1000),
                Some(&coupon),
                &Address::in_state("Karnataka"),
                Some("gifts"),
            )
            .unwrap();

        assert_eq!(totals.shipping, Money::zero());
    }

    #[test]
    fn test_flat_fee_at_threshold() {
        // ₹999.00 exactly is NOT above the threshold: fee applies
        let totals = assembler()
            .assemble(
                Money::from_rupees(999),
                None,
                &Address::in_state("Karnataka"),
                Some("gifts"),
            )
            .unwrap();

        assert_eq!(totals.shipping, Money::from_rupees(99));

        let totals = assembler()
            .assemble(
                Money::from_paise(99_901),
                None,
                &Address::in_state("Karnataka"),
                Some("gifts"),
            )
            .unwrap();
        assert_eq!(totals.shipping, Money::zero());
    }

    #[test]
    fn test_rejected_coupon_prices_without_discount() {
        let coupon = Coupon::new("DEAD", CouponValue::Percentage { bps: 1000 }).deactivated();
        let totals = assembler()
            .assemble(
                Money::from_rupees(1500),
                Some(&coupon),
                &Address::in_state("Maharashtra"),
                Some("gifts"),
            )
            .unwrap();

        assert_eq!(totals.discount, Money::zero());
        assert!(totals.applied_coupon.is_none());
        assert_eq!(
            totals.coupon_rejection.as_deref(),
            Some("coupon DEAD is not active")
        );
        assert_eq!(totals.taxable_base, Money::from_rupees(1500));
    }

    #[test]
    fn test_small_order_exemption_zeroes_tax() {
        // ₹450 order: below ₹500 threshold → no tax, flat shipping
        let totals = assembler()
            .assemble(
                Money::from_rupees(450),
                None,
                &Address::in_state("Maharashtra"),
                Some("gifts"),
            )
            .unwrap();

        assert!(totals.tax.is_zero());
        assert_eq!(totals.exemption_reason.as_deref(), Some("small order"));
        assert_eq!(totals.shipping, Money::from_rupees(99));
        assert_eq!(totals.grand_total, Money::from_rupees(549));
    }

    #[test]
    fn test_discount_can_push_base_under_exemption_threshold() {
        // ₹520 with a ₹50 coupon → base ₹470, which is exempt
        let coupon = Coupon::new(
            "FLAT50",
            CouponValue::Fixed {
                amount: Money::from_rupees(50),
            },
        );
        let totals = assembler()
            .assemble(
                Money::from_rupees(520),
                Some(&coupon),
                &Address::in_state("Maharashtra"),
                Some("gifts"),
            )
            .unwrap();

        assert!(totals.tax.is_zero());
        assert_eq!(totals.exemption_reason.as_deref(), Some("small order"));
    }

    #[test]
    fn test_negative_subtotal_rejected() {
        let err = assembler()
            .assemble(
                Money::from_paise(-1),
                None,
                &Address::in_state("Maharashtra"),
                None,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::PricingError::InvalidAmount { .. }
        ));
    }

    #[test]
    fn test_grand_total_identity() {
        let totals = assembler()
            .assemble(
                Money::from_rupees(2000),
                None,
                &Address::in_state("Karnataka"),
                Some("gifts"),
            )
            .unwrap();
        assert_eq!(
            totals.grand_total,
            totals.taxable_base + totals.tax_total + totals.shipping
        );
    }
}
