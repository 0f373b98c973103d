//! # Reverse Tax Calculator
//!
//! Inverts the forward computation: given a tax-inclusive amount, recover
//! the pre-tax amount and the tax portion. Used by refund and cancellation
//! flows, never by forward checkout.
//!
//! No CGST/SGST/IGST split is recovered here. The forward breakdown is not
//! invertible component-wise without already knowing the split; callers
//! needing a component-level refund recompute the forward split on
//! `amount_before_tax` rather than scaling the original components.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::PricingResult;
use crate::money::Money;
use crate::rates::{RateTable, DEFAULT_CATEGORY};
use crate::types::Address;
use crate::validation::validate_amount;

// =============================================================================
// Reverse Tax Result
// =============================================================================

/// A tax-inclusive amount decomposed into its pre-tax and tax parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReverseTaxResult {
    /// `amount_including_tax / (1 + rate)`, rounded half-up.
    pub amount_before_tax: Money,

    /// `amount_including_tax - amount_before_tax`.
    pub tax_amount: Money,
}

// =============================================================================
// Reverse Tax Calculator
// =============================================================================

/// Recovers pre-tax amounts from tax-inclusive totals.
#[derive(Debug, Clone)]
pub struct ReverseTaxCalculator {
    rates: Arc<RateTable>,
}

impl ReverseTaxCalculator {
    pub fn new(rates: Arc<RateTable>) -> Self {
        ReverseTaxCalculator { rates }
    }

    /// Splits a tax-inclusive amount at the category's rate.
    ///
    /// The billing address does not change the recovered amounts (the
    /// nominal rate is the same either side of a state line); it is taken
    /// so refund flows log unrecognized states the same way checkout does.
    ///
    /// ## Errors
    /// [`crate::error::PricingError::InvalidAmount`] on a negative input.
    pub fn calculate_reverse_gst(
        &self,
        amount_including_tax: Money,
        address: &Address,
        category: Option<&str>,
    ) -> PricingResult<ReverseTaxResult> {
        validate_amount(amount_including_tax)?;

        if !self.rates.is_known_state(&address.state) {
            tracing::warn!(
                state = %address.state,
                "billing state not in region table during refund computation"
            );
        }

        let rate = self.rates.rate_for(category.unwrap_or(DEFAULT_CATEGORY));
        let amount_before_tax = amount_including_tax.before_tax(rate);

        Ok(ReverseTaxResult {
            amount_before_tax,
            tax_amount: amount_including_tax - amount_before_tax,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> ReverseTaxCalculator {
        ReverseTaxCalculator::new(Arc::new(RateTable::india()))
    }

    #[test]
    fn test_reverse_gst() {
        // ₹1180 inclusive of 18% → ₹1000 before tax, ₹180 tax
        let result = calculator()
            .calculate_reverse_gst(
                Money::from_rupees(1180),
                &Address::in_state("Maharashtra"),
                Some("gifts"),
            )
            .unwrap();

        assert_eq!(result.amount_before_tax, Money::from_rupees(1000));
        assert_eq!(result.tax_amount, Money::from_rupees(180));
    }

    #[test]
    fn test_reverse_zero_rate_is_identity() {
        let result = calculator()
            .calculate_reverse_gst(
                Money::from_rupees(1000),
                &Address::in_state("Karnataka"),
                Some("books"),
            )
            .unwrap();

        assert_eq!(result.amount_before_tax, Money::from_rupees(1000));
        assert_eq!(result.tax_amount, Money::zero());
    }

    #[test]
    fn test_reverse_negative_rejected() {
        let err = calculator()
            .calculate_reverse_gst(
                Money::from_paise(-100),
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
    fn test_round_trip_within_one_paisa() {
        let calc = calculator();
        let forward = crate::tax::TaxCalculator::new(Arc::new(RateTable::india()), "Maharashtra");
        let address = Address::in_state("Karnataka");

        for paise in [1, 99, 333, 49_999, 123_457, 10_000_001] {
            let pre = Money::from_paise(paise);
            let inclusive = forward
                .calculate_gst(pre, &address, Some("gifts"))
                .unwrap()
                .grand_total;
            let recovered = calc
                .calculate_reverse_gst(inclusive, &address, Some("gifts"))
                .unwrap();

            assert!(
                (recovered.amount_before_tax.paise() - pre.paise()).abs() <= 1,
                "round trip drifted more than 1 paisa for {pre}"
            );
        }
    }
}
