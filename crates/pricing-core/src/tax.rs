//! # Tax Calculator
//!
//! Forward GST computation: given an amount, a billing address, and a
//! category, decide interstate vs. intrastate treatment and produce the
//! component split.
//!
//! ## Split Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  billing state == seller home state?   (exact string comparison)        │
//! │                                                                         │
//! │  YES (intrastate):  cgst = sgst = amount × (rate/2)                     │
//! │                     igst = 0                                            │
//! │                                                                         │
//! │  NO  (interstate):  igst = amount × rate                                │
//! │                     cgst = sgst = 0                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every component is rounded half-up to the paisa independently **before**
//! summing into the total, so the total can differ from a single rounding
//! of `amount × rate` by at most one paisa. That is the documented invoice
//! tolerance, not a bug.
//!
//! ## State Matching
//! The comparison is verbatim: `"maharashtra"` does not match
//! `"Maharashtra"`. Address capture upstream owns canonicalization; the
//! engine only flags unrecognized spellings in the logs.

use std::sync::Arc;

use tracing::warn;

use crate::error::PricingResult;
use crate::money::Money;
use crate::rates::{RateTable, DEFAULT_CATEGORY};
use crate::types::{
    Address, OrderLineItem, SupplyType, TaxBreakdown, TaxCalculationResult, TaxRate,
};
use crate::validation::validate_amount;

// =============================================================================
// Tax Calculator
// =============================================================================

/// Stateless forward GST computation over a shared rate table.
#[derive(Debug, Clone)]
pub struct TaxCalculator {
    rates: Arc<RateTable>,
    home_state: String,
}

impl TaxCalculator {
    /// Creates a calculator for a seller registered in `home_state`.
    pub fn new(rates: Arc<RateTable>, home_state: impl Into<String>) -> Self {
        TaxCalculator {
            rates,
            home_state: home_state.into(),
        }
    }

    /// The rate table this calculator resolves categories against.
    pub fn rates(&self) -> &Arc<RateTable> {
        &self.rates
    }

    /// The seller's registered state.
    pub fn home_state(&self) -> &str {
        &self.home_state
    }

    /// Decides interstate vs. intrastate treatment for a billing address.
    ///
    /// Exact string comparison against the seller home state; an unknown
    /// or misspelled state is still usable (it simply compares unequal)
    /// but is logged so data drift is visible.
    pub fn supply_type(&self, address: &Address) -> SupplyType {
        if !self.rates.is_known_state(&address.state) {
            warn!(
                state = %address.state,
                "billing state not in region table, treating by exact comparison only"
            );
        }

        if address.state == self.home_state {
            SupplyType::Intrastate
        } else {
            SupplyType::Interstate
        }
    }

    /// Computes GST on a single amount.
    ///
    /// `category = None` uses the generic default category.
    ///
    /// ## Errors
    /// [`crate::error::PricingError::InvalidAmount`] on a negative
    /// subtotal; the computation is total for every non-negative amount.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use pricing_core::money::Money;
    /// use pricing_core::rates::RateTable;
    /// use pricing_core::tax::TaxCalculator;
    /// use pricing_core::types::Address;
    ///
    /// let calc = TaxCalculator::new(Arc::new(RateTable::india()), "Maharashtra");
    /// let result = calc
    ///     .calculate_gst(
    ///         Money::from_rupees(1000),
    ///         &Address::in_state("Karnataka"),
    ///         Some("gifts"),
    ///     )
    ///     .unwrap();
    /// assert_eq!(result.breakdown.igst, Money::from_rupees(180));
    /// ```
    pub fn calculate_gst(
        &self,
        subtotal: Money,
        address: &Address,
        category: Option<&str>,
    ) -> PricingResult<TaxCalculationResult> {
        validate_amount(subtotal)?;

        let category = category.unwrap_or(DEFAULT_CATEGORY);
        let rate = self.rates.rate_for(category);
        let supply_type = self.supply_type(address);

        let breakdown = match supply_type {
            // Each half share is rounded on its own; doubling a rounded
            // half keeps cgst == sgst exact on every invoice
            SupplyType::Intrastate => TaxBreakdown::intrastate(subtotal.gst_half_at(rate)),
            SupplyType::Interstate => TaxBreakdown::interstate(subtotal.gst_at(rate)),
        };

        Ok(TaxCalculationResult {
            subtotal,
            tax_total: breakdown.total,
            grand_total: subtotal + breakdown.total,
            breakdown,
            rate,
            mixed_rates: false,
            supply_type,
        })
    }

    /// Computes GST for a multi-category order, line by line.
    ///
    /// Each item is computed (and rounded) independently, then the
    /// components are summed. This two-stage rounding trades a paisa-level
    /// difference against a single-pass computation for auditability:
    /// every line's tax is independently verifiable on the invoice. Both
    /// stages are deliberate and must not be collapsed.
    ///
    /// The aggregate reports `mixed_rates = true` with a zero `rate`; no
    /// single percentage describes a multi-category order.
    pub fn calculate_tax_for_items(
        &self,
        items: &[OrderLineItem],
        address: &Address,
    ) -> PricingResult<TaxCalculationResult> {
        let supply_type = self.supply_type(address);

        let mut subtotal = Money::zero();
        let mut breakdown = TaxBreakdown::zero();

        for item in items {
            let line = self.calculate_gst(item.amount, address, Some(&item.category))?;
            subtotal += line.subtotal;
            breakdown = breakdown + line.breakdown;
        }

        Ok(TaxCalculationResult {
            subtotal,
            tax_total: breakdown.total,
            grand_total: subtotal + breakdown.total,
            breakdown,
            rate: TaxRate::zero(),
            mixed_rates: true,
            supply_type,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> TaxCalculator {
        TaxCalculator::new(Arc::new(RateTable::india()), "Maharashtra")
    }

    #[test]
    fn test_intrastate_split() {
        // ₹1000 of gifts billed to Maharashtra (home state): 18% split
        let result = calculator()
            .calculate_gst(
                Money::from_rupees(1000),
                &Address::in_state("Maharashtra"),
                Some("gifts"),
            )
            .unwrap();

        assert_eq!(result.supply_type, SupplyType::Intrastate);
        assert_eq!(result.breakdown.cgst, Money::from_rupees(90));
        assert_eq!(result.breakdown.sgst, Money::from_rupees(90));
        assert_eq!(result.breakdown.igst, Money::zero());
        assert_eq!(result.tax_total, Money::from_rupees(180));
        assert_eq!(result.grand_total, Money::from_rupees(1180));
        assert_eq!(result.rate, TaxRate::from_bps(1800));
    }

    #[test]
    fn test_interstate_igst() {
        let result = calculator()
            .calculate_gst(
                Money::from_rupees(1000),
                &Address::in_state("Karnataka"),
                Some("gifts"),
            )
            .unwrap();

        assert_eq!(result.supply_type, SupplyType::Interstate);
        assert_eq!(result.breakdown.igst, Money::from_rupees(180));
        assert_eq!(result.breakdown.cgst, Money::zero());
        assert_eq!(result.breakdown.sgst, Money::zero());
        assert_eq!(result.grand_total, Money::from_rupees(1180));
    }

    #[test]
    fn test_zero_rated_category() {
        let result = calculator()
            .calculate_gst(
                Money::from_rupees(1000),
                &Address::in_state("Karnataka"),
                Some("books"),
            )
            .unwrap();

        assert!(result.breakdown.is_zero());
        assert_eq!(result.grand_total, Money::from_rupees(1000));
    }

    #[test]
    fn test_omitted_category_uses_default() {
        let calc = calculator();
        let address = Address::in_state("Karnataka");

        let defaulted = calc
            .calculate_gst(Money::from_rupees(1000), &address, None)
            .unwrap();
        let explicit = calc
            .calculate_gst(Money::from_rupees(1000), &address, Some(DEFAULT_CATEGORY))
            .unwrap();

        assert_eq!(defaulted.tax_total, explicit.tax_total);
    }

    #[test]
    fn test_state_matching_is_exact() {
        // Lowercase home-state spelling compares unequal → interstate
        let result = calculator()
            .calculate_gst(
                Money::from_rupees(1000),
                &Address::in_state("maharashtra"),
                Some("gifts"),
            )
            .unwrap();

        assert_eq!(result.supply_type, SupplyType::Interstate);
        assert_eq!(result.breakdown.igst, Money::from_rupees(180));
    }

    #[test]
    fn test_split_invariant_over_amount_sweep() {
        let calc = calculator();
        for paise in [1, 33, 999, 49_999, 123_457, 99_999_999] {
            for state in ["Maharashtra", "Karnataka"] {
                let result = calc
                    .calculate_gst(
                        Money::from_paise(paise),
                        &Address::in_state(state),
                        Some("gifts"),
                    )
                    .unwrap();

                let b = result.breakdown;
                // Exactly one side of the split carries the tax
                assert!(b.igst.is_zero() || (b.cgst.is_zero() && b.sgst.is_zero()));
                assert_eq!(b.cgst, b.sgst);
                assert_eq!(b.total, b.cgst + b.sgst + b.igst);
                assert_eq!(result.grand_total, result.subtotal + result.tax_total);
            }
        }
    }

    #[test]
    fn test_negative_subtotal_rejected() {
        let err = calculator()
            .calculate_gst(
                Money::from_paise(-1),
                &Address::in_state("Maharashtra"),
                Some("gifts"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::PricingError::InvalidAmount { .. }
        ));
    }

    #[test]
    fn test_items_aggregate() {
        let items = vec![
            OrderLineItem::new(Money::from_rupees(1000), "gifts"),
            OrderLineItem::new(Money::from_rupees(500), "books"),
        ];
        let result = calculator()
            .calculate_tax_for_items(&items, &Address::in_state("Karnataka"))
            .unwrap();

        assert_eq!(result.subtotal, Money::from_rupees(1500));
        assert_eq!(result.breakdown.igst, Money::from_rupees(180));
        assert_eq!(result.grand_total, Money::from_rupees(1680));
        assert!(result.mixed_rates);
        assert!(result.rate.is_zero());
    }

    #[test]
    fn test_items_round_per_line_then_sum() {
        // Two ₹0.25 gift lines at 18%: each line rounds 4.5 paise up to 5,
        // so the aggregate is 10 paise, not round(9 paise total) = 9
        let items = vec![
            OrderLineItem::new(Money::from_paise(25), "gifts"),
            OrderLineItem::new(Money::from_paise(25), "gifts"),
        ];
        let result = calculator()
            .calculate_tax_for_items(&items, &Address::in_state("Karnataka"))
            .unwrap();

        assert_eq!(result.breakdown.igst, Money::from_paise(10));
    }

    #[test]
    fn test_items_empty() {
        let result = calculator()
            .calculate_tax_for_items(&[], &Address::in_state("Karnataka"))
            .unwrap();
        assert_eq!(result.subtotal, Money::zero());
        assert!(result.breakdown.is_zero());
        assert!(result.mixed_rates);
    }
}
