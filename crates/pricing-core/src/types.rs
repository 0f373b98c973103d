//! # Domain Types
//!
//! Core value objects used throughout the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  TaxBreakdown   │   │   SupplyType    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  cgst           │   │  Intrastate     │       │
//! │  │  1800 = 18%     │   │  sgst           │   │  Interstate     │       │
//! │  └─────────────────┘   │  igst           │   └─────────────────┘       │
//! │                        │  total          │                              │
//! │  ┌─────────────────┐   └─────────────────┘   ┌─────────────────┐       │
//! │  │    Address      │                         │  OrderLineItem  │       │
//! │  │  state (String) │                         │  amount         │       │
//! │  └─────────────────┘                         │  category       │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a per-request value object. Nothing is persisted by
//! this crate.

use serde::{Deserialize, Serialize};
use std::ops::Add;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (the standard GST slab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Supply Type
// =============================================================================

/// Whether a sale crosses state lines.
///
/// Intrastate sales split the rate into CGST + SGST (half each); interstate
/// sales levy the full rate as IGST. Decided by exact string comparison of
/// the billing state against the seller's registered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplyType {
    /// Buyer and seller share a state: CGST + SGST.
    Intrastate,
    /// Buyer is in another state: IGST.
    Interstate,
}

impl SupplyType {
    /// The GST label printed on invoices for this supply type.
    pub const fn gst_type(&self) -> &'static str {
        match self {
            SupplyType::Intrastate => "CGST+SGST",
            SupplyType::Interstate => "IGST",
        }
    }
}

// =============================================================================
// Address
// =============================================================================

/// A billing address, consumed (not owned) by the engine.
///
/// Only `state` participates in tax computation; the other fields pass
/// through to invoices. Unknown or misspelled states still work for the
/// interstate/intrastate comparison because that comparison is exact string
/// equality against the seller's home state, never a table lookup.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street line.
    pub line1: Option<String>,

    /// City or town.
    pub city: Option<String>,

    /// State name as captured at checkout. Compared verbatim; no case or
    /// whitespace normalization is applied.
    pub state: String,

    /// Postal (PIN) code.
    pub pin_code: Option<String>,
}

impl Address {
    /// Creates an address carrying only a state, which is all tax
    /// computation needs.
    pub fn in_state(state: impl Into<String>) -> Self {
        Address {
            line1: None,
            city: None,
            state: state.into(),
            pin_code: None,
        }
    }
}

// =============================================================================
// Order Line Item
// =============================================================================

/// One line of a multi-category order, for per-item tax aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    /// Pre-tax amount for this line.
    pub amount: Money,

    /// Product category, resolved against the rate table.
    pub category: String,
}

impl OrderLineItem {
    pub fn new(amount: Money, category: impl Into<String>) -> Self {
        OrderLineItem {
            amount,
            category: category.into(),
        }
    }
}

// =============================================================================
// Tax Breakdown
// =============================================================================

/// The split of a tax amount into its GST components.
///
/// ## Invariants
/// - Exactly one of `{cgst & sgst, igst}` is nonzero for any nonzero tax
/// - `cgst == sgst` whenever both are present
/// - `cgst + sgst + igst == total` exactly (paise arithmetic is exact
///   once each component has been rounded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    pub total: Money,
}

impl TaxBreakdown {
    /// A breakdown with no tax at all (exempt or zero-rated).
    pub fn zero() -> Self {
        TaxBreakdown::default()
    }

    /// An intrastate breakdown from the already-rounded half share.
    ///
    /// The half share is rounded before doubling, which is what guarantees
    /// `cgst == sgst` on every invoice.
    pub fn intrastate(half: Money) -> Self {
        TaxBreakdown {
            cgst: half,
            sgst: half,
            igst: Money::zero(),
            total: half + half,
        }
    }

    /// An interstate breakdown from the already-rounded full share.
    pub fn interstate(igst: Money) -> Self {
        TaxBreakdown {
            cgst: Money::zero(),
            sgst: Money::zero(),
            igst,
            total: igst,
        }
    }

    /// Checks if no tax is levied.
    pub fn is_zero(&self) -> bool {
        self.total.is_zero()
    }
}

/// Component-wise accumulation, used when aggregating per-item breakdowns.
/// Each operand's components are already rounded, so the sum stays exact.
impl Add for TaxBreakdown {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        TaxBreakdown {
            cgst: self.cgst + other.cgst,
            sgst: self.sgst + other.sgst,
            igst: self.igst + other.igst,
            total: self.total + other.total,
        }
    }
}

// =============================================================================
// Tax Calculation Result
// =============================================================================

/// The full outcome of a forward GST computation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationResult {
    /// Pre-tax amount the computation ran on.
    pub subtotal: Money,

    /// CGST/SGST/IGST split.
    pub breakdown: TaxBreakdown,

    /// Total tax. Always equals `breakdown.total`.
    pub tax_total: Money,

    /// `subtotal + tax_total`, exactly.
    pub grand_total: Money,

    /// The rate applied. Reported as zero when `mixed_rates` is set.
    pub rate: TaxRate,

    /// True for multi-category aggregates, where no single rate describes
    /// the order. Callers must not render `rate` as a percentage when set.
    pub mixed_rates: bool,

    /// Interstate or intrastate treatment that produced the split.
    pub supply_type: SupplyType,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(18.0);
        assert_eq!(rate.bps(), 1800);
    }

    #[test]
    fn test_supply_type_gst_label() {
        assert_eq!(SupplyType::Intrastate.gst_type(), "CGST+SGST");
        assert_eq!(SupplyType::Interstate.gst_type(), "IGST");
    }

    #[test]
    fn test_breakdown_intrastate_halves_stay_equal() {
        let b = TaxBreakdown::intrastate(Money::from_paise(6075));
        assert_eq!(b.cgst, b.sgst);
        assert_eq!(b.total, Money::from_paise(12_150));
        assert_eq!(b.igst, Money::zero());
    }

    #[test]
    fn test_breakdown_additivity() {
        let a = TaxBreakdown::interstate(Money::from_paise(18_000));
        let b = TaxBreakdown::interstate(Money::from_paise(500));
        let sum = a + b;
        assert_eq!(sum.igst, Money::from_paise(18_500));
        assert_eq!(sum.total, sum.cgst + sum.sgst + sum.igst);
    }

    #[test]
    fn test_breakdown_zero() {
        let z = TaxBreakdown::zero();
        assert!(z.is_zero());
        assert_eq!(z.total, Money::zero());
    }
}
