//! # pricing-core: Order Pricing & Tax Computation Engine
//!
//! This crate is the one genuinely algorithmic subsystem of the storefront:
//! the logic that turns a cart subtotal, a selected coupon, and a billing
//! address into a defensible GST breakdown and a final payable amount, and
//! that can invert the computation for refunds.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │      Storefront & Admin (catalog, cart, checkout, refunds)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ direct function calls                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pricing-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  money  │ │  rates  │ │   tax   │ │ coupon  │ │ totals  │  │   │
//! │  │   │  Money  │ │RateTable│ │ GST     │ │ Engine  │ │Assembler│  │   │
//! │  │   └─────────┘ └─────────┘ │ split   │ └─────────┘ └─────────┘  │   │
//! │  │   ┌─────────┐ ┌─────────┐ └─────────┘ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │exemption│ │ reverse │             │ invoice │ │ config  │  │   │
//! │  │   └─────────┘ └─────────┘             └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-paise `Money` with round-half-up GST math
//! - [`types`] - Shared value objects (rates, addresses, breakdowns)
//! - [`rates`] - Immutable category/state/HSN lookup tables
//! - [`tax`] - Forward GST computation (interstate/intrastate split)
//! - [`exemption`] - Advisory tax-exemption rules
//! - [`coupon`] - Coupon validation and best-coupon selection
//! - [`totals`] - The checkout pricing pipeline
//! - [`reverse`] - Tax-inclusive → pre-tax inversion for refunds
//! - [`invoice`] - Structured GST invoice generation
//! - [`config`] - Seller identity from the environment
//! - [`error`] - Typed domain errors
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic over its inputs;
//!    there is no hidden state and nothing suspends, retries, or blocks
//! 2. **Integer Money**: All monetary values are paise (i64); floating
//!    point never touches an invoice figure
//! 3. **Injected Configuration**: Rate tables and seller identity are
//!    built once at startup and shared by `Arc`, never a global
//! 4. **Permissive to Drift, Strict to Bugs**: Unknown categories and
//!    states fall back with a logged warning; negative amounts are
//!    rejected outright
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use pricing_core::money::Money;
//! use pricing_core::rates::RateTable;
//! use pricing_core::tax::TaxCalculator;
//! use pricing_core::totals::OrderTotalsAssembler;
//! use pricing_core::types::Address;
//!
//! let rates = Arc::new(RateTable::india());
//! let assembler = OrderTotalsAssembler::new(TaxCalculator::new(rates, "Maharashtra"));
//!
//! let totals = assembler
//!     .assemble(
//!         Money::from_rupees(1500),
//!         None,
//!         &Address::in_state("Karnataka"),
//!         Some("gifts"),
//!     )
//!     .unwrap();
//!
//! // 18% IGST on ₹1500, free shipping above ₹999
//! assert_eq!(totals.grand_total, Money::from_rupees(1770));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod coupon;
pub mod error;
pub mod exemption;
pub mod invoice;
pub mod money;
pub mod rates;
pub mod reverse;
pub mod tax;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pricing_core::Money` instead of
// `use pricing_core::money::Money`

pub use config::SellerConfig;
pub use coupon::{Coupon, CouponEngine, CouponValue, DiscountResult};
pub use error::{CouponError, PricingError, PricingResult, ValidationError};
pub use exemption::{ExemptionDecision, ExemptionPolicy};
pub use invoice::{GstInvoice, InvoiceGenerator};
pub use money::Money;
pub use rates::RateTable;
pub use reverse::{ReverseTaxCalculator, ReverseTaxResult};
pub use tax::TaxCalculator;
pub use totals::{OrderTotals, OrderTotalsAssembler, ShippingPolicy};
pub use types::*;
