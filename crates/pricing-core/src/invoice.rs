//! # GST Invoice Generation
//!
//! Builds the structured invoice object the storefront renders and archives:
//! the tax figures, the compliance block (HSN code, place of supply), and
//! the seller's registered identity.
//!
//! HSN codes resolve per category through the rate table; the default is
//! "9505" (festive and gift articles), matching the store's product line.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::SellerConfig;
use crate::error::PricingResult;
use crate::money::Money;
use crate::rates::{RateTable, DEFAULT_CATEGORY};
use crate::tax::TaxCalculator;
use crate::types::{Address, SupplyType, TaxBreakdown};

// =============================================================================
// Invoice Sections
// =============================================================================

/// The monetary body of the invoice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSection {
    /// INTERSTATE or INTRASTATE.
    pub supply_type: SupplyType,

    /// "IGST" or "CGST+SGST", matching `supply_type`.
    pub gst_type: String,

    pub tax_breakdown: TaxBreakdown,
    pub subtotal: Money,
    pub tax_total: Money,
    pub grand_total: Money,

    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,
}

/// Statutory fields required on a GST invoice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSection {
    /// HSN classification of the goods.
    pub hsn_code: String,

    /// Buyer's state, prefixed with its GST code when the state is listed
    /// (e.g. "29-Karnataka"); the raw captured name otherwise.
    pub place_of_supply: String,

    /// Nominal rate applied, in basis points.
    pub tax_rate_bps: u32,

    /// Always false: this storefront sells forward-charge retail goods.
    pub is_reverse_charge: bool,
}

/// The seller's registered identity.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSection {
    pub gstin: String,
    pub state: String,
    pub address: Vec<String>,
}

/// A complete structured invoice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GstInvoice {
    pub invoice: InvoiceSection,
    pub compliance: ComplianceSection,
    pub business: BusinessSection,
}

// =============================================================================
// Invoice Generator
// =============================================================================

/// Produces invoices for a configured seller.
#[derive(Debug, Clone)]
pub struct InvoiceGenerator {
    seller: SellerConfig,
    rates: Arc<RateTable>,
    tax: TaxCalculator,
}

impl InvoiceGenerator {
    /// Creates a generator; the forward calculator is derived from the
    /// seller's home state so invoice math and checkout math can never
    /// disagree.
    pub fn new(seller: SellerConfig, rates: Arc<RateTable>) -> Self {
        let tax = TaxCalculator::new(Arc::clone(&rates), seller.home_state.clone());
        InvoiceGenerator { seller, rates, tax }
    }

    /// Generates an invoice for a taxable amount.
    ///
    /// ## Errors
    /// [`crate::error::PricingError::InvalidAmount`] on a negative amount.
    pub fn generate(
        &self,
        taxable_amount: Money,
        address: &Address,
        category: Option<&str>,
    ) -> PricingResult<GstInvoice> {
        let category = category.unwrap_or(DEFAULT_CATEGORY);
        let result = self.tax.calculate_gst(taxable_amount, address, Some(category))?;

        let place_of_supply = match self.rates.state_code(&address.state) {
            Some(code) => format!("{}-{}", code, address.state),
            None => address.state.clone(),
        };

        Ok(GstInvoice {
            invoice: InvoiceSection {
                supply_type: result.supply_type,
                gst_type: result.supply_type.gst_type().to_string(),
                tax_breakdown: result.breakdown,
                subtotal: result.subtotal,
                tax_total: result.tax_total,
                grand_total: result.grand_total,
                issued_at: Utc::now(),
            },
            compliance: ComplianceSection {
                hsn_code: self.rates.hsn_for(category).to_string(),
                place_of_supply,
                tax_rate_bps: result.rate.bps(),
                is_reverse_charge: false,
            },
            business: BusinessSection {
                gstin: self.seller.gstin.clone(),
                state: self.seller.home_state.clone(),
                address: self.seller.address.clone(),
            },
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
