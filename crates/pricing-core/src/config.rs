//! # Seller Configuration
//!
//! The seller's registered identity, supplied at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PRICING_SELLER_*`)
//! 2. Defaults (this file, development only)
//!
//! The home state, GSTIN, and registered address are configuration, never
//! constants inside the computation: the same engine serves a seller
//! registered in any state.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock is needed;
//! share it by value or behind an `Arc`.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};
use crate::validation::{validate_gstin, validate_state_name};

/// Environment variable names.
const ENV_GSTIN: &str = "PRICING_SELLER_GSTIN";
const ENV_NAME: &str = "PRICING_SELLER_NAME";
const ENV_STATE: &str = "PRICING_SELLER_STATE";
const ENV_ADDRESS: &str = "PRICING_SELLER_ADDRESS";

// =============================================================================
// Seller Config
// =============================================================================

/// The seller's registered tax identity, printed on every invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerConfig {
    /// GST Identification Number of the seller.
    pub gstin: String,

    /// Registered legal name.
    pub legal_name: String,

    /// Registered address lines.
    pub address: Vec<String>,

    /// Home state; the intrastate/interstate decision compares billing
    /// states against this exact string.
    pub home_state: String,
}

impl SellerConfig {
    /// Loads configuration from `PRICING_SELLER_*` environment variables,
    /// falling back to development defaults per field.
    ///
    /// `PRICING_SELLER_ADDRESS` holds address lines separated by `|`.
    pub fn from_env() -> Self {
        let defaults = SellerConfig::default();

        SellerConfig {
            gstin: std::env::var(ENV_GSTIN).unwrap_or(defaults.gstin),
            legal_name: std::env::var(ENV_NAME).unwrap_or(defaults.legal_name),
            address: std::env::var(ENV_ADDRESS)
                .map(|raw| raw.split('|').map(|line| line.trim().to_string()).collect())
                .unwrap_or(defaults.address),
            home_state: std::env::var(ENV_STATE).unwrap_or(defaults.home_state),
        }
    }

    /// Validates the configuration, meant to run once at startup so a bad
    /// deployment fails fast instead of producing malformed invoices.
    pub fn validate(&self) -> PricingResult<()> {
        validate_gstin(&self.gstin)?;
        validate_state_name(&self.home_state)?;

        if self.legal_name.trim().is_empty() {
            return Err(PricingError::InvalidConfig {
                reason: "seller legal name is empty".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for SellerConfig {
    /// Development defaults: a gift retailer registered in Maharashtra.
    fn default() -> Self {
        SellerConfig {
            gstin: "27AAECG1234F1Z5".to_string(),
            legal_name: "Utsav Gifts Pvt Ltd".to_string(),
            address: vec![
                "14 Linking Road".to_string(),
                "Mumbai, Maharashtra 400050".to_string(),
            ],
            home_state: "Maharashtra".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
