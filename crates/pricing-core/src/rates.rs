//! # Rate Table
//!
//! The immutable lookup tables behind every tax computation: category → GST
//! rate, category → HSN code, and state name → GST state code.
//!
//! ## Design Notes
//! - Built once at startup and shared via `Arc` into each component. Never a
//!   hidden global, never mutated after construction.
//! - `rate_for` never errors: an unknown category falls back to the
//!   mandatory `default` entry so checkout keeps working through catalog
//!   data drift. The fallback is logged at `warn` so it is observable in
//!   production rather than silent.
//! - The HSN table defaults every category to "9505" (festival and gift
//!   articles, the store's product line); deployments override per
//!   category via [`RateTable::with_hsn`].

use std::collections::HashMap;

use tracing::warn;

use crate::error::{PricingError, PricingResult};
use crate::types::TaxRate;
use crate::validation::validate_rate_bps;

/// The category every unknown category falls back to.
pub const DEFAULT_CATEGORY: &str = "default";

/// HSN code used when a category has no explicit entry.
/// 9505: festive, carnival and other entertainment articles.
pub const DEFAULT_HSN_CODE: &str = "9505";

// =============================================================================
// Rate Table
// =============================================================================

/// Immutable category and region lookup tables.
///
/// Safe to share across any number of concurrent callers; all methods take
/// `&self` and nothing mutates after construction.
#[derive(Debug, Clone)]
pub struct RateTable {
    /// Category → GST rate. Always contains [`DEFAULT_CATEGORY`].
    rates: HashMap<String, TaxRate>,

    /// Category → HSN code overrides. Missing entries resolve to
    /// [`DEFAULT_HSN_CODE`].
    hsn_codes: HashMap<String, String>,

    /// State name → two-digit GST state code.
    state_codes: HashMap<String, String>,
}

impl RateTable {
    /// Builds the production table: GST slabs for the store's categories
    /// and the full Indian state/UT code list.
    pub fn india() -> Self {
        let mut rates = HashMap::new();
        for (category, bps) in [
            (DEFAULT_CATEGORY, 1800),
            ("gifts", 1800),
            ("electronics", 1800),
            ("home-decor", 1200),
            ("toys", 1200),
            ("stationery", 1200),
            ("handicrafts", 1200),
            ("apparel", 500),
            ("food", 500),
            ("jewellery", 300),
            ("books", 0),
        ] {
            rates.insert(category.to_string(), TaxRate::from_bps(bps));
        }

        let mut state_codes = HashMap::new();
        for (name, code) in [
            ("Jammu and Kashmir", "01"),
            ("Himachal Pradesh", "02"),
            ("Punjab", "03"),
            ("Chandigarh", "04"),
            ("Uttarakhand", "05"),
            ("Haryana", "06"),
            ("Delhi", "07"),
            ("Rajasthan", "08"),
            ("Uttar Pradesh", "09"),
            ("Bihar", "10"),
            ("Sikkim", "11"),
            ("Arunachal Pradesh", "12"),
            ("Nagaland", "13"),
            ("Manipur", "14"),
            ("Mizoram", "15"),
            ("Tripura", "16"),
            ("Meghalaya", "17"),
            ("Assam", "18"),
            ("West Bengal", "19"),
            ("Jharkhand", "20"),
            ("Odisha", "21"),
            ("Chhattisgarh", "22"),
            ("Madhya Pradesh", "23"),
            ("Gujarat", "24"),
            ("Dadra and Nagar Haveli and Daman and Diu", "26"),
            ("Maharashtra", "27"),
            ("Karnataka", "29"),
            ("Goa", "30"),
            ("Lakshadweep", "31"),
            ("Kerala", "32"),
            ("Tamil Nadu", "33"),
            ("Puducherry", "34"),
            ("Andaman and Nicobar Islands", "35"),
            ("Telangana", "36"),
            ("Andhra Pradesh", "37"),
            ("Ladakh", "38"),
        ] {
            state_codes.insert(name.to_string(), code.to_string());
        }

        RateTable {
            rates,
            hsn_codes: HashMap::new(),
            state_codes,
        }
    }

    /// Builds a table from explicit parts.
    ///
    /// ## Errors
    /// Fails with [`PricingError::MissingDefaultRate`] if `rates` has no
    /// [`DEFAULT_CATEGORY`] entry, since every unknown-category lookup
    /// resolves through it, and with a validation error on any rate
    /// above 100%.
    pub fn from_parts(
        rates: HashMap<String, TaxRate>,
        hsn_codes: HashMap<String, String>,
        state_codes: HashMap<String, String>,
    ) -> PricingResult<Self> {
        if !rates.contains_key(DEFAULT_CATEGORY) {
            return Err(PricingError::MissingDefaultRate);
        }
        for rate in rates.values() {
            validate_rate_bps(rate.bps())?;
        }

        Ok(RateTable {
            rates,
            hsn_codes,
            state_codes,
        })
    }

    /// Returns a copy of this table with one category rate replaced or added.
    pub fn with_rate(mut self, category: impl Into<String>, rate: TaxRate) -> Self {
        self.rates.insert(category.into(), rate);
        self
    }

    /// Returns a copy of this table with an HSN override for one category.
    pub fn with_hsn(mut self, category: impl Into<String>, hsn: impl Into<String>) -> Self {
        self.hsn_codes.insert(category.into(), hsn.into());
        self
    }

    /// Looks up the GST rate for a category.
    ///
    /// Never errors: unrecognized categories fall back to the `default`
    /// rate so checkout survives catalog drift. The fallback is logged.
    pub fn rate_for(&self, category: &str) -> TaxRate {
        match self.rates.get(category) {
            Some(rate) => *rate,
            None => {
                warn!(category, "unknown product category, using default GST rate");
                self.rates[DEFAULT_CATEGORY]
            }
        }
    }

    /// Looks up the HSN code for a category, defaulting to
    /// [`DEFAULT_HSN_CODE`].
    pub fn hsn_for(&self, category: &str) -> &str {
        self.hsn_codes
            .get(category)
            .map(String::as_str)
            .unwrap_or(DEFAULT_HSN_CODE)
    }

    /// Looks up the GST state code for a state name. Absent is not an
    /// error; callers must handle it.
    pub fn state_code(&self, state: &str) -> Option<&str> {
        self.state_codes.get(state).map(String::as_str)
    }

    /// Checks whether a state name appears in the region table.
    pub fn is_known_state(&self, state: &str) -> bool {
        self.state_codes.contains_key(state)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rates() {
        let table = RateTable::india();
        assert_eq!(table.rate_for("gifts"), TaxRate::from_bps(1800));
        assert_eq!(table.rate_for("books"), TaxRate::from_bps(0));
        assert_eq!(table.rate_for(DEFAULT_CATEGORY), TaxRate::from_bps(1800));
    }

    #[test]
    fn test_unknown_category_falls_back_to_default() {
        let table = RateTable::india();
        assert_eq!(
            table.rate_for("nonexistent-category"),
            table.rate_for(DEFAULT_CATEGORY)
        );
    }

    #[test]
    fn test_state_codes() {
        let table = RateTable::india();
        assert_eq!(table.state_code("Maharashtra"), Some("27"));
        assert_eq!(table.state_code("Karnataka"), Some("29"));
        assert_eq!(table.state_code("Narnia"), None);

        assert!(table.is_known_state("Kerala"));
        assert!(!table.is_known_state("maharashtra")); // exact match only
    }

    #[test]
    fn test_hsn_defaults_and_overrides() {
        let table = RateTable::india();
        assert_eq!(table.hsn_for("gifts"), "9505");
        assert_eq!(table.hsn_for("anything-else"), "9505");

        let table = table.with_hsn("books", "4901");
        assert_eq!(table.hsn_for("books"), "4901");
        assert_eq!(table.hsn_for("gifts"), "9505");
    }

    #[test]
    fn test_from_parts_requires_default() {
        let mut rates = HashMap::new();
        rates.insert("gifts".to_string(), TaxRate::from_bps(1800));

        let err =
            RateTable::from_parts(rates.clone(), HashMap::new(), HashMap::new()).unwrap_err();
        assert!(matches!(err, PricingError::MissingDefaultRate));

        rates.insert(DEFAULT_CATEGORY.to_string(), TaxRate::from_bps(1800));
        assert!(RateTable::from_parts(rates, HashMap::new(), HashMap::new()).is_ok());
    }

    #[test]
    fn test_from_parts_rejects_rate_above_100_percent() {
        let mut rates = HashMap::new();
        rates.insert(DEFAULT_CATEGORY.to_string(), TaxRate::from_bps(10_001));

        let err = RateTable::from_parts(rates, HashMap::new(), HashMap::new()).unwrap_err();
        assert!(matches!(err, PricingError::Validation(_)));
    }

    #[test]
    fn test_with_rate_overrides() {
        let table = RateTable::india().with_rate("gifts", TaxRate::from_bps(1200));
        assert_eq!(table.rate_for("gifts"), TaxRate::from_bps(1200));
    }
}
