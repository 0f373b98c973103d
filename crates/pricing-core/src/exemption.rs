//! # Exemption Policy
//!
//! A side-table of rules that can zero out tax regardless of category or
//! rate. The check is **advisory**: it never suppresses calculator output
//! itself, the caller decides to skip tax when a rule matches (the totals
//! assembler does exactly that).
//!
//! ## Rule Order
//! First match wins:
//! 1. Order amount below the small-order threshold → exempt
//! 2. Category appears in the exempt-category table → exempt
//! 3. Otherwise not exempt

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::money::Money;

/// Orders below this amount are tax-exempt (₹500.00).
pub const SMALL_ORDER_THRESHOLD_PAISE: i64 = 50_000;

// =============================================================================
// Exemption Decision
// =============================================================================

/// Outcome of an exemption check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExemptionDecision {
    pub exempt: bool,

    /// Human-readable rule that matched; `None` when not exempt.
    pub reason: Option<String>,
}

impl ExemptionDecision {
    fn not_exempt() -> Self {
        ExemptionDecision {
            exempt: false,
            reason: None,
        }
    }

    fn exempt(reason: &str) -> Self {
        ExemptionDecision {
            exempt: true,
            reason: Some(reason.to_string()),
        }
    }
}

// =============================================================================
// Exemption Policy
// =============================================================================

/// Immutable exemption rule table, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ExemptionPolicy {
    /// Orders strictly below this amount are exempt.
    small_order_threshold: Money,

    /// Category → exemption reason.
    exempt_categories: HashMap<String, String>,
}

impl ExemptionPolicy {
    /// Builds a policy with explicit rules.
    pub fn new(
        small_order_threshold: Money,
        exempt_categories: HashMap<String, String>,
    ) -> Self {
        ExemptionPolicy {
            small_order_threshold,
            exempt_categories,
        }
    }

    /// Checks the rules in order against an order amount and category.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::exemption::ExemptionPolicy;
    /// use pricing_core::money::Money;
    ///
    /// let policy = ExemptionPolicy::default();
    /// let decision = policy.check_exemption(Money::from_paise(49_999), "gifts");
    /// assert!(decision.exempt);
    /// ```
    pub fn check_exemption(&self, order_amount: Money, category: &str) -> ExemptionDecision {
        if order_amount < self.small_order_threshold {
            return ExemptionDecision::exempt("small order");
        }

        if let Some(reason) = self.exempt_categories.get(category) {
            return ExemptionDecision::exempt(reason);
        }

        ExemptionDecision::not_exempt()
    }
}

impl Default for ExemptionPolicy {
    /// The production rules: sub-₹500 orders and educational material.
    fn default() -> Self {
        let mut exempt_categories = HashMap::new();
        exempt_categories.insert("books".to_string(), "educational material".to_string());

        ExemptionPolicy {
            small_order_threshold: Money::from_paise(SMALL_ORDER_THRESHOLD_PAISE),
            exempt_categories,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
