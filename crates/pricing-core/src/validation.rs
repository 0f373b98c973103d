//! # Validation Module
//!
//! Input validation utilities for the pricing engine.
//!
//! ## Validation Strategy
//! The engine is deliberately permissive about *data drift* (an unknown
//! category or state falls back to defaults, with a warning) but strict
//! about *caller bugs*: a negative monetary amount is never computed on,
//! it is rejected up front. Validators here run before any money math.
//!
//! ## Usage
//! ```rust
//! use pricing_core::money::Money;
//! use pricing_core::validation::{validate_amount, validate_coupon_code};
//!
//! validate_amount(Money::from_rupees(100)).unwrap();
//! validate_coupon_code("FEST10").unwrap();
//! ```

use crate::error::{PricingError, ValidationError};
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Monetary Validators
// =============================================================================

/// Validates a monetary input amount.
///
/// ## Rules
/// - Must be non-negative (zero is a legal order amount)
///
/// Unknown categories and states degrade gracefully elsewhere; negative
/// money never does. It is a caller bug and is rejected outright.
pub fn validate_amount(amount: Money) -> Result<(), PricingError> {
    if amount.is_negative() {
        return Err(PricingError::InvalidAmount { amount });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a coupon code.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 32 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: 32,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "coupon code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a GSTIN (GST Identification Number).
///
/// ## Rules
/// - Exactly 15 characters
/// - First two characters are the numeric state code
/// - Characters 3-12 are the PAN (uppercase alphanumeric)
/// - Character 14 is always 'Z'
///
/// The checksum digit is not verified; registration validity is the tax
/// authority's problem, format validity is ours.
pub fn validate_gstin(gstin: &str) -> ValidationResult<()> {
    let gstin = gstin.trim();

    if gstin.is_empty() {
        return Err(ValidationError::Required {
            field: "gstin".to_string(),
        });
    }

    if gstin.len() != 15 {
        return Err(ValidationError::InvalidFormat {
            field: "gstin".to_string(),
            reason: "must be exactly 15 characters".to_string(),
        });
    }

    let bytes = gstin.as_bytes();

    if !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
        return Err(ValidationError::InvalidFormat {
            field: "gstin".to_string(),
            reason: "must start with a two-digit state code".to_string(),
        });
    }

    if !gstin
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    {
        return Err(ValidationError::InvalidFormat {
            field: "gstin".to_string(),
            reason: "must contain only digits and uppercase letters".to_string(),
        });
    }

    if bytes[13] != b'Z' {
        return Err(ValidationError::InvalidFormat {
            field: "gstin".to_string(),
            reason: "character 14 must be 'Z'".to_string(),
        });
    }

    Ok(())
}

/// Validates a state name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
///
/// Note this does NOT check the name against the state table: an unlisted
/// state is still usable for the interstate comparison.
pub fn validate_state_name(state: &str) -> ValidationResult<()> {
    let state = state.trim();

    if state.is_empty() {
        return Err(ValidationError::Required {
            field: "state".to_string(),
        });
    }

    if state.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "state".to_string(),
            max: 50,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - GST slabs in practice are 0-2800 (0% to 28%)
pub fn validate_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Money::zero()).is_ok());
        assert!(validate_amount(Money::from_rupees(100)).is_ok());

        let err = validate_amount(Money::from_paise(-1)).unwrap_err();
        assert!(matches!(err, PricingError::InvalidAmount { .. }));
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("FEST10").is_ok());
        assert!(validate_coupon_code("diwali_2025").is_ok());
        assert!(validate_coupon_code("NEW-USER").is_ok());

        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("   ").is_err());
        assert!(validate_coupon_code("has space").is_err());
        assert!(validate_coupon_code(&"A".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_gstin() {
        assert!(validate_gstin("27AAECG1234F1Z5").is_ok());

        assert!(validate_gstin("").is_err());
        assert!(validate_gstin("27AAECG1234F1Z").is_err()); // 14 chars
        assert!(validate_gstin("XXAAECG1234F1Z5").is_err()); // no state code
        assert!(validate_gstin("27aaecg1234f1z5").is_err()); // lowercase
        assert!(validate_gstin("27AAECG1234F1X5").is_err()); // 14th char not Z
    }

    #[test]
    fn test_validate_state_name() {
        assert!(validate_state_name("Maharashtra").is_ok());
        assert!(validate_state_name("").is_err());
        assert!(validate_state_name(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_rate_bps() {
        assert!(validate_rate_bps(0).is_ok());
        assert!(validate_rate_bps(1800).is_ok());
        assert!(validate_rate_bps(10_000).is_ok());
        assert!(validate_rate_bps(10_001).is_err());
    }
}
