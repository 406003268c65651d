//! # Validation Module
//!
//! Checks on caller-supplied cart input.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller JSON / args                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartLine::new / deserialize  ◄── THIS MODULE                           │
//! │       │   quantity ≥ 1, unit price finite and ≥ 0                      │
//! │       ▼                                                                 │
//! │  compute_cart_total  (cannot fail from here on)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Product ids are not checked. An id no campaign references simply gets no
//! discount. Campaign records are not validated here either: the normalizer
//! drops bad records instead of rejecting them.

use crate::error::ValidationError;
use crate::price::Price;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## Example
/// ```rust
/// use titan_promo_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(5000).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_unit_price(amount: f64) -> ValidationResult<()> {
    if !Price::new(amount).is_valid_amount() {
        return Err(ValidationError::InvalidAmount {
            field: "unitPrice".to_string(),
            value: amount,
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
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());
        assert!(validate_quantity(i64::MAX).is_ok());

        assert_eq!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0.0).is_ok());
        assert!(validate_unit_price(19.99).is_ok());

        assert!(validate_unit_price(-0.01).is_err());
        assert!(validate_unit_price(f64::NAN).is_err());
        assert!(validate_unit_price(f64::INFINITY).is_err());
    }
}
