//! # Validation Module
//!
//! Argument checks run before a product or review is constructed.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Record codec (catalog-store)                                 │
//! │  └── Field count, numbers, dates → DecodeError                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Name present and bounded                                          │
//! │  └── Price not negative                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CatalogStore                                                 │
//! │  └── Insert-if-absent on product id                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::MAX_NAME_LENGTH;

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Tea").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// Zero is allowed (free samples); negative prices are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
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
    fn test_valid_names() {
        assert!(validate_product_name("Tea").is_ok());
        assert!(validate_product_name("  Chocolate Cake  ").is_ok());
        assert!(validate_product_name(&"x".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(
            validate_product_name(""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(matches!(
            validate_product_name(&"x".repeat(MAX_NAME_LENGTH + 1)),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(199)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }
}
