//! # Validation Module
//!
//! Input validation for catalog writes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                 │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: API + repository (Rust)                                       │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: field rules                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL constraints                                               │
//! │  └── CHECK constraints (price > 0, stock >= 0)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths are counted in characters, not bytes, so "Café" is 4 long.

use crate::error::ValidationError;
use crate::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MAX_PRICE_CENTS, MAX_STOCK_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 255 characters
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Desk Lamp").is_ok());
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

/// Validates an optional product description (at most 1000 characters).
pub fn validate_description(description: Option<&str>) -> ValidationResult<()> {
    match description {
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LENGTH => {
            Err(ValidationError::TooLong {
                field: "description".to_string(),
                max: MAX_DESCRIPTION_LENGTH,
            })
        }
        _ => Ok(()),
    }
}

/// Validates a name search fragment and returns it trimmed.
///
/// An empty fragment is allowed and matches every product.
pub fn validate_name_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be strictly positive
/// - At most 10 integer digits and 2 fraction digits (≤ 9,999,999,999.99)
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_err());
/// assert!(validate_price_cents(1_000_000_000_000).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 1,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a stock quantity: `0 ..= i32::MAX`.
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "stockQuantity".to_string(),
            min: 0,
            max: MAX_STOCK_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a product id string.
///
/// ## Example
/// ```rust
/// use shelf_core::validation::validate_product_id;
///
/// assert!(validate_product_id("0190f5c2-8a44-7d2e-9b1c-3f4e5a6b7c8d").is_ok());
/// assert!(validate_product_id("not-a-uuid").is_err());
/// ```
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Desk Lamp").is_ok());
        assert!(validate_product_name(&"A".repeat(255)).is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(256)).is_err());
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 255 two-byte characters is 510 bytes but still a valid name.
        assert!(validate_product_name(&"é".repeat(255)).is_ok());
        assert!(validate_product_name(&"é".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("")).is_ok());
        assert!(validate_description(Some(&"x".repeat(1000))).is_ok());
        assert_eq!(
            validate_description(Some(&"x".repeat(1001))),
            Err(ValidationError::TooLong {
                field: "description".to_string(),
                max: 1000
            })
        );
    }

    #[test]
    fn test_validate_name_query() {
        assert_eq!(validate_name_query("  lamp ").unwrap(), "lamp");
        assert_eq!(validate_name_query("").unwrap(), "");
        assert!(validate_name_query(&"q".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(1).is_ok());
        assert!(validate_price_cents(999_999_999_999).is_ok());

        assert!(matches!(
            validate_price_cents(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_price_cents(-100).is_err());
        assert!(matches!(
            validate_price_cents(1_000_000_000_000),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(i32::MAX as i64).is_ok());

        assert!(validate_stock_quantity(-1).is_err());
        assert!(validate_stock_quantity(i32::MAX as i64 + 1).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("not-a-uuid").is_err());
        assert!(validate_product_id("123").is_err());
    }
}
