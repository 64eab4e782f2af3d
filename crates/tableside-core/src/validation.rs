//! # Validation Module
//!
//! Input validation for every inbound command.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (apps/api)                                   │
//! │  ├── JSON syntax, field presence, field types                          │
//! │  └── Path/query parameter types                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commands (tableside-core)                                    │
//! │  └── THIS MODULE: ranges, lengths, decimal precision                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints (price range, quantity > 0)                     │
//! │  ├── Partial UNIQUE index (one open session per table)                 │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tableside_core::validation::{validate_id, validate_quantity};
//!
//! assert_eq!(validate_id("table_id", 4).unwrap(), 4);
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ORDER_QUANTITY, MAX_PRICE_CENTS, MAX_PRODUCT_NAME_LEN, MIN_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product search filter.
const MAX_SEARCH_QUERY_LEN: usize = 100;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a storage identifier.
///
/// ## Rules
/// - Must be a positive integer
pub fn validate_id(field: &str, id: i64) -> ValidationResult<i64> {
    if id <= 0 {
        return Err(ValidationError::must_be_positive(field));
    }
    Ok(id)
}

/// Parses and validates an identifier given as text (path segments).
///
/// ```rust
/// use tableside_core::validation::parse_id;
///
/// assert_eq!(parse_id("id", "12").unwrap(), 12);
/// assert!(parse_id("id", "twelve").is_err());
/// assert!(parse_id("id", "-1").is_err());
/// ```
pub fn parse_id(field: &str, raw: &str) -> ValidationResult<i64> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_format(field, "must be an integer"))?;
    validate_id(field, id)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Leading and trailing whitespace is removed
/// - Between MIN_PRODUCT_NAME_LEN (6) and MAX_PRODUCT_NAME_LEN (200)
///   characters after trimming
///
/// ## Example
/// ```rust
/// use tableside_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Pizza Margherita ").unwrap(), "Pizza Margherita");
/// assert!(validate_product_name("abc").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();
    let len = name.chars().count();

    if len == 0 {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if len < MIN_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_PRODUCT_NAME_LEN,
        });
    }

    if len > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a product search filter.
///
/// ## Rules
/// - Missing or blank means "no filter"
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed filter, or `None` when every product should match.
pub fn validate_search_query(query: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
        return Ok(None);
    };

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(Some(query.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ORDER_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// Waiter enters quantity: 2
///      │
///      ▼
/// validate_quantity(2) ← THIS FUNCTION
///      │
///      ├── qty <= 0?  → "quantity must be positive"
///      ├── qty > 999? → "quantity must be between 1 and 999"
///      └── OK → place order
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<i64> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    if qty > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ORDER_QUANTITY,
        });
    }

    Ok(qty)
}

/// Validates a menu price.
///
/// ## Rules
/// - Must be greater than zero (no free items on the menu)
/// - At most [`MAX_PRICE_CENTS`]
///
/// Decimal precision is enforced when the price is parsed into [`Money`].
pub fn validate_price(price: Money) -> ValidationResult<Money> {
    if !price.is_positive() {
        return Err(ValidationError::must_be_positive("price"));
    }
    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS / 100,
        });
    }
    Ok(price)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id("table_id", 1).unwrap(), 1);
        assert!(validate_id("table_id", 0).is_err());
        assert!(validate_id("table_id", -7).is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("id", " 3 ").unwrap(), 3);
        assert!(parse_id("id", "").is_err());
        assert!(parse_id("id", "1.5").is_err());
        assert!(parse_id("id", "0").is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("Tiramisu").unwrap(), "Tiramisu");
        assert_eq!(validate_product_name(" Lasagna ").unwrap(), "Lasagna");

        assert!(matches!(
            validate_product_name("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_product_name("abc"),
            Err(ValidationError::TooShort { min: 6, .. })
        ));
        assert!(matches!(
            validate_product_name(&"A".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_product_name_length_counts_characters() {
        // six characters, more than six bytes
        assert!(validate_product_name("Crêpes").is_ok());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query(None).unwrap(), None);
        assert_eq!(validate_search_query(Some("  ")).unwrap(), None);
        assert_eq!(
            validate_search_query(Some(" pizza ")).unwrap(),
            Some("pizza".to_string())
        );
        assert!(validate_search_query(Some(&"x".repeat(101))).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity(1).unwrap(), 1);
        assert_eq!(validate_quantity(999).unwrap(), 999);

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(2550)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());

        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        let err = validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)).unwrap_err();
        assert_eq!(err.to_string(), "price must be between 0 and 1000000");
    }
}
