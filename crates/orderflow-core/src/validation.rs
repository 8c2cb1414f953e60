//! # Validation Module
//!
//! Precondition checks for order requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (pure, before any collaborator call or insert)   │
//! │  ├── customer_id non-empty                                             │
//! │  ├── every quantity > 0                                                │
//! │  ├── lines non-empty (only when empty orders are disallowed)           │
//! │  └── catalog price and stock non-negative (product writes)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Workflow (needs catalog state)                               │
//! │  ├── customer exists                                                   │
//! │  ├── product exists                                                    │
//! │  └── stock available                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                     │
//! │  ├── NOT NULL / CHECK (quantity >= 0)                                  │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::OrderLineRequest;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a customer identifier.
///
/// ## Example
/// ```rust
/// use orderflow_core::validation::validate_customer_id;
///
/// assert!(validate_customer_id("C1").is_ok());
/// assert!(validate_customer_id("   ").is_err());
/// ```
pub fn validate_customer_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer_id".to_string(),
        });
    }

    Ok(())
}

/// Validates a requested quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a catalog stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (sold out)
pub fn validate_stock_level(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the requested lines.
///
/// Each line needs a product id and a positive quantity. An empty list is
/// accepted only when `allow_empty` is set.
pub fn validate_lines(lines: &[OrderLineRequest], allow_empty: bool) -> ValidationResult<()> {
    if lines.is_empty() && !allow_empty {
        return Err(ValidationError::Required {
            field: "lines".to_string(),
        });
    }

    for line in lines {
        if line.product_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "product_id".to_string(),
            });
        }
        validate_quantity(line.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
