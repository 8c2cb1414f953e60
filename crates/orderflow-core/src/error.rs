//! # Error Types
//!
//! Domain-specific error types for orderflow-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderflow-core errors (this file)                                     │
//! │  ├── OrderError<E>    - Workflow failures                              │
//! │  │   ├── CustomerNotFound / ProductNotFound / InsufficientStock        │
//! │  │   ├── Validation(ValidationError)                                   │
//! │  │   └── Backend(E)   - collaborator failure, passed through as-is     │
//! │  └── ValidationError  - Request precondition failures                  │
//! │                                                                         │
//! │  orderflow-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures (the usual E)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product ID, quantities)
//! 3. Errors are enum variants, never String
//! 4. Collaborator errors are never reinterpreted

use thiserror::Error;

// =============================================================================
// Order Error
// =============================================================================

/// Errors returned by [`OrderCreationWorkflow::execute`].
///
/// `E` is the error type shared by the collaborators (for the SQLite
/// repositories it is `DbError`).
///
/// [`OrderCreationWorkflow::execute`]: crate::workflow::OrderCreationWorkflow::execute
#[derive(Debug, Error)]
pub enum OrderError<E> {
    /// The customer does not exist.
    ///
    /// Raised before any catalog read.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// A requested product does not exist in the catalog.
    ///
    /// ## When This Occurs
    /// - Product ID was never created
    /// - The catalog returned fewer snapshots than requested IDs
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds the available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Request: P1 × 9
    ///      │
    ///      ▼
    /// Catalog snapshot: P1 available = 5
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "P1", requested: 9, available: 5 }
    ///      │
    ///      ▼
    /// No order written, P1 stays at 5
    /// ```
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// The request itself is malformed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A collaborator (lookup, catalog or store) failed.
    #[error(transparent)]
    Backend(E),
}

impl<E> OrderError<E> {
    /// Returns true for either not-found variant.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OrderError::CustomerNotFound(_) | OrderError::ProductNotFound(_)
        )
    }

    /// Returns true when the failure came from the caller's input rather than
    /// from a collaborator.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, OrderError::Backend(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when the request doesn't meet the workflow's
/// preconditions. They are raised before any collaborator is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. unknown policy name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for workflow results.
pub type OrderResult<T, E> = Result<T, OrderError<E>>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("disk on fire")]
    struct Boom;

    #[test]
    fn test_error_messages() {
        let err: OrderError<Boom> = OrderError::InsufficientStock {
            product_id: "P1".to_string(),
            requested: 9,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for P1: available 5, requested 9"
        );

        let err: OrderError<Boom> = OrderError::CustomerNotFound("C9".to_string());
        assert_eq!(err.to_string(), "Customer not found: C9");
    }

    #[test]
    fn test_backend_error_is_transparent() {
        let err: OrderError<Boom> = OrderError::Backend(Boom);
        assert_eq!(err.to_string(), "disk on fire");
        assert!(!err.is_rejection());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_validation_converts_to_order_error() {
        let validation_err = ValidationError::Required {
            field: "customer_id".to_string(),
        };
        let err: OrderError<Boom> = validation_err.into();
        assert!(matches!(err, OrderError::Validation(_)));
        assert!(err.is_rejection());
    }

    #[test]
    fn test_not_found_classification() {
        let customer: OrderError<Boom> = OrderError::CustomerNotFound("C1".into());
        let product: OrderError<Boom> = OrderError::ProductNotFound("P1".into());
        assert!(customer.is_not_found());
        assert!(product.is_not_found());
    }
}
