//! # Domain Types
//!
//! Core domain types used by the order creation workflow.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT                      CATALOG STATE            OUTPUT             │
//! │  ┌──────────────────┐      ┌──────────────────┐     ┌────────────────┐ │
//! │  │ OrderLineRequest │      │ ProductSnapshot  │     │     Order      │ │
//! │  │  product_id      │ ───► │  id              │ ──► │  id            │ │
//! │  │  quantity        │      │  price_cents     │     │  customer_id   │ │
//! │  └──────────────────┘      │  quantity        │     │  lines[]       │ │
//! │                            └──────────────────┘     └────────────────┘ │
//! │                                     │                       ▲           │
//! │                                     ▼                       │           │
//! │                            ┌──────────────────┐     ┌────────────────┐ │
//! │                            │QuantityAdjustment│     │   OrderLine    │ │
//! │                            │  product_id      │     │  product_id    │ │
//! │                            │  quantity (new)  │     │  unit_price    │ │
//! │                            └──────────────────┘     │  quantity      │ │
//! │                                                     └────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `OrderLine` copies the unit price from the catalog at order time. Later
//! price changes never alter a stored order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A customer who can place orders.
///
/// The workflow only needs to know that the customer exists; the remaining
/// fields belong to the customer record kept by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Contact email, unique per customer.
    pub email: String,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// A product as read from the catalog at request time.
///
/// Not re-validated after use: the authoritative stock value may have moved
/// on by the time the order is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSnapshot {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in cents (non-negative).
    pub price_cents: i64,

    /// Available quantity (non-negative).
    pub quantity: i64,
}

impl ProductSnapshot {
    /// Checks whether `requested` units can be taken from this snapshot.
    #[inline]
    pub fn has_stock_for(&self, requested: i64) -> bool {
        requested <= self.quantity
    }
}

// =============================================================================
// Order Line Request
// =============================================================================

/// One requested (product, quantity) pair from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub product_id: String,
    pub quantity: i64,
}

impl OrderLineRequest {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        OrderLineRequest {
            product_id: product_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze the product price at time of order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub product_id: String,
    /// Unit price in cents at time of order (frozen).
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl OrderLine {
    /// Builds a line from a catalog snapshot and the requested quantity.
    pub fn from_snapshot(snapshot: &ProductSnapshot, quantity: i64) -> Self {
        OrderLine {
            product_id: snapshot.id.clone(),
            unit_price_cents: snapshot.price_cents,
            quantity,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// New Order
// =============================================================================

/// A fully validated order that has not been persisted yet.
///
/// Handed to [`OrderStore::create`](crate::ports::OrderStore::create), which
/// assigns identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer: Customer,
    pub lines: Vec<OrderLine>,
}

// =============================================================================
// Order
// =============================================================================

/// A persisted order. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    /// Lines in the same order as the request.
    pub lines: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Quantity Adjustment
// =============================================================================

/// New stock level for a product, applied after the order is persisted.
///
/// `quantity` is the resulting value (snapshot quantity minus requested
/// quantity), not a delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityAdjustment {
    pub product_id: String,
    pub quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(id: &str, price_cents: i64, quantity: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: id.to_string(),
            name: format!("Product {id}"),
            price_cents,
            quantity,
        }
    }

    #[test]
    fn test_has_stock_for() {
        let p = snapshot("P1", 1000, 5);
        assert!(p.has_stock_for(3));
        assert!(p.has_stock_for(5));
        assert!(!p.has_stock_for(6));
    }

    #[test]
    fn test_line_copies_snapshot_price() {
        let mut p = snapshot("P1", 1000, 5);
        let line = OrderLine::from_snapshot(&p, 3);

        // Later catalog price change must not leak into the line.
        p.price_cents = 2500;

        assert_eq!(line.unit_price_cents, 1000);
        assert_eq!(line.line_total(), Money::from_cents(3000));
    }

    #[test]
    fn test_order_total_and_units() {
        let order = Order {
            id: "o1".to_string(),
            customer_id: "C1".to_string(),
            lines: vec![
                OrderLine::from_snapshot(&snapshot("P1", 1000, 5), 3),
                OrderLine::from_snapshot(&snapshot("P2", 250, 10), 4),
            ],
            created_at: Utc::now(),
        };
        assert_eq!(order.total().cents(), 4000);
        assert_eq!(order.unit_count(), 7);
    }

    #[test]
    fn test_line_request_deserializes() {
        let req: OrderLineRequest =
            serde_json::from_str(r#"{"product_id":"P1","quantity":3}"#).unwrap();
        assert_eq!(req, OrderLineRequest::new("P1", 3));
    }
}
