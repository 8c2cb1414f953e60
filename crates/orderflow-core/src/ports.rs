//! # Collaborator Traits
//!
//! The workflow reaches storage only through these three traits.
//!
//! ```text
//! OrderCreationWorkflow
//!   ├── CustomerLookup::find_by_id      (1 read)
//!   ├── ProductCatalog::fetch_all       (1 batched read)
//!   ├── OrderStore::create              (1 atomic write)
//!   └── ProductCatalog::decrement       (1 batched write, after create)
//! ```
//!
//! Implementations live in `orderflow-db` (SQLite). Each trait names its own
//! `Error`; the workflow passes that error through untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::types::{Customer, NewOrder, Order, ProductSnapshot, QuantityAdjustment};

/// Resolves customer identifiers.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns `Ok(None)` when the customer does not exist.
    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, Self::Error>;
}

/// Read and write access to product stock.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches snapshots for all `ids` in one round-trip.
    ///
    /// Unknown ids are simply missing from the result.
    async fn fetch_all(&self, ids: &BTreeSet<String>) -> Result<Vec<ProductSnapshot>, Self::Error>;

    /// Applies new stock levels as one batch.
    async fn decrement(&self, adjustments: &[QuantityAdjustment]) -> Result<(), Self::Error>;
}

/// Persists orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stores the order and all its lines atomically, returning the stored
    /// order with its assigned id.
    async fn create(&self, order: NewOrder) -> Result<Order, Self::Error>;
}

// =============================================================================
// Shared-ownership forwarding
// =============================================================================

#[async_trait]
impl<T: CustomerLookup + ?Sized> CustomerLookup for Arc<T> {
    type Error = T::Error;

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, Self::Error> {
        (**self).find_by_id(id).await
    }
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    type Error = T::Error;

    async fn fetch_all(&self, ids: &BTreeSet<String>) -> Result<Vec<ProductSnapshot>, Self::Error> {
        (**self).fetch_all(ids).await
    }

    async fn decrement(&self, adjustments: &[QuantityAdjustment]) -> Result<(), Self::Error> {
        (**self).decrement(adjustments).await
    }
}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    type Error = T::Error;

    async fn create(&self, order: NewOrder) -> Result<Order, Self::Error> {
        (**self).create(order).await
    }
}
