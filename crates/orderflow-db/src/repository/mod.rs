//! # Repository Module
//!
//! Database repository implementations. Each repository also implements the
//! collaborator trait the workflow needs from it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderCreationWorkflow                                                  │
//! │       │                                                                 │
//! │       ├── CustomerLookup  ──► CustomerRepository  (customers)          │
//! │       ├── ProductCatalog  ──► ProductRepository   (products)           │
//! │       └── OrderStore      ──► OrderRepository     (orders,             │
//! │                                                    order_products)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All three share [`DbError`](crate::DbError), which the workflow surfaces
//! as `OrderError::Backend`.

pub mod customer;
pub mod order;
pub mod product;
