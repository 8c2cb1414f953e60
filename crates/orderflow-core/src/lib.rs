//! # orderflow-core: Order Placement Domain
//!
//! This crate contains the order placement workflow and the domain types it
//! works on. It has zero I/O dependencies: storage is reached only through the
//! collaborator traits in [`ports`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Orderflow Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Host request layer (HTTP, CLI, ...)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ execute(customer_id, lines)            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ orderflow-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  workflow │  │   ports   │  │   │
//! │  │   │  Order    │  │   Money   │  │  execute  │  │  traits   │  │   │
//! │  │   │ OrderLine │  │           │  │  policy   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CustomerLookup / ProductCatalog /      │
//! │                                │ OrderStore                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 orderflow-db (SQLite repositories)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, ProductSnapshot, Order, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Request precondition checks
//! - [`ports`] - Collaborator traits the workflow depends on
//! - [`workflow`] - `OrderCreationWorkflow` and its configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use orderflow_core::money::Money;
//! use orderflow_core::types::OrderLine;
//!
//! let line = OrderLine {
//!     product_id: "p1".to_string(),
//!     unit_price_cents: 1000,
//!     quantity: 3,
//! };
//! assert_eq!(line.line_total(), Money::from_cents(3000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod ports;
pub mod types;
pub mod validation;
pub mod workflow;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{OrderError, OrderResult, ValidationError};
pub use money::Money;
pub use ports::{CustomerLookup, OrderStore, ProductCatalog};
pub use types::*;
pub use workflow::{assemble_order, OrderCreationWorkflow, OrderPlan, StockCheckPolicy, WorkflowConfig};

/// Prefix for every environment variable read by the workspace.
pub const ENV_PREFIX: &str = "ORDERFLOW_";
