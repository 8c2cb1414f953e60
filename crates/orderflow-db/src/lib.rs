//! # orderflow-db: SQLite Persistence for Orderflow
//!
//! This crate provides the database-backed collaborators for the order
//! creation workflow. It uses SQLite for storage with sqlx for async
//! operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Orderflow Data Flow                              │
//! │                                                                         │
//! │  OrderCreationWorkflow::execute (orderflow-core)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  orderflow-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐  ┌──────────────┐ │   │
//! │  │   │   Database    │    │   Repositories    │  │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │                   │  │  (embedded)  │ │   │
//! │  │   │               │    │ CustomerRepo  ──► CustomerLookup   │ │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   ──► ProductCatalog   │ │   │
//! │  │   │               │    │ OrderRepo     ──► OrderStore       │ │   │
//! │  │   └───────────────┘    └───────────────────┘  └──────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (ORDERFLOW_DB_PATH)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (customer, product, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orderflow_core::{OrderLineRequest, WorkflowConfig};
//! use orderflow_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()).await?;
//!
//! let order = db
//!     .order_workflow(WorkflowConfig::from_env())
//!     .execute(&customer_id, &[OrderLineRequest::new(product_id, 3)])
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, SqliteOrderWorkflow, DEFAULT_DB_PATH};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
