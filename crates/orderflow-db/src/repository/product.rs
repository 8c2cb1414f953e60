//! # Product Repository
//!
//! Database operations for products: the catalog side of order placement.
//!
//! ## Key Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Round-Trips per Order                       │
//! │                                                                         │
//! │  fetch_all({P1, P2, P3})                                               │
//! │       │   SELECT ... FROM products WHERE id IN (?1, ?2, ?3)            │
//! │       ▼                                                                 │
//! │  [P1, P3]            ← P2 unknown: simply absent                       │
//! │                                                                         │
//! │  decrement([P1 → 2, P3 → 0])                                           │
//! │       │   BEGIN                                                         │
//! │       │   UPDATE products SET quantity = 2 WHERE id = 'P1'             │
//! │       │   UPDATE products SET quantity = 0 WHERE id = 'P3'             │
//! │       ▼   COMMIT  (or ROLLBACK on the first unknown id)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use orderflow_core::validation::{validate_price_cents, validate_stock_level};
use orderflow_core::{ProductCatalog, ProductSnapshot, QuantityAdjustment};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.create("Widget", 1000, 5).await?;
/// let snapshots = repo.fetch_all(&ids).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Builds and inserts a product with a fresh id.
    pub async fn create(&self, name: &str, price_cents: i64, quantity: i64) -> DbResult<ProductSnapshot> {
        let product = ProductSnapshot {
            id: generate_product_id(),
            name: name.to_string(),
            price_cents,
            quantity,
        };

        self.insert(&product).await
    }

    /// Inserts a product.
    ///
    /// ## Returns
    /// * `Ok(ProductSnapshot)` - Inserted product
    /// * `Err(DbError::UniqueViolation)` - ID already exists
    /// * `Err(DbError::Validation)` - Negative price or quantity, nothing sent
    pub async fn insert(&self, product: &ProductSnapshot) -> DbResult<ProductSnapshot> {
        validate_price_cents(product.price_cents)?;
        validate_stock_level(product.quantity)?;

        debug!(id = %product.id, name = %product.name, "Inserting product");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price_cents, quantity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price_cents)
        .bind(product.quantity)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(product.clone())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(ProductSnapshot))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<ProductSnapshot>> {
        let product = sqlx::query_as::<_, ProductSnapshot>(
            r#"
            SELECT id, name, price_cents, quantity
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Fetches all products whose id is in `ids`, in one query.
    ///
    /// Unknown ids are absent from the result; an empty set returns an empty
    /// list without touching the database.
    pub async fn fetch_all(&self, ids: &BTreeSet<String>) -> DbResult<Vec<ProductSnapshot>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=ids.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "SELECT id, name, price_cents, quantity FROM products WHERE id IN ({placeholders})"
        );

        let mut query = sqlx::query_as::<_, ProductSnapshot>(&sql);
        for id in ids {
            query = query.bind(id);
        }

        let products = query.fetch_all(&self.pool).await?;

        debug!(requested = ids.len(), found = products.len(), "Fetched products");
        Ok(products)
    }

    /// Writes new stock levels for a batch of products in one transaction.
    ///
    /// ## Returns
    /// * `Ok(())` - Every product updated
    /// * `Err(DbError::NotFound)` - An id does not exist; nothing is written
    /// * `Err(DbError::CheckViolation)` - A resulting quantity is negative
    pub async fn decrement(&self, adjustments: &[QuantityAdjustment]) -> DbResult<()> {
        if adjustments.is_empty() {
            return Ok(());
        }

        debug!(count = adjustments.len(), "Applying stock adjustments");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for adj in adjustments {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET quantity = ?2, updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(&adj.product_id)
            .bind(adj.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(DbError::not_found("Product", adj.product_id.clone()));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Changes a product's catalog price. Existing order lines keep the
    /// price they captured.
    pub async fn update_price(&self, id: &str, price_cents: i64) -> DbResult<()> {
        validate_price_cents(price_cents)?;

        debug!(id = %id, price_cents, "Updating product price");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET price_cents = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(price_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ProductCatalog for ProductRepository {
    type Error = DbError;

    async fn fetch_all(&self, ids: &BTreeSet<String>) -> DbResult<Vec<ProductSnapshot>> {
        ProductRepository::fetch_all(self, ids).await
    }

    async fn decrement(&self, adjustments: &[QuantityAdjustment]) -> DbResult<()> {
        ProductRepository::decrement(self, adjustments).await
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
