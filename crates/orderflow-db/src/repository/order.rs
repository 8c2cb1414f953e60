//! # Order Repository
//!
//! Persists orders and their lines.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders                          order_products                         │
//! │  ┌──────────────────────────┐    ┌───────────────────────────────────┐ │
//! │  │ id          (uuid)       │◄───│ order_id                          │ │
//! │  │ customer_id              │    │ position    (request order)       │ │
//! │  │ created_at               │    │ product_id                        │ │
//! │  └──────────────────────────┘    │ price_cents (captured)            │ │
//! │                                  │ quantity                          │ │
//! │                                  └───────────────────────────────────┘ │
//! │                                                                         │
//! │  create() writes the order row and every line row in ONE transaction.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use orderflow_core::{NewOrder, Order, OrderLine, OrderStore};

/// Order header as stored in the `orders` table.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_id: String,
    created_at: DateTime<Utc>,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Stores an order and all of its lines atomically.
    ///
    /// ## Returns
    /// * `Ok(Order)` - Stored order with generated id and timestamp
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown customer or product;
    ///   nothing is written
    pub async fn create(&self, order: NewOrder) -> DbResult<Order> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(
            id = %id,
            customer_id = %order.customer.id,
            lines = order.lines.len(),
            "Creating order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&id)
        .bind(&order.customer.id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for (position, line) in order.lines.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_products (order_id, position, product_id, price_cents, quantity)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&id)
            .bind(position as i64)
            .bind(&line.product_id)
            .bind(line.unit_price_cents)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Order {
            id,
            customer_id: order.customer.id,
            lines: order.lines,
            created_at: now,
        })
    }

    /// Gets an order with its lines in original request order.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Lists a customer's orders, oldest first.
    pub async fn list_for_customer(&self, customer_id: &str) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, created_at
            FROM orders
            WHERE customer_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.hydrate(row).await?);
        }

        Ok(orders)
    }

    /// Counts stored orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn hydrate(&self, row: OrderRow) -> DbResult<Order> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT product_id, price_cents AS unit_price_cents, quantity
            FROM order_products
            WHERE order_id = ?1
            ORDER BY position
            "#,
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Order {
            id: row.id,
            customer_id: row.customer_id,
            lines,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    type Error = DbError;

    async fn create(&self, order: NewOrder) -> DbResult<Order> {
        OrderRepository::create(self, order).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
