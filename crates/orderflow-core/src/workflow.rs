//! # Order Creation Workflow
//!
//! Turns `(customer_id, [OrderLineRequest])` into a persisted [`Order`] and
//! the matching stock decrements.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     OrderCreationWorkflow::execute                      │
//! │                                                                         │
//! │  0. validate request           ──► Validation(..)                      │
//! │       │                                                                 │
//! │  1. CustomerLookup::find_by_id ──► CustomerNotFound   (no stock reads) │
//! │       │                                                                 │
//! │  2. ProductCatalog::fetch_all  (distinct ids, one call)                │
//! │       │                                                                 │
//! │  3. for each line, in order:                                           │
//! │       ├── snapshot missing     ──► ProductNotFound                     │
//! │       ├── qty > available      ──► InsufficientStock                   │
//! │       └── push OrderLine + QuantityAdjustment                          │
//! │       │                                                                 │
//! │  4. OrderStore::create         (atomic)                                │
//! │       │                                                                 │
//! │  5. ProductCatalog::decrement  (only after 4 succeeded)                │
//! │       │                                                                 │
//! │  6. return Order                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rejection happens before step 4, so a rejected request never writes
//! anything.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{OrderError, OrderResult, ValidationError};
use crate::ports::{CustomerLookup, OrderStore, ProductCatalog};
use crate::types::{NewOrder, Order, OrderLine, OrderLineRequest, ProductSnapshot, QuantityAdjustment};
use crate::validation;
use crate::ENV_PREFIX;

// =============================================================================
// Configuration
// =============================================================================

/// How requested quantities are compared against catalog stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockCheckPolicy {
    /// Each line is checked on its own against the original snapshot
    /// quantity, and produces its own adjustment.
    ///
    /// Two lines for the same product are NOT summed: `P1×3 + P1×3` passes
    /// against a stock of 5, and the last adjustment for P1 wins.
    #[default]
    PerLine,

    /// Lines for the same product are summed before the check, and one
    /// adjustment per distinct product is emitted.
    Aggregate,
}

impl FromStr for StockCheckPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per_line" | "per-line" => Ok(StockCheckPolicy::PerLine),
            "aggregate" => Ok(StockCheckPolicy::Aggregate),
            other => Err(ValidationError::InvalidFormat {
                field: "stock_check".to_string(),
                reason: format!("unknown policy '{other}', expected per_line or aggregate"),
            }),
        }
    }
}

impl fmt::Display for StockCheckPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockCheckPolicy::PerLine => f.write_str("per_line"),
            StockCheckPolicy::Aggregate => f.write_str("aggregate"),
        }
    }
}

/// Workflow settings.
///
/// ## Configuration Sources (Priority Order)
/// 1. Environment variables (`ORDERFLOW_*`)
/// 2. Defaults (this file)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Accept requests with no lines (creates a zero-line order).
    pub allow_empty_orders: bool,

    /// Stock comparison policy.
    pub stock_check: StockCheckPolicy,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        WorkflowConfig {
            allow_empty_orders: true,
            stock_check: StockCheckPolicy::PerLine,
        }
    }
}

impl WorkflowConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `ORDERFLOW_ALLOW_EMPTY_ORDERS`: `true`/`false`
    /// - `ORDERFLOW_STOCK_CHECK`: `per_line`/`aggregate`
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = WorkflowConfig::default();

        if let Ok(raw) = std::env::var(format!("{ENV_PREFIX}ALLOW_EMPTY_ORDERS")) {
            match parse_bool(&raw) {
                Some(allow) => config.allow_empty_orders = allow,
                None => warn!(value = %raw, "Ignoring invalid ALLOW_EMPTY_ORDERS"),
            }
        }

        if let Ok(raw) = std::env::var(format!("{ENV_PREFIX}STOCK_CHECK")) {
            match raw.parse::<StockCheckPolicy>() {
                Ok(policy) => config.stock_check = policy,
                Err(e) => warn!(error = %e, "Ignoring invalid STOCK_CHECK"),
            }
        }

        config
    }

    /// Sets whether empty requests are accepted.
    pub fn allow_empty_orders(mut self, allow: bool) -> Self {
        self.allow_empty_orders = allow;
        self
    }

    /// Sets the stock comparison policy.
    pub fn stock_check(mut self, policy: StockCheckPolicy) -> Self {
        self.stock_check = policy;
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Order Assembly (pure)
// =============================================================================

/// Validated lines plus the stock levels to write once the order is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlan {
    pub lines: Vec<OrderLine>,
    pub adjustments: Vec<QuantityAdjustment>,
}

/// Matches requested lines against catalog snapshots.
///
/// Lines are processed in input order and the first failing line decides the
/// error. No I/O.
pub fn assemble_order<E>(
    snapshots: &[ProductSnapshot],
    requested: &[OrderLineRequest],
    policy: StockCheckPolicy,
) -> OrderResult<OrderPlan, E> {
    let index: HashMap<&str, &ProductSnapshot> =
        snapshots.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut lines = Vec::with_capacity(requested.len());
    let mut adjustments = Vec::with_capacity(requested.len());

    // Aggregate policy only: running totals and first-seen product order.
    let mut running: HashMap<&str, i64> = HashMap::new();
    let mut seen: Vec<&ProductSnapshot> = Vec::new();

    for line in requested {
        let snapshot = *index
            .get(line.product_id.as_str())
            .ok_or_else(|| OrderError::ProductNotFound(line.product_id.clone()))?;

        let requested_total = match policy {
            StockCheckPolicy::PerLine => line.quantity,
            StockCheckPolicy::Aggregate => {
                let total = running.entry(snapshot.id.as_str()).or_insert_with(|| {
                    seen.push(snapshot);
                    0
                });
                *total += line.quantity;
                *total
            }
        };

        if !snapshot.has_stock_for(requested_total) {
            return Err(OrderError::InsufficientStock {
                product_id: snapshot.id.clone(),
                requested: requested_total,
                available: snapshot.quantity,
            });
        }

        lines.push(OrderLine::from_snapshot(snapshot, line.quantity));

        if policy == StockCheckPolicy::PerLine {
            adjustments.push(QuantityAdjustment {
                product_id: snapshot.id.clone(),
                quantity: snapshot.quantity - line.quantity,
            });
        }
    }

    if policy == StockCheckPolicy::Aggregate {
        adjustments.extend(seen.into_iter().map(|s| QuantityAdjustment {
            product_id: s.id.clone(),
            quantity: s.quantity - running[s.id.as_str()],
        }));
    }

    Ok(OrderPlan { lines, adjustments })
}

// =============================================================================
// Workflow
// =============================================================================

/// Places orders against a customer lookup, a product catalog and an order
/// store.
///
/// ## Usage
/// ```rust,ignore
/// let workflow = OrderCreationWorkflow::new(customers, catalog, orders)
///     .with_config(WorkflowConfig::from_env());
///
/// let order = workflow
///     .execute("C1", &[OrderLineRequest::new("P1", 3)])
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderCreationWorkflow<C, P, S> {
    customers: C,
    catalog: P,
    orders: S,
    config: WorkflowConfig,
}

impl<C, P, S> OrderCreationWorkflow<C, P, S> {
    /// Creates a workflow with the default configuration.
    pub fn new(customers: C, catalog: P, orders: S) -> Self {
        OrderCreationWorkflow {
            customers,
            catalog,
            orders,
            config: WorkflowConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: WorkflowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }
}

impl<C, P, S, E> OrderCreationWorkflow<C, P, S>
where
    C: CustomerLookup<Error = E>,
    P: ProductCatalog<Error = E>,
    S: OrderStore<Error = E>,
    E: std::error::Error + Send + Sync + 'static,
{
    /// Creates an order for `customer_id` from the requested lines.
    ///
    /// ## Returns
    /// * `Ok(Order)` - Order stored and stock decremented
    /// * `Err(OrderError::Validation)` - Malformed request, nothing called
    /// * `Err(OrderError::CustomerNotFound)` - Nothing else called
    /// * `Err(OrderError::ProductNotFound | InsufficientStock)` - Catalog read
    ///   only, nothing written
    /// * `Err(OrderError::Backend)` - A collaborator failed
    pub async fn execute(
        &self,
        customer_id: &str,
        lines: &[OrderLineRequest],
    ) -> OrderResult<Order, E> {
        validation::validate_customer_id(customer_id)?;
        validation::validate_lines(lines, self.config.allow_empty_orders)?;

        debug!(customer_id = %customer_id, lines = lines.len(), "Creating order");

        let customer = match self
            .customers
            .find_by_id(customer_id)
            .await
            .map_err(OrderError::Backend)?
        {
            Some(customer) => customer,
            None => {
                warn!(customer_id = %customer_id, "Order rejected: customer not found");
                return Err(OrderError::CustomerNotFound(customer_id.to_string()));
            }
        };

        let product_ids: BTreeSet<String> =
            lines.iter().map(|l| l.product_id.clone()).collect();

        let snapshots = self
            .catalog
            .fetch_all(&product_ids)
            .await
            .map_err(OrderError::Backend)?;

        debug!(
            requested = product_ids.len(),
            found = snapshots.len(),
            "Catalog snapshots fetched"
        );

        let plan = assemble_order(&snapshots, lines, self.config.stock_check).map_err(|e| {
            warn!(customer_id = %customer_id, error = %e, "Order rejected");
            e
        })?;

        let order = self
            .orders
            .create(NewOrder {
                customer,
                lines: plan.lines,
            })
            .await
            .map_err(OrderError::Backend)?;

        self.catalog
            .decrement(&plan.adjustments)
            .await
            .map_err(OrderError::Backend)?;

        info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            lines = order.lines.len(),
            total = %order.total(),
            "Order created"
        );

        Ok(order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Customer;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    // --- In-memory collaborators ---

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("backend unavailable")]
    struct Unavailable;

    #[derive(Default)]
    struct State {
        customers: BTreeMap<String, Customer>,
        products: BTreeMap<String, ProductSnapshot>,
        orders: Vec<Order>,
        lookup_calls: usize,
        fetch_calls: usize,
        create_calls: usize,
        decrement_calls: usize,
        last_fetch: Option<BTreeSet<String>>,
        fail_create: bool,
        fail_decrement: bool,
    }

    #[derive(Default)]
    struct InMemoryBackend {
        state: Mutex<State>,
    }

    impl InMemoryBackend {
        fn with_customer(self, id: &str) -> Self {
            self.state.lock().unwrap().customers.insert(
                id.to_string(),
                Customer {
                    id: id.to_string(),
                    name: format!("Customer {id}"),
                    email: format!("{id}@example.com"),
                    created_at: Utc::now(),
                },
            );
            self
        }

        fn with_product(self, id: &str, price_cents: i64, quantity: i64) -> Self {
            self.state.lock().unwrap().products.insert(
                id.to_string(),
                ProductSnapshot {
                    id: id.to_string(),
                    name: format!("Product {id}"),
                    price_cents,
                    quantity,
                },
            );
            self
        }

        fn stock(&self, id: &str) -> i64 {
            self.state.lock().unwrap().products[id].quantity
        }

        fn last_fetch(&self) -> Vec<String> {
            let s = self.state.lock().unwrap();
            s.last_fetch.iter().flatten().cloned().collect()
        }

        fn calls(&self) -> (usize, usize, usize, usize) {
            let s = self.state.lock().unwrap();
            (s.lookup_calls, s.fetch_calls, s.create_calls, s.decrement_calls)
        }
    }

    #[async_trait]
    impl CustomerLookup for InMemoryBackend {
        type Error = Unavailable;

        async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, Unavailable> {
            let mut s = self.state.lock().unwrap();
            s.lookup_calls += 1;
            Ok(s.customers.get(id).cloned())
        }
    }

    #[async_trait]
    impl ProductCatalog for InMemoryBackend {
        type Error = Unavailable;

        async fn fetch_all(
            &self,
            ids: &BTreeSet<String>,
        ) -> Result<Vec<ProductSnapshot>, Unavailable> {
            let mut s = self.state.lock().unwrap();
            s.fetch_calls += 1;
            s.last_fetch = Some(ids.clone());
            Ok(ids.iter().filter_map(|id| s.products.get(id).cloned()).collect())
        }

        async fn decrement(&self, adjustments: &[QuantityAdjustment]) -> Result<(), Unavailable> {
            let mut s = self.state.lock().unwrap();
            s.decrement_calls += 1;
            if s.fail_decrement {
                return Err(Unavailable);
            }
            for adj in adjustments {
                let product = s.products.get_mut(&adj.product_id).ok_or(Unavailable)?;
                product.quantity = adj.quantity;
            }
            Ok(())
        }
    }

    #[async_trait]
    impl OrderStore for InMemoryBackend {
        type Error = Unavailable;

        async fn create(&self, order: NewOrder) -> Result<Order, Unavailable> {
            let mut s = self.state.lock().unwrap();
            s.create_calls += 1;
            if s.fail_create {
                return Err(Unavailable);
            }
            let stored = Order {
                id: format!("order_{}", s.orders.len() + 1),
                customer_id: order.customer.id,
                lines: order.lines,
                created_at: Utc::now(),
            };
            s.orders.push(stored.clone());
            Ok(stored)
        }
    }

    type TestWorkflow =
        OrderCreationWorkflow<Arc<InMemoryBackend>, Arc<InMemoryBackend>, Arc<InMemoryBackend>>;

    fn workflow(backend: &Arc<InMemoryBackend>) -> TestWorkflow {
        OrderCreationWorkflow::new(backend.clone(), backend.clone(), backend.clone())
    }

    fn example_backend() -> Arc<InMemoryBackend> {
        Arc::new(
            InMemoryBackend::default()
                .with_customer("C1")
                .with_product("P1", 1000, 5),
        )
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_places_order_and_decrements_stock() {
        let backend = example_backend();

        let order = workflow(&backend)
            .execute("C1", &[OrderLineRequest::new("P1", 3)])
            .await
            .unwrap();

        assert_eq!(order.customer_id, "C1");
        assert_eq!(
            order.lines,
            vec![OrderLine {
                product_id: "P1".to_string(),
                unit_price_cents: 1000,
                quantity: 3,
            }]
        );
        assert_eq!(backend.stock("P1"), 2);
        assert_eq!(backend.calls(), (1, 1, 1, 1));
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_everything_untouched() {
        let backend = example_backend();

        let err = workflow(&backend)
            .execute("C1", &[OrderLineRequest::new("P1", 9)])
            .await
            .unwrap_err();

        match err {
            OrderError::InsufficientStock {
                product_id,
                requested,
                available,
            } => {
                assert_eq!(product_id, "P1");
                assert_eq!(requested, 9);
                assert_eq!(available, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(backend.stock("P1"), 5);
        assert_eq!(backend.calls(), (1, 1, 0, 0));
    }

    #[tokio::test]
    async fn test_unknown_product_aborts_even_with_valid_lines() {
        let backend = example_backend();

        let err = workflow(&backend)
            .execute(
                "C1",
                &[OrderLineRequest::new("P1", 1), OrderLineRequest::new("P2", 1)],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::ProductNotFound(ref id) if id == "P2"));
        assert_eq!(backend.stock("P1"), 5);
        assert_eq!(backend.calls(), (1, 1, 0, 0));
        assert!(backend.state.lock().unwrap().orders.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_customer_skips_catalog() {
        let backend = example_backend();

        let err = workflow(&backend)
            .execute("C9", &[OrderLineRequest::new("P1", 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::CustomerNotFound(ref id) if id == "C9"));
        assert_eq!(backend.calls(), (1, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_lines_keep_request_order_and_prices() {
        let backend = Arc::new(
            InMemoryBackend::default()
                .with_customer("C1")
                .with_product("P1", 1000, 5)
                .with_product("P2", 250, 10)
                .with_product("P3", 99, 1),
        );

        let order = workflow(&backend)
            .execute(
                "C1",
                &[
                    OrderLineRequest::new("P3", 1),
                    OrderLineRequest::new("P1", 2),
                    OrderLineRequest::new("P2", 4),
                ],
            )
            .await
            .unwrap();

        let got: Vec<(&str, i64, i64)> = order
            .lines
            .iter()
            .map(|l| (l.product_id.as_str(), l.unit_price_cents, l.quantity))
            .collect();
        assert_eq!(got, vec![("P3", 99, 1), ("P1", 1000, 2), ("P2", 250, 4)]);
        assert_eq!(order.total().cents(), 99 + 2000 + 1000);
        assert_eq!(backend.calls(), (1, 1, 1, 1));
        assert_eq!(backend.last_fetch(), vec!["P1", "P2", "P3"]);

        assert_eq!(backend.stock("P1"), 3);
        assert_eq!(backend.stock("P2"), 6);
        assert_eq!(backend.stock("P3"), 0);
    }

    #[tokio::test]
    async fn test_repeated_request_creates_distinct_orders() {
        let backend = example_backend();
        let wf = workflow(&backend);
        let lines = [OrderLineRequest::new("P1", 2)];

        let first = wf.execute("C1", &lines).await.unwrap();
        let second = wf.execute("C1", &lines).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(backend.stock("P1"), 1);

        // Third attempt needs 2 but only 1 is left.
        let err = wf.execute("C1", &lines).await.unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock { available: 1, .. }));
    }

    #[tokio::test]
    async fn test_per_line_policy_checks_duplicates_independently() {
        let backend = example_backend();

        let order = workflow(&backend)
            .execute(
                "C1",
                &[OrderLineRequest::new("P1", 3), OrderLineRequest::new("P1", 3)],
            )
            .await
            .unwrap();

        // Both lines pass against the original 5; last adjustment wins.
        assert_eq!(backend.calls(), (1, 1, 1, 1));
        assert_eq!(backend.last_fetch(), vec!["P1"]);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.unit_count(), 6);
        assert_eq!(backend.stock("P1"), 2);
    }

    #[tokio::test]
    async fn test_aggregate_policy_sums_duplicates() {
        let backend = example_backend();
        let wf = workflow(&backend)
            .with_config(WorkflowConfig::default().stock_check(StockCheckPolicy::Aggregate));

        let err = wf
            .execute(
                "C1",
                &[OrderLineRequest::new("P1", 3), OrderLineRequest::new("P1", 3)],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::InsufficientStock {
                requested: 6,
                available: 5,
                ..
            }
        ));
        assert_eq!(backend.stock("P1"), 5);

        let order = wf
            .execute(
                "C1",
                &[OrderLineRequest::new("P1", 2), OrderLineRequest::new("P1", 1)],
            )
            .await
            .unwrap();
        assert_eq!(order.lines.len(), 2);
        assert_eq!(backend.stock("P1"), 2);
    }

    #[tokio::test]
    async fn test_empty_request_allowed_by_default() {
        let backend = example_backend();

        let order = workflow(&backend).execute("C1", &[]).await.unwrap();

        assert!(order.lines.is_empty());
        assert!(order.total().is_zero());
        assert_eq!(backend.stock("P1"), 5);
    }

    #[tokio::test]
    async fn test_empty_request_rejected_when_disabled() {
        let backend = example_backend();
        let wf = workflow(&backend)
            .with_config(WorkflowConfig::default().allow_empty_orders(false));

        let err = wf.execute("C1", &[]).await.unwrap_err();

        assert!(matches!(
            err,
            OrderError::Validation(ValidationError::Required { ref field }) if field == "lines"
        ));
        assert_eq!(backend.calls(), (0, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_invalid_request_calls_nothing() {
        let backend = example_backend();
        let wf = workflow(&backend);

        let err = wf
            .execute("C1", &[OrderLineRequest::new("P1", 0)])
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));

        let err = wf
            .execute("", &[OrderLineRequest::new("P1", 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));

        assert_eq!(backend.calls(), (0, 0, 0, 0));
    }

    #[tokio::test]
    async fn test_store_failure_propagates_and_skips_decrement() {
        let backend = example_backend();
        backend.state.lock().unwrap().fail_create = true;

        let err = workflow(&backend)
            .execute("C1", &[OrderLineRequest::new("P1", 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Backend(Unavailable)));
        assert_eq!(backend.stock("P1"), 5);
        assert_eq!(backend.calls(), (1, 1, 1, 0));
    }

    #[tokio::test]
    async fn test_decrement_failure_keeps_stored_order() {
        let backend = example_backend();
        backend.state.lock().unwrap().fail_decrement = true;

        let err = workflow(&backend)
            .execute("C1", &[OrderLineRequest::new("P1", 2)])
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Backend(Unavailable)));
        assert_eq!(backend.calls(), (1, 1, 1, 1));
        assert_eq!(backend.state.lock().unwrap().orders.len(), 1);
        assert_eq!(backend.stock("P1"), 5);
    }

    #[tokio::test]
    async fn test_huge_line_total_does_not_panic() {
        let backend = Arc::new(
            InMemoryBackend::default()
                .with_customer("C1")
                .with_product("P1", i64::MAX / 2, 5),
        );

        let order = workflow(&backend)
            .execute("C1", &[OrderLineRequest::new("P1", 3)])
            .await
            .unwrap();

        assert_eq!(order.total().cents(), i64::MAX);
        assert_eq!(backend.stock("P1"), 2);
    }

    #[test]
    fn test_assemble_order_reports_first_failing_line() {
        let snapshots = vec![ProductSnapshot {
            id: "P1".to_string(),
            name: "Widget".to_string(),
            price_cents: 1000,
            quantity: 5,
        }];
        let requested = vec![
            OrderLineRequest::new("P1", 6),
            OrderLineRequest::new("P2", 1),
        ];

        let err = assemble_order::<Unavailable>(&snapshots, &requested, StockCheckPolicy::PerLine)
            .unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock { .. }));
    }

    #[test]
    fn test_assemble_order_aggregate_adjustments() {
        let snapshots = vec![
            ProductSnapshot {
                id: "P1".to_string(),
                name: "Widget".to_string(),
                price_cents: 1000,
                quantity: 5,
            },
            ProductSnapshot {
                id: "P2".to_string(),
                name: "Gadget".to_string(),
                price_cents: 500,
                quantity: 3,
            },
        ];
        let requested = vec![
            OrderLineRequest::new("P2", 1),
            OrderLineRequest::new("P1", 2),
            OrderLineRequest::new("P2", 2),
        ];

        let plan =
            assemble_order::<Unavailable>(&snapshots, &requested, StockCheckPolicy::Aggregate)
                .unwrap();

        assert_eq!(plan.lines.len(), 3);
        assert_eq!(
            plan.adjustments,
            vec![
                QuantityAdjustment {
                    product_id: "P2".to_string(),
                    quantity: 0,
                },
                QuantityAdjustment {
                    product_id: "P1".to_string(),
                    quantity: 3,
                },
            ]
        );
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("per_line".parse::<StockCheckPolicy>().unwrap(), StockCheckPolicy::PerLine);
        assert_eq!("AGGREGATE".parse::<StockCheckPolicy>().unwrap(), StockCheckPolicy::Aggregate);
        assert!("fifo".parse::<StockCheckPolicy>().is_err());
        assert_eq!(StockCheckPolicy::Aggregate.to_string(), "aggregate");
    }

    #[test]
    fn test_config_defaults() {
        let config = WorkflowConfig::default();
        assert!(config.allow_empty_orders);
        assert_eq!(config.stock_check, StockCheckPolicy::PerLine);
        assert_eq!(parse_bool("Off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
