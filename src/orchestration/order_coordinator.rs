//! # Order Coordinator
//!
//! Transactional entry point of the order core.
//!
//! ## Order creation
//!
//! ```text
//! validate request -> stock pre-check -> BEGIN
//!   -> insert header -> insert items (one statement)
//!   -> guarded stock decrement per variant value (ascending id)
//!   -> append initial status
//! -> COMMIT
//! ```
//!
//! Any failure after `BEGIN` drops the open transaction, which rolls it back,
//! so a failed call never leaves a partial order or a partial stock change.
//!
//! ## Status updates
//!
//! The order row is locked with `SELECT ... FOR UPDATE` before the latest
//! status is read. Two concurrent updates for one order are serialized and the
//! second one sees the first one's record.
//!
//! Every operation is bounded by `orders.operation_timeout_ms`.

use crate::config::OrderCoreConfig;
use crate::constants::PaymentStatus;
use crate::error::{OrderError, Result, StockValidationError};
use crate::logging::{log_error, log_order_operation};
use crate::models::{
    NewOrder, NewOrderStatusRecord, Order, OrderItem, OrderStatusRecord, OrderSummary, Product,
    StockLine,
};
use crate::orchestration::stock_validator::StockValidator;
use crate::orchestration::types::{quantities_by_variant_value, CreateOrderRequest};
use crate::query_builder::{PageRequest, PageResponse, PagePlan, PaginationPlanner, SortField};
use crate::state_machine::{OrderStateMachine, OrderStatus, ORDER_CREATED_DESCRIPTION};
use crate::validation::{validate_create_order_request, validate_status_code};
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Coordinates order writes and paginated reads against one pool
#[derive(Debug, Clone)]
pub struct OrderCoordinator {
    pool: PgPool,
    stock_validator: StockValidator<PgPool>,
    planner: PaginationPlanner,
    operation_timeout: Duration,
    max_lines_per_order: usize,
}

impl OrderCoordinator {
    pub fn new(pool: PgPool, config: &OrderCoreConfig) -> Self {
        Self {
            stock_validator: StockValidator::new(pool.clone()),
            pool,
            planner: PaginationPlanner::new(&config.pagination),
            operation_timeout: config.orders.operation_timeout(),
            max_lines_per_order: config.orders.max_lines_per_order,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn planner(&self) -> &PaginationPlanner {
        &self.planner
    }

    /// Create an order with its items, stock decrements and initial status
    #[instrument(
        skip(self, request),
        fields(customer_id = request.customer_id, lines = request.lines.len())
    )]
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<Order> {
        validate_create_order_request(&request, self.max_lines_per_order)?;

        let result = self
            .bounded("create_order", self.create_order_unbounded(&request))
            .await;

        match &result {
            Ok(order) => log_order_operation(
                "create_order",
                Some(order.id),
                "created",
                Some(order.items.len()),
                None,
            ),
            Err(e) => self.report_failure("create_order", e, None),
        }
        result
    }

    async fn create_order_unbounded(&self, request: &CreateOrderRequest) -> Result<Order> {
        self.stock_validator.validate(&request.lines).await?;

        let mut tx = self.pool.begin().await?;

        let mut order = Order::create(
            &mut tx,
            NewOrder {
                customer_id: request.customer_id,
                platform_id: request.platform_id,
                retail_store_id: request.retail_store_id,
                payment_method_id: request.payment_method_id,
                payment_status: PaymentStatus::AwaitingPayment,
            },
        )
        .await?;
        debug!(order_id = order.id, "Created order header");

        order.items = OrderItem::create_batch(&mut tx, order.id, &request.lines).await?;
        debug!(order_id = order.id, items = order.items.len(), "Created order items");

        for (variant_value_id, quantity) in quantities_by_variant_value(&request.lines) {
            decrement_stock(&mut tx, variant_value_id, quantity).await?;
        }
        debug!(order_id = order.id, "Reserved stock");

        OrderStatusRecord::append(
            &mut tx,
            NewOrderStatusRecord {
                order_id: order.id,
                status: OrderStatus::Pending,
                description: ORDER_CREATED_DESCRIPTION.to_string(),
            },
        )
        .await?;

        tx.commit().await?;

        info!(order_id = order.id, items = order.items.len(), "Order created");
        Ok(order)
    }

    /// Append a new status record after checking the transition rules.
    ///
    /// Returns the appended record.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        order_id: i64,
        status_code: i16,
    ) -> Result<OrderStatusRecord> {
        let requested = validate_status_code(status_code)?;

        let result = self
            .bounded(
                "update_order_status",
                self.update_order_status_unbounded(order_id, requested),
            )
            .await;

        match &result {
            Ok(record) => log_order_operation(
                "update_order_status",
                Some(order_id),
                &requested.to_string(),
                None,
                Some(&record.description),
            ),
            Err(e) => self.report_failure("update_order_status", e, Some(order_id)),
        }
        result
    }

    async fn update_order_status_unbounded(
        &self,
        order_id: i64,
        requested: OrderStatus,
    ) -> Result<OrderStatusRecord> {
        let mut tx = self.pool.begin().await?;

        if !Order::lock_for_update(&mut tx, order_id).await? {
            return Err(OrderError::OrderNotFound { order_id });
        }

        let latest = OrderStatusRecord::latest_for_order(&mut *tx, order_id)
            .await?
            .ok_or_else(|| {
                OrderError::InvariantViolation(format!("order {order_id} has no status history"))
            })?;

        let (current, next) =
            OrderStateMachine::can_transition_codes(latest.status, requested.code())?;
        debug!(order_id, from = %current, to = %next, "Transition allowed");

        let record = OrderStatusRecord::append(
            &mut tx,
            NewOrderStatusRecord {
                order_id,
                status: next,
                description: OrderStateMachine::description_for(next).to_string(),
            },
        )
        .await?;
        Order::touch(&mut tx, order_id).await?;

        tx.commit().await?;

        info!(order_id, from = %current, to = %next, "Order status updated");
        Ok(record)
    }

    /// One page of the order list with current status and totals
    #[instrument(skip(self, request))]
    pub async fn list_orders_page(
        &self,
        request: &PageRequest,
    ) -> Result<PageResponse<OrderSummary>> {
        let plan = self.planner.plan(request)?;
        let sort_by = plan.sort_by;

        let rows = self
            .bounded("list_orders_page", async {
                OrderSummary::fetch_page(&self.pool, &plan)
                    .await
                    .map_err(OrderError::from)
            })
            .await?;

        Ok(self.page_from(&plan, rows, |o: &OrderSummary| {
            sort_key(sort_by, o.created_at, o.updated_at, o.id)
        }))
    }

    /// One page of the product catalog
    #[instrument(skip(self, request))]
    pub async fn list_products_page(&self, request: &PageRequest) -> Result<PageResponse<Product>> {
        let plan = self.planner.plan(request)?;
        let sort_by = plan.sort_by;

        let rows = self
            .bounded("list_products_page", async {
                Product::fetch_page(&self.pool, &plan)
                    .await
                    .map_err(OrderError::from)
            })
            .await?;

        Ok(self.page_from(&plan, rows, |p: &Product| {
            sort_key(sort_by, p.created_at, p.updated_at, p.id)
        }))
    }

    /// Order header with its items
    pub async fn find_order(&self, order_id: i64) -> Result<Option<Order>> {
        self.bounded("find_order", async {
            Order::find_with_items(&self.pool, order_id)
                .await
                .map_err(OrderError::from)
        })
        .await
    }

    /// Status history in chronological order
    pub async fn order_status_history(&self, order_id: i64) -> Result<Vec<OrderStatusRecord>> {
        self.bounded("order_status_history", async {
            OrderStatusRecord::history(&self.pool, order_id)
                .await
                .map_err(OrderError::from)
        })
        .await
    }

    fn page_from<T>(
        &self,
        plan: &PagePlan,
        rows: Vec<T>,
        key: impl Fn(&T) -> (DateTime<Utc>, i64),
    ) -> PageResponse<T> {
        let fetched = rows.len();
        let page = self.planner.build_page(plan, rows, key);
        debug!(
            fetched,
            returned = page.items.len(),
            has_next = page.has_next,
            has_previous = page.has_previous,
            "Built page"
        );
        page
    }

    /// Run `operation` under the configured timeout. On expiry the future is
    /// dropped together with any open transaction.
    async fn bounded<T, F>(&self, operation: &'static str, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.operation_timeout, future).await {
            Ok(result) => result,
            Err(_) => Err(OrderError::Timeout {
                operation,
                timeout_ms: self.operation_timeout.as_millis() as u64,
            }),
        }
    }

    fn report_failure(&self, operation: &str, error: &OrderError, order_id: Option<i64>) {
        if error.is_client_fault() {
            warn!(
                operation,
                order_id,
                code = error.code(),
                error = %error,
                "Order operation rejected"
            );
        } else {
            let context = order_id.map(|id| format!("order_id={id}"));
            log_error("order_coordinator", operation, &error.to_string(), context.as_deref());
        }
    }
}

/// Guarded decrement of one variant value's stock.
///
/// Zero affected rows means the stock was taken by a concurrent order since
/// the pre-check, or the variant value vanished.
async fn decrement_stock(
    conn: &mut PgConnection,
    variant_value_id: i64,
    quantity: i64,
) -> Result<()> {
    if StockLine::decrement_guarded(conn, variant_value_id, quantity).await? {
        return Ok(());
    }

    match StockLine::current_quantity(&mut *conn, variant_value_id).await? {
        Some(available) => Err(StockValidationError::InsufficientStock {
            variant_value_id,
            requested: quantity,
            available: i64::from(available),
        }
        .into()),
        None => Err(OrderError::StockUpdateFailed { variant_value_id }),
    }
}

fn sort_key(
    sort_by: SortField,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    id: i64,
) -> (DateTime<Utc>, i64) {
    match sort_by {
        SortField::UpdatedAt => (updated_at, id),
        SortField::CreatedAt | SortField::Id => (created_at, id),
    }
}
