use crate::constants::PaymentStatus;
use crate::models::order_item::OrderItem;
use crate::query_builder::{push_keyset_pagination, PagePlan};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder};

/// Order header. `items` is populated by the loaders that need it.
/// Maps to the `orders` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub payment_status: i16,
    pub customer_id: i64,
    pub platform_id: i64,
    pub retail_store_id: i64,
    pub payment_method_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// New Order for creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: i64,
    pub platform_id: i64,
    pub retail_store_id: i64,
    pub payment_method_id: i64,
    pub payment_status: PaymentStatus,
}

/// List-view projection of an order with its current status and total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrderSummary {
    pub id: i64,
    pub payment_status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub platform: String,
    pub payment_method: String,
    /// `None` only if the order has no status history
    pub order_status: Option<i16>,
    pub total_amount: Decimal,
}

const ORDER_COLUMNS: &str = "id, payment_status, customer_id, platform_id, retail_store_id, \
                             payment_method_id, created_at, updated_at";

impl Order {
    /// Insert an order header. Runs inside the caller's transaction.
    pub async fn create(
        conn: &mut PgConnection,
        new_order: NewOrder,
    ) -> Result<Order, sqlx::Error> {
        let sql = format!(
            "INSERT INTO orders (payment_status, customer_id, platform_id, retail_store_id, payment_method_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ORDER_COLUMNS}"
        );

        sqlx::query_as::<_, Order>(&sql)
            .bind(new_order.payment_status.code())
            .bind(new_order.customer_id)
            .bind(new_order.platform_id)
            .bind(new_order.retail_store_id)
            .bind(new_order.payment_method_id)
            .fetch_one(conn)
            .await
    }

    /// Find an order header by ID (items not loaded)
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: i64,
    ) -> Result<Option<Order>, sqlx::Error> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an order together with its items
    pub async fn find_with_items(pool: &PgPool, id: i64) -> Result<Option<Order>, sqlx::Error> {
        let Some(mut order) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        order.items = OrderItem::list_by_order(pool, id).await?;
        Ok(Some(order))
    }

    /// Lock the order row for the rest of the transaction.
    ///
    /// Returns `false` if the order does not exist.
    pub async fn lock_for_update(conn: &mut PgConnection, id: i64) -> Result<bool, sqlx::Error> {
        let locked: Option<i64> =
            sqlx::query_scalar("SELECT id FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(conn)
                .await?;
        Ok(locked.is_some())
    }

    /// Bump `updated_at` after a status change
    pub async fn touch(conn: &mut PgConnection, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE orders SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub fn payment_status(&self) -> Option<PaymentStatus> {
        PaymentStatus::from_code(self.payment_status)
    }
}

impl OrderSummary {
    /// Fetch the rows for one page of the order list.
    ///
    /// Returns up to `plan.fetch_limit` rows in `plan.effective_order`.
    pub async fn fetch_page(
        pool: &PgPool,
        plan: &PagePlan,
    ) -> Result<Vec<OrderSummary>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT o.id, o.payment_status, o.created_at, o.updated_at,
                   c.first_name AS customer_first_name,
                   c.last_name AS customer_last_name,
                   pl.name AS platform,
                   pm.name AS payment_method,
                   ls.status AS order_status,
                   COALESCE(ot.total_amount, 0)::NUMERIC(14, 2) AS total_amount
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            JOIN platforms pl ON pl.id = o.platform_id
            JOIN payment_methods pm ON pm.id = o.payment_method_id
            LEFT JOIN LATERAL (
                SELECT os.status
                FROM order_status os
                WHERE os.order_id = o.id
                ORDER BY os.created_at DESC, os.id DESC
                LIMIT 1
            ) ls ON TRUE
            LEFT JOIN LATERAL (
                SELECT SUM(oi.quantity * p.price) AS total_amount
                FROM order_items oi
                JOIN prices p ON p.id = oi.price_id
                WHERE oi.order_id = o.id
            ) ot ON TRUE"#,
        );
        push_keyset_pagination(&mut query, plan, "o.", false);

        query.build_query_as::<OrderSummary>().fetch_all(pool).await
    }
}
