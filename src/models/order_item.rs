use crate::orchestration::types::OrderLineRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgExecutor, Postgres, QueryBuilder};

/// One line of an order. Immutable once written.
/// Maps to the `order_items` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub price_id: i64,
    pub variant_value_id: i64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Insert all lines of an order in a single statement.
    ///
    /// Rows come back in request order.
    pub async fn create_batch(
        conn: &mut PgConnection,
        order_id: i64,
        lines: &[OrderLineRequest],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO order_items (order_id, price_id, variant_value_id, quantity) ",
        );
        query.push_values(lines, |mut row, line| {
            row.push_bind(order_id)
                .push_bind(line.price_id)
                .push_bind(line.variant_value_id)
                .push_bind(line.quantity);
        });
        query.push(" RETURNING id, order_id, price_id, variant_value_id, quantity, created_at");

        let mut items = query.build_query_as::<OrderItem>().fetch_all(conn).await?;
        // BIGSERIAL ids follow VALUES order
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    /// All items of an order, in insertion order
    pub async fn list_by_order<'e>(
        executor: impl PgExecutor<'e>,
        order_id: i64,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, price_id, variant_value_id, quantity, created_at
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(executor)
        .await
    }

    /// Number of lines stored for an order.
    ///
    /// Part of the read API alongside [`OrderItem::list_by_order`]; accepts a
    /// transaction so callers can check line counts before committing.
    pub async fn count_by_order<'e>(
        executor: impl PgExecutor<'e>,
        order_id: i64,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = $1")
            .bind(order_id)
            .fetch_one(executor)
            .await
    }
}
