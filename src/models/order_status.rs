use crate::state_machine::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgExecutor};

/// OrderStatusRecord is one entry of an order's append-only status history.
/// Maps to the `order_status` table; the newest row is the current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OrderStatusRecord {
    pub id: i64,
    pub order_id: i64,
    pub status: i16,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// New status record for appending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderStatusRecord {
    pub order_id: i64,
    pub status: OrderStatus,
    pub description: String,
}

impl OrderStatusRecord {
    /// Append a record. Runs inside the caller's transaction.
    pub async fn append(
        conn: &mut PgConnection,
        new_record: NewOrderStatusRecord,
    ) -> Result<OrderStatusRecord, sqlx::Error> {
        sqlx::query_as::<_, OrderStatusRecord>(
            r#"
            INSERT INTO order_status (order_id, status, description)
            VALUES ($1, $2, $3)
            RETURNING id, order_id, status, description, created_at
            "#,
        )
        .bind(new_record.order_id)
        .bind(new_record.status.code())
        .bind(new_record.description)
        .fetch_one(conn)
        .await
    }

    /// Latest record for an order: newest `created_at`, ties broken by id
    pub async fn latest_for_order<'e>(
        executor: impl PgExecutor<'e>,
        order_id: i64,
    ) -> Result<Option<OrderStatusRecord>, sqlx::Error> {
        sqlx::query_as::<_, OrderStatusRecord>(
            r#"
            SELECT id, order_id, status, description, created_at
            FROM order_status
            WHERE order_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(order_id)
        .fetch_optional(executor)
        .await
    }

    /// Full history in chronological order
    pub async fn history<'e>(
        executor: impl PgExecutor<'e>,
        order_id: i64,
    ) -> Result<Vec<OrderStatusRecord>, sqlx::Error> {
        sqlx::query_as::<_, OrderStatusRecord>(
            r#"
            SELECT id, order_id, status, description, created_at
            FROM order_status
            WHERE order_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(executor)
        .await
    }

    /// Typed status; `None` for a code outside the known range
    pub fn order_status(&self) -> Option<OrderStatus> {
        OrderStatus::from_code(self.status)
    }
}
