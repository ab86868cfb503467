use crate::constants::price_status;
use crate::orchestration::types::OrderLineRequest;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgExecutor};

/// Read model joining a price, its variant and one of the variant's values.
///
/// Only pairs where the price and the variant value belong to the same
/// variant are ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StockLine {
    pub price_id: i64,
    pub variant_id: i64,
    pub variant_value_id: i64,
    pub stock_quantity: i32,
    pub price_status: i16,
    pub variant_name: String,
    pub value: String,
}

impl StockLine {
    pub fn is_price_active(&self) -> bool {
        self.price_status == price_status::ACTIVE
    }

    /// Load the stock lines for the requested `(price_id, variant_value_id)` pairs
    pub async fn load_for_lines<'e>(
        executor: impl PgExecutor<'e>,
        lines: &[OrderLineRequest],
    ) -> Result<Vec<StockLine>, sqlx::Error> {
        let price_ids: Vec<i64> = lines.iter().map(|l| l.price_id).collect();
        let variant_value_ids: Vec<i64> = lines.iter().map(|l| l.variant_value_id).collect();

        sqlx::query_as::<_, StockLine>(
            r#"
            SELECT DISTINCT
                   p.id AS price_id,
                   pv.id AS variant_id,
                   pvv.id AS variant_value_id,
                   pvv.stock_quantity,
                   p.status AS price_status,
                   pv.name AS variant_name,
                   pvv.value
            FROM UNNEST($1::BIGINT[], $2::BIGINT[]) AS req (price_id, variant_value_id)
            JOIN prices p ON p.id = req.price_id
            JOIN product_variant_values pvv
              ON pvv.id = req.variant_value_id AND pvv.attribute_id = p.variant_id
            JOIN product_variants pv ON pv.id = p.variant_id
            "#,
        )
        .bind(&price_ids)
        .bind(&variant_value_ids)
        .fetch_all(executor)
        .await
    }

    /// Decrement stock only if enough is left.
    ///
    /// Returns `false` when no row was updated: either the stock is too low
    /// or the variant value does not exist.
    pub async fn decrement_guarded(
        conn: &mut PgConnection,
        variant_value_id: i64,
        quantity: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE product_variant_values
            SET stock_quantity = stock_quantity - $2, updated_at = NOW()
            WHERE id = $1 AND stock_quantity >= $2
            "#,
        )
        .bind(variant_value_id)
        .bind(quantity)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Current stock of a variant value, `None` if it does not exist
    pub async fn current_quantity<'e>(
        executor: impl PgExecutor<'e>,
        variant_value_id: i64,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT stock_quantity FROM product_variant_values WHERE id = $1")
            .bind(variant_value_id)
            .fetch_optional(executor)
            .await
    }
}
