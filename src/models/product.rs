use crate::query_builder::{push_keyset_pagination, PagePlan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

/// Product list-view row.
/// Maps to the `products` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Fetch the rows for one page of the product catalog
    pub async fn fetch_page(pool: &PgPool, plan: &PagePlan) -> Result<Vec<Product>, sqlx::Error> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT p.id, p.name, p.sku, p.description, p.status, p.created_at, p.updated_at \
             FROM products p",
        );
        push_keyset_pagination(&mut query, plan, "p.", false);

        query.build_query_as::<Product>().fetch_all(pool).await
    }

    /// Single catalog lookup; `None` when the product does not exist
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Product>, sqlx::Error> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, sku, description, status, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
