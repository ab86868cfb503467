//! Shared fixtures for the integration tests.
//!
//! Catalog rows are inserted with plain SQL: the order core only reads them.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use order_core::config::OrderCoreConfig;
use order_core::constants::price_status;
use order_core::orchestration::{CreateOrderRequest, OrderLineRequest};
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Reference rows every order needs
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub customer_id: i64,
    pub platform_id: i64,
    pub retail_store_id: i64,
    pub payment_method_id: i64,
    pub product_id: i64,
}

/// A variant value with an active (or inactive) price on the same variant
#[derive(Debug, Clone, Copy)]
pub struct StockedItem {
    pub variant_id: i64,
    pub variant_value_id: i64,
    pub price_id: i64,
}

impl StockedItem {
    pub fn line(&self, quantity: i32) -> OrderLineRequest {
        OrderLineRequest {
            price_id: self.price_id,
            variant_value_id: self.variant_value_id,
            quantity,
        }
    }
}

pub fn test_config() -> OrderCoreConfig {
    OrderCoreConfig::default()
}

pub async fn seed_catalog(pool: &PgPool) -> sqlx::Result<Catalog> {
    let customer_id: i64 = sqlx::query_scalar(
        "INSERT INTO customers (first_name, last_name, email) VALUES ('Ada', 'Lovelace', 'ada@example.com') RETURNING id",
    )
    .fetch_one(pool)
    .await?;
    let platform_id: i64 =
        sqlx::query_scalar("INSERT INTO platforms (name) VALUES ('Web') RETURNING id")
            .fetch_one(pool)
            .await?;
    let retail_store_id: i64 =
        sqlx::query_scalar("INSERT INTO retail_stores (name) VALUES ('Central') RETURNING id")
            .fetch_one(pool)
            .await?;
    let payment_method_id: i64 =
        sqlx::query_scalar("INSERT INTO payment_methods (name) VALUES ('Card') RETURNING id")
            .fetch_one(pool)
            .await?;
    let product_id = seed_product(pool, "T-Shirt", "TS-001", None).await?;

    Ok(Catalog {
        customer_id,
        platform_id,
        retail_store_id,
        payment_method_id,
        product_id,
    })
}

pub async fn seed_product(
    pool: &PgPool,
    name: &str,
    sku: &str,
    created_at: Option<DateTime<Utc>>,
) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "INSERT INTO products (name, sku, created_at, updated_at) \
         VALUES ($1, $2, COALESCE($3, NOW()), COALESCE($3, NOW())) RETURNING id",
    )
    .bind(name)
    .bind(sku)
    .bind(created_at)
    .fetch_one(pool)
    .await
}

/// New variant of the catalog product with one value and one price
pub async fn seed_stocked_item(
    pool: &PgPool,
    catalog: &Catalog,
    stock: i32,
    unit_price: Decimal,
) -> sqlx::Result<StockedItem> {
    seed_item_with_status(pool, catalog, stock, unit_price, price_status::ACTIVE).await
}

pub async fn seed_item_with_status(
    pool: &PgPool,
    catalog: &Catalog,
    stock: i32,
    unit_price: Decimal,
    status: i16,
) -> sqlx::Result<StockedItem> {
    let variant_id: i64 = sqlx::query_scalar(
        "INSERT INTO product_variants (product_id, name) VALUES ($1, 'Color') RETURNING id",
    )
    .bind(catalog.product_id)
    .fetch_one(pool)
    .await?;
    let variant_value_id: i64 = sqlx::query_scalar(
        "INSERT INTO product_variant_values (attribute_id, value, stock_quantity) \
         VALUES ($1, 'Red', $2) RETURNING id",
    )
    .bind(variant_id)
    .bind(stock)
    .fetch_one(pool)
    .await?;
    let price_id: i64 = sqlx::query_scalar(
        "INSERT INTO prices (variant_id, price, status) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(variant_id)
    .bind(unit_price)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(StockedItem {
        variant_id,
        variant_value_id,
        price_id,
    })
}

pub fn order_request(catalog: &Catalog, lines: Vec<OrderLineRequest>) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id: catalog.customer_id,
        platform_id: catalog.platform_id,
        retail_store_id: catalog.retail_store_id,
        payment_method_id: catalog.payment_method_id,
        lines,
    }
}

/// Insert a bare order header with a fixed creation time and a Pending status
pub async fn insert_order_at(
    pool: &PgPool,
    catalog: &Catalog,
    created_at: DateTime<Utc>,
) -> sqlx::Result<i64> {
    let order_id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (customer_id, platform_id, retail_store_id, payment_method_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $5) RETURNING id",
    )
    .bind(catalog.customer_id)
    .bind(catalog.platform_id)
    .bind(catalog.retail_store_id)
    .bind(catalog.payment_method_id)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        "INSERT INTO order_status (order_id, status, description) \
         VALUES ($1, 1, 'created new order')",
    )
    .bind(order_id)
    .execute(pool)
    .await?;

    Ok(order_id)
}

pub async fn stock_of(pool: &PgPool, variant_value_id: i64) -> sqlx::Result<i32> {
    sqlx::query_scalar("SELECT stock_quantity FROM product_variant_values WHERE id = $1")
        .bind(variant_value_id)
        .fetch_one(pool)
        .await
}

pub async fn count_rows(pool: &PgPool, table: &str) -> sqlx::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&sql).fetch_one(pool).await
}
