//! Database Connection Tests

use order_core::database::DatabaseConnection;
use sqlx::PgPool;

#[sqlx::test]
async fn test_health_check_and_idempotent_migrate(pool: PgPool) -> sqlx::Result<()> {
    let db = DatabaseConnection::from_pool(pool);
    assert!(db.health_check().await?);

    // #[sqlx::test] already applied the migrations
    db.migrate().await?;

    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM information_schema.tables
         WHERE table_name IN ('orders', 'order_items', 'order_status', 'product_variant_values')",
    )
    .fetch_one(db.pool())
    .await?;
    assert_eq!(tables, 4);

    Ok(())
}
