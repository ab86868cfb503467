//! Stock Line Model Tests
//!
//! Pair resolution and the guarded decrement

use crate::common::{seed_catalog, seed_stocked_item, stock_of};
use order_core::models::StockLine;
use order_core::orchestration::OrderLineRequest;
use rust_decimal::Decimal;
use sqlx::PgPool;

#[sqlx::test]
async fn test_load_resolves_matching_pairs(pool: PgPool) -> sqlx::Result<()> {
    let catalog = seed_catalog(&pool).await?;
    let item = seed_stocked_item(&pool, &catalog, 10, Decimal::new(1999, 2)).await?;

    let lines = StockLine::load_for_lines(&pool, &[item.line(2)]).await?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].price_id, item.price_id);
    assert_eq!(lines[0].variant_id, item.variant_id);
    assert_eq!(lines[0].variant_value_id, item.variant_value_id);
    assert_eq!(lines[0].stock_quantity, 10);
    assert!(lines[0].is_price_active());
    assert_eq!(lines[0].variant_name, "Color");
    assert_eq!(lines[0].value, "Red");

    Ok(())
}

#[sqlx::test]
async fn test_cross_variant_pairs_do_not_resolve(pool: PgPool) -> sqlx::Result<()> {
    let catalog = seed_catalog(&pool).await?;
    let shirt = seed_stocked_item(&pool, &catalog, 10, Decimal::new(1999, 2)).await?;
    let mug = seed_stocked_item(&pool, &catalog, 10, Decimal::new(899, 2)).await?;

    // price of one variant with the value of another
    let mixed = OrderLineRequest {
        price_id: shirt.price_id,
        variant_value_id: mug.variant_value_id,
        quantity: 1,
    };
    let lines = StockLine::load_for_lines(&pool, &[mixed]).await?;
    assert!(lines.is_empty());

    Ok(())
}

#[sqlx::test]
async fn test_guarded_decrement(pool: PgPool) -> sqlx::Result<()> {
    let catalog = seed_catalog(&pool).await?;
    let item = seed_stocked_item(&pool, &catalog, 5, Decimal::new(1000, 2)).await?;
    let mut conn = pool.acquire().await?;

    assert!(StockLine::decrement_guarded(&mut conn, item.variant_value_id, 3).await?);
    assert_eq!(stock_of(&pool, item.variant_value_id).await?, 2);

    assert!(!StockLine::decrement_guarded(&mut conn, item.variant_value_id, 3).await?);
    assert_eq!(stock_of(&pool, item.variant_value_id).await?, 2);

    assert!(StockLine::decrement_guarded(&mut conn, item.variant_value_id, 2).await?);
    assert_eq!(
        StockLine::current_quantity(&pool, item.variant_value_id).await?,
        Some(0)
    );

    assert!(!StockLine::decrement_guarded(&mut conn, 987_654, 1).await?);
    assert_eq!(StockLine::current_quantity(&pool, 987_654).await?, None);

    Ok(())
}
