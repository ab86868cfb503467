//! Product Page Tests
//!
//! The product catalog shares the pagination engine with the order list

use crate::common::{seed_product, test_config};
use chrono::{Duration, TimeZone, Utc};
use order_core::models::Product;
use order_core::orchestration::OrderCoordinator;
use order_core::query_builder::{PageRequest, SortField, SortOrder};
use sqlx::PgPool;

#[sqlx::test]
async fn test_products_page_forward_and_back(pool: PgPool) -> sqlx::Result<()> {
    let base = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
    let mut skus = Vec::new();
    for i in 0..6 {
        let sku = format!("SKU-{i:03}");
        seed_product(&pool, &format!("Product {i}"), &sku, Some(base + Duration::hours(i))).await?;
        skus.push(sku);
    }
    let coordinator = OrderCoordinator::new(pool.clone(), &test_config());
    let request = PageRequest::first(4, SortOrder::Asc, SortField::CreatedAt);

    let first = coordinator
        .list_products_page(&request)
        .await
        .expect("first page");
    let first_skus: Vec<&str> = first.items.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(first_skus, vec!["SKU-000", "SKU-001", "SKU-002", "SKU-003"]);
    assert!(first.has_next);

    let second = coordinator
        .list_products_page(&request.clone().after(first.next_page.clone().unwrap()))
        .await
        .expect("second page");
    let second_skus: Vec<&str> = second.items.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(second_skus, vec!["SKU-004", "SKU-005"]);
    assert!(!second.has_next);
    assert!(second.has_previous);

    let back = coordinator
        .list_products_page(&request.clone().before(second.prev_page.clone().unwrap()))
        .await
        .expect("back to first page");
    assert_eq!(back.items, first.items);
    assert!(!back.has_previous);

    Ok(())
}

#[sqlx::test]
async fn test_products_sorted_by_updated_at(pool: PgPool) -> sqlx::Result<()> {
    let base = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
    let older = seed_product(&pool, "Older", "OLD-1", Some(base)).await?;
    let newer = seed_product(&pool, "Newer", "NEW-1", Some(base + Duration::days(1))).await?;

    // touching the older product moves it to the front
    sqlx::query("UPDATE products SET updated_at = $2 WHERE id = $1")
        .bind(older)
        .bind(base + Duration::days(2))
        .execute(&pool)
        .await?;

    let coordinator = OrderCoordinator::new(pool.clone(), &test_config());
    let page = coordinator
        .list_products_page(&PageRequest::first(10, SortOrder::Desc, SortField::UpdatedAt))
        .await
        .expect("page");
    let ids: Vec<i64> = page.items.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![older, newer]);

    let touched = Product::find_by_id(&pool, older)
        .await?
        .expect("product should exist");
    assert_eq!(touched.updated_at, base + Duration::days(2));
    assert!(Product::find_by_id(&pool, newer + 1000).await?.is_none());

    Ok(())
}
