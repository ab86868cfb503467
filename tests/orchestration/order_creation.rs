//! Order Creation Tests
//!
//! Atomic order creation against a real database

use crate::common::{
    count_rows, order_request, seed_catalog, seed_item_with_status, seed_stocked_item, stock_of,
    test_config,
};
use order_core::constants::{price_status, PaymentStatus};
use order_core::error::{ErrorCategory, OrderError, StockValidationError};
use order_core::models::OrderItem;
use order_core::orchestration::{OrderCoordinator, OrderLineRequest};
use order_core::state_machine::{OrderStatus, ORDER_CREATED_DESCRIPTION};
use rust_decimal::Decimal;
use sqlx::PgPool;

#[sqlx::test]
async fn test_create_order_success(pool: PgPool) -> sqlx::Result<()> {
    let catalog = seed_catalog(&pool).await?;
    let item = seed_stocked_item(&pool, &catalog, 10, Decimal::new(2500, 2)).await?;
    let coordinator = OrderCoordinator::new(pool.clone(), &test_config());

    let order = coordinator
        .create_order(order_request(&catalog, vec![item.line(3)]))
        .await
        .expect("order should be created");

    assert_eq!(order.payment_status(), Some(PaymentStatus::AwaitingPayment));
    assert_eq!(order.customer_id, catalog.customer_id);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].order_id, order.id);
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(stock_of(&pool, item.variant_value_id).await?, 7);

    let history = coordinator
        .order_status_history(order.id)
        .await
        .expect("history should load");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].order_status(), Some(OrderStatus::Pending));
    assert_eq!(history[0].description, ORDER_CREATED_DESCRIPTION);

    let reloaded = coordinator
        .find_order(order.id)
        .await
        .expect("lookup should succeed")
        .expect("order should exist");
    assert_eq!(reloaded.items, order.items);
    assert_eq!(OrderItem::count_by_order(&pool, order.id).await?, 1);

    Ok(())
}

#[sqlx::test]
async fn test_lines_for_same_variant_value_are_summed(pool: PgPool) -> sqlx::Result<()> {
    let catalog = seed_catalog(&pool).await?;
    let item = seed_stocked_item(&pool, &catalog, 10, Decimal::new(500, 2)).await?;
    let other = seed_stocked_item(&pool, &catalog, 4, Decimal::new(700, 2)).await?;
    let coordinator = OrderCoordinator::new(pool.clone(), &test_config());

    let order = coordinator
        .create_order(order_request(
            &catalog,
            vec![item.line(2), other.line(4), item.line(5)],
        ))
        .await
        .expect("order should be created");

    assert_eq!(order.items.len(), 3);
    assert_eq!(stock_of(&pool, item.variant_value_id).await?, 3);
    assert_eq!(stock_of(&pool, other.variant_value_id).await?, 0);

    Ok(())
}

#[sqlx::test]
async fn test_insufficient_stock_writes_nothing(pool: PgPool) -> sqlx::Result<()> {
    let catalog = seed_catalog(&pool).await?;
    let item = seed_stocked_item(&pool, &catalog, 2, Decimal::new(2500, 2)).await?;
    let coordinator = OrderCoordinator::new(pool.clone(), &test_config());

    let err = coordinator
        .create_order(order_request(&catalog, vec![item.line(3)]))
        .await
        .expect_err("order should be rejected");

    assert!(matches!(
        err,
        OrderError::Stock(StockValidationError::InsufficientStock {
            requested: 3,
            available: 2,
            ..
        })
    ));
    assert_eq!(err.category(), ErrorCategory::ClientFault);

    assert_eq!(count_rows(&pool, "orders").await?, 0);
    assert_eq!(count_rows(&pool, "order_items").await?, 0);
    assert_eq!(count_rows(&pool, "order_status").await?, 0);
    assert_eq!(stock_of(&pool, item.variant_value_id).await?, 2);

    Ok(())
}

#[sqlx::test]
async fn test_business_rule_rejections(pool: PgPool) -> sqlx::Result<()> {
    let catalog = seed_catalog(&pool).await?;
    let active = seed_stocked_item(&pool, &catalog, 5, Decimal::new(100, 2)).await?;
    let inactive =
        seed_item_with_status(&pool, &catalog, 5, Decimal::new(100, 2), price_status::INACTIVE)
            .await?;
    let coordinator = OrderCoordinator::new(pool.clone(), &test_config());

    let err = coordinator
        .create_order(order_request(&catalog, vec![inactive.line(1)]))
        .await
        .expect_err("inactive price should be rejected");
    assert!(matches!(
        err,
        OrderError::Stock(StockValidationError::InactivePrice { .. })
    ));

    let unknown = OrderLineRequest {
        price_id: 777_777,
        variant_value_id: 888_888,
        quantity: 1,
    };
    let err = coordinator
        .create_order(order_request(&catalog, vec![unknown]))
        .await
        .expect_err("unknown pair should be rejected");
    assert!(matches!(err, OrderError::Stock(StockValidationError::NoMatch)));

    let err = coordinator
        .create_order(order_request(&catalog, vec![active.line(1), unknown]))
        .await
        .expect_err("partially unknown lines should be rejected");
    assert!(matches!(
        err,
        OrderError::Stock(StockValidationError::LineMismatch { .. })
    ));

    let err = coordinator
        .create_order(order_request(&catalog, vec![]))
        .await
        .expect_err("empty order should be rejected");
    assert!(matches!(err, OrderError::EmptyOrderLines));

    assert_eq!(count_rows(&pool, "orders").await?, 0);
    assert_eq!(stock_of(&pool, active.variant_value_id).await?, 5);

    Ok(())
}

#[sqlx::test]
async fn test_failure_after_writes_rolls_back_everything(pool: PgPool) -> sqlx::Result<()> {
    let catalog = seed_catalog(&pool).await?;
    let item = seed_stocked_item(&pool, &catalog, 10, Decimal::new(2500, 2)).await?;
    let coordinator = OrderCoordinator::new(pool.clone(), &test_config());

    // Make the last write of the transaction fail after header, items and
    // stock have already been written.
    sqlx::query(
        "ALTER TABLE order_status ADD CONSTRAINT reject_initial_status CHECK (description <> 'created new order')",
    )
    .execute(&pool)
    .await?;

    let err = coordinator
        .create_order(order_request(&catalog, vec![item.line(4)]))
        .await
        .expect_err("status insert should fail");

    assert!(matches!(err, OrderError::Database(_)));
    assert_eq!(err.category(), ErrorCategory::ServerFault);

    assert_eq!(count_rows(&pool, "orders").await?, 0);
    assert_eq!(count_rows(&pool, "order_items").await?, 0);
    assert_eq!(count_rows(&pool, "order_status").await?, 0);
    assert_eq!(stock_of(&pool, item.variant_value_id).await?, 10);

    Ok(())
}

#[sqlx::test]
async fn test_concurrent_orders_never_oversell(pool: PgPool) -> sqlx::Result<()> {
    let catalog = seed_catalog(&pool).await?;
    let item = seed_stocked_item(&pool, &catalog, 5, Decimal::new(1000, 2)).await?;
    let coordinator = OrderCoordinator::new(pool.clone(), &test_config());

    let attempts = (0..8).map(|_| {
        let coordinator = coordinator.clone();
        let request = order_request(&catalog, vec![item.line(1)]);
        async move { coordinator.create_order(request).await }
    });
    let results = futures::future::join_all(attempts).await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 5);
    for failure in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(
            matches!(
                failure,
                OrderError::Stock(StockValidationError::InsufficientStock { .. })
            ),
            "unexpected failure: {failure}"
        );
    }

    assert_eq!(stock_of(&pool, item.variant_value_id).await?, 0);
    assert_eq!(count_rows(&pool, "orders").await?, 5);
    assert_eq!(count_rows(&pool, "order_items").await?, 5);

    Ok(())
}
