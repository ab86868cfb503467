//! # Stock Validator
//!
//! Read-only pre-check of requested order lines against prices and stock.
//!
//! The check runs before the write transaction opens, so it can only reject
//! early: two orders may both pass it and then compete for the same stock.
//! The guarded decrement inside the transaction has the final word.

use crate::error::{OrderError, StockValidationError};
use crate::models::StockLine;
use crate::orchestration::types::{quantities_by_variant_value, OrderLineRequest};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Where stock lines come from
#[async_trait]
pub trait StockSource: Send + Sync {
    async fn load_stock_lines(
        &self,
        lines: &[OrderLineRequest],
    ) -> Result<Vec<StockLine>, sqlx::Error>;
}

#[async_trait]
impl StockSource for PgPool {
    async fn load_stock_lines(
        &self,
        lines: &[OrderLineRequest],
    ) -> Result<Vec<StockLine>, sqlx::Error> {
        StockLine::load_for_lines(self, lines).await
    }
}

#[derive(Debug, Clone)]
pub struct StockValidator<S = PgPool> {
    source: S,
}

impl<S: StockSource> StockValidator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Check every requested line against its price and stock.
    ///
    /// Lines must already have passed request validation.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn validate(&self, lines: &[OrderLineRequest]) -> Result<(), OrderError> {
        let stock_lines = self.source.load_stock_lines(lines).await?;
        debug!(matched = stock_lines.len(), "Loaded stock lines");

        check_stock_lines(lines, &stock_lines)?;
        Ok(())
    }
}

/// Pure rule check over already loaded stock lines.
///
/// Quantities for lines sharing a variant value are summed before comparing
/// against the available stock.
pub fn check_stock_lines(
    lines: &[OrderLineRequest],
    stock_lines: &[StockLine],
) -> Result<(), StockValidationError> {
    if stock_lines.is_empty() {
        return Err(StockValidationError::NoMatch);
    }

    let by_pair: HashMap<(i64, i64), &StockLine> = stock_lines
        .iter()
        .map(|s| ((s.price_id, s.variant_value_id), s))
        .collect();
    let requested = quantities_by_variant_value(lines);

    for line in lines {
        let stock = by_pair
            .get(&(line.price_id, line.variant_value_id))
            .ok_or(StockValidationError::LineMismatch {
                price_id: line.price_id,
                variant_value_id: line.variant_value_id,
            })?;

        if !stock.is_price_active() {
            return Err(StockValidationError::InactivePrice {
                price_id: stock.price_id,
                name: stock.variant_name.clone(),
                value: stock.value.clone(),
            });
        }

        let total = requested
            .get(&line.variant_value_id)
            .copied()
            .unwrap_or_else(|| i64::from(line.quantity));
        let available = i64::from(stock.stock_quantity);
        if total > available {
            return Err(StockValidationError::InsufficientStock {
                variant_value_id: line.variant_value_id,
                requested: total,
                available,
            });
        }
    }

    Ok(())
}
