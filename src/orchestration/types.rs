//! Request types accepted by the order coordinator.
//!
//! These arrive already deserialized from the HTTP layer; the coordinator
//! still validates their shape before touching storage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One requested line: how many units of a variant value at a given price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub price_id: i64,
    pub variant_value_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: i64,
    pub platform_id: i64,
    pub retail_store_id: i64,
    pub payment_method_id: i64,
    pub lines: Vec<OrderLineRequest>,
}

/// Total requested quantity per variant value, ordered by variant value id.
///
/// Several lines may target the same variant value; stock is checked and
/// decremented against the sum. The ascending order gives concurrent orders a
/// consistent row-lock order.
pub fn quantities_by_variant_value(lines: &[OrderLineRequest]) -> BTreeMap<i64, i64> {
    let mut totals = BTreeMap::new();
    for line in lines {
        *totals.entry(line.variant_value_id).or_insert(0) += i64::from(line.quantity);
    }
    totals
}
