//! Input validation for the order core
//!
//! Shape checks that run before any storage access. Failures here are client
//! faults and never leave side effects.

use crate::error::{OrderError, Result};
use crate::orchestration::types::CreateOrderRequest;
use crate::state_machine::OrderStatus;

/// Validates a create-order request against the configured line limit
pub fn validate_create_order_request(
    request: &CreateOrderRequest,
    max_lines_per_order: usize,
) -> Result<()> {
    validate_reference("customer_id", request.customer_id)?;
    validate_reference("platform_id", request.platform_id)?;
    validate_reference("retail_store_id", request.retail_store_id)?;
    validate_reference("payment_method_id", request.payment_method_id)?;

    if request.lines.is_empty() {
        return Err(OrderError::EmptyOrderLines);
    }

    if request.lines.len() > max_lines_per_order {
        return Err(OrderError::TooManyOrderLines {
            count: request.lines.len(),
            max: max_lines_per_order,
        });
    }

    for (line_index, line) in request.lines.iter().enumerate() {
        if line.quantity <= 0 {
            return Err(OrderError::NonPositiveQuantity {
                line_index,
                quantity: line.quantity,
            });
        }
        validate_reference("price_id", line.price_id)?;
        validate_reference("variant_value_id", line.variant_value_id)?;
    }

    Ok(())
}

/// Validates a raw status code into a known [`OrderStatus`]
pub fn validate_status_code(code: i16) -> Result<OrderStatus> {
    OrderStatus::from_code(code).ok_or(OrderError::InvalidStatusCode(code))
}

fn validate_reference(field: &'static str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(OrderError::InvalidReference { field, value });
    }
    Ok(())
}
