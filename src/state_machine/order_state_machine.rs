use super::{
    errors::{TransitionError, TransitionResult},
    states::OrderStatus,
};

/// Audit description written with the first history record of every order
pub const ORDER_CREATED_DESCRIPTION: &str = "created new order";

/// Fallback description for codes without a dedicated message
pub const GENERIC_STATUS_DESCRIPTION: &str = "Status updated";

/// Pure transition rules for the order lifecycle.
///
/// The machine holds no state: the current status always comes from the
/// latest `order_status` record, read inside the caller's transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Statuses reachable in one step from `current`
    pub fn allowed_transitions(current: OrderStatus) -> &'static [OrderStatus] {
        match current {
            OrderStatus::Pending => &[OrderStatus::Paid, OrderStatus::Canceled],
            OrderStatus::Paid => &[OrderStatus::Shipped, OrderStatus::Canceled],
            OrderStatus::Shipped => &[OrderStatus::Completed, OrderStatus::Canceled],
            OrderStatus::Completed | OrderStatus::Canceled => &[],
        }
    }

    pub fn can_transition(current: OrderStatus, next: OrderStatus) -> TransitionResult<()> {
        if current == next {
            return Err(TransitionError::AlreadyInStatus { status: current });
        }

        if Self::allowed_transitions(current).contains(&next) {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition {
                from: current,
                to: next,
            })
        }
    }

    /// Same check for raw stored codes. A current code outside the table is
    /// reported as `UnknownStatus`.
    pub fn can_transition_codes(
        current: i16,
        next: i16,
    ) -> TransitionResult<(OrderStatus, OrderStatus)> {
        if current == next {
            if let Some(status) = OrderStatus::from_code(current) {
                return Err(TransitionError::AlreadyInStatus { status });
            }
        }

        let current = OrderStatus::try_from(current)?;
        let next = OrderStatus::try_from(next)?;
        Self::can_transition(current, next)?;
        Ok((current, next))
    }

    pub fn description_for(status: OrderStatus) -> &'static str {
        match status {
            OrderStatus::Pending => "Order is pending payment",
            OrderStatus::Paid => "Payment confirmed successfully",
            OrderStatus::Shipped => "Order has been shipped",
            OrderStatus::Completed => "Order completed and delivered",
            OrderStatus::Canceled => "Order has been canceled",
        }
    }

    pub fn description_for_code(code: i16) -> &'static str {
        OrderStatus::from_code(code)
            .map(Self::description_for)
            .unwrap_or(GENERIC_STATUS_DESCRIPTION)
    }
}
