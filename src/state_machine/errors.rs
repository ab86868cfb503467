use super::states::OrderStatus;
use thiserror::Error;

/// Reasons a requested status change is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Order is already in status {status}")]
    AlreadyInStatus { status: OrderStatus },

    #[error("Unknown current status code {code}")]
    UnknownStatus { code: i16 },

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

pub type TransitionResult<T> = Result<T, TransitionError>;
