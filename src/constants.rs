//! # System Constants
//!
//! Status codes shared with the surrounding CRUD layer and the fixed limits
//! of the order core.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export the lifecycle status for convenience
pub use crate::state_machine::OrderStatus;

/// Payment status of an order header.
///
/// Set once when the order is created and never touched by the status
/// workflow; payment processing happens outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum PaymentStatus {
    AwaitingPayment = 1,
    Paid = 2,
    Refunded = 3,
}

impl PaymentStatus {
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::AwaitingPayment),
            2 => Some(Self::Paid),
            3 => Some(Self::Refunded),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingPayment => write!(f, "awaiting_payment"),
            Self::Paid => write!(f, "paid"),
            Self::Refunded => write!(f, "refunded"),
        }
    }
}

/// `prices.status` values
pub mod price_status {
    pub const ACTIVE: i16 = 1;
    pub const INACTIVE: i16 = 2;
}

/// Page size bounds applied by the pagination planner
pub mod pagination {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;
    pub const DEFAULT_SORT_FIELD: &str = "created_at";
}

/// Order request bounds
pub mod orders {
    pub const DEFAULT_MAX_LINES_PER_ORDER: usize = 200;
    pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 5_000;
}
