use crate::state_machine::errors::TransitionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status as stored in `order_status.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum OrderStatus {
    /// Initial status written when the order is created
    Pending = 1,
    /// Payment confirmed
    Paid = 2,
    /// Handed over to the carrier
    Shipped = 3,
    /// Delivered; terminal
    Completed = 4,
    /// Canceled at any point before completion; terminal
    Canceled = 5,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        Self::Pending,
        Self::Paid,
        Self::Shipped,
        Self::Completed,
        Self::Canceled,
    ];

    /// Numeric code persisted in the history table
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Pending),
            2 => Some(Self::Paid),
            3 => Some(Self::Shipped),
            4 => Some(Self::Completed),
            5 => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Check if this is a terminal status (no further history may be appended)
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl TryFrom<i16> for OrderStatus {
    type Error = TransitionError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(TransitionError::UnknownStatus { code })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Shipped => write!(f, "shipped"),
            Self::Completed => write!(f, "completed"),
            Self::Canceled => write!(f, "canceled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "shipped" => Ok(Self::Shipped),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}
