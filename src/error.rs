//! Error types for the order core.
//!
//! [`OrderError`] is the boundary error returned by every coordinator
//! operation. Narrower error families (cursor decoding, pagination planning,
//! stock validation, status transitions) convert into it with `?`.
//!
//! Every variant belongs to an [`ErrorCategory`] so the HTTP layer can map
//! client faults and server faults to different status codes.

use crate::state_machine::errors::TransitionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Who is at fault for a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The request was malformed or violated a business rule. Retrying the
    /// same request will fail the same way.
    ClientFault,
    /// Storage or an internal invariant failed. The transaction was rolled back.
    ServerFault,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientFault => write!(f, "client_fault"),
            Self::ServerFault => write!(f, "server_fault"),
        }
    }
}

/// Errors produced while decoding an opaque pagination cursor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("Malformed cursor: {reason}")]
    Malformed { reason: String },

    #[error("Invalid timestamp in cursor: {reason}")]
    InvalidTimestamp { reason: String },

    #[error("Invalid id in cursor: {reason}")]
    InvalidId { reason: String },
}

/// Errors produced while planning a page fetch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error(transparent)]
    Cursor(#[from] CursorError),

    #[error("Unsupported sort field: {field}")]
    InvalidSortField { field: String },

    #[error("Only one of next_page and prev_page may be supplied")]
    ConflictingCursors,
}

/// Business-rule failures raised while checking requested lines against stock
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockValidationError {
    #[error("No price matches the requested variant values")]
    NoMatch,

    #[error("Product {name} ({value}) has an inactive price {price_id}")]
    InactivePrice {
        price_id: i64,
        name: String,
        value: String,
    },

    #[error("Price {price_id} does not match variant value {variant_value_id}")]
    LineMismatch { price_id: i64, variant_value_id: i64 },

    #[error(
        "Insufficient stock for variant value {variant_value_id}: requested {requested}, available {available}"
    )]
    InsufficientStock {
        variant_value_id: i64,
        requested: i64,
        available: i64,
    },
}

/// Boundary error for order operations
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Order must contain at least one line")]
    EmptyOrderLines,

    #[error("Order has {count} lines, the maximum is {max}")]
    TooManyOrderLines { count: usize, max: usize },

    #[error("Line {line_index} has non-positive quantity {quantity}")]
    NonPositiveQuantity { line_index: usize, quantity: i32 },

    #[error("Invalid reference for {field}: {value}")]
    InvalidReference { field: &'static str, value: i64 },

    #[error("Invalid status code {0}: must be between 1 and 5")]
    InvalidStatusCode(i16),

    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),

    #[error("Stock validation failed: {0}")]
    Stock(#[from] StockValidationError),

    #[error("Status transition rejected: {0}")]
    Transition(#[from] TransitionError),

    #[error("Order {order_id} not found")]
    OrderNotFound { order_id: i64 },

    #[error("Stock update affected no rows for variant value {variant_value_id}")]
    StockUpdateFailed { variant_value_id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Operation {operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl OrderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyOrderLines
            | Self::TooManyOrderLines { .. }
            | Self::NonPositiveQuantity { .. }
            | Self::InvalidReference { .. }
            | Self::InvalidStatusCode(_)
            | Self::Pagination(_)
            | Self::Stock(_)
            | Self::Transition(_)
            | Self::OrderNotFound { .. } => ErrorCategory::ClientFault,
            Self::StockUpdateFailed { .. }
            | Self::Database(_)
            | Self::Timeout { .. }
            | Self::InvariantViolation(_) => ErrorCategory::ServerFault,
        }
    }

    pub fn is_client_fault(&self) -> bool {
        self.category() == ErrorCategory::ClientFault
    }

    /// Stable machine-readable code for the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyOrderLines => "empty_order_lines",
            Self::TooManyOrderLines { .. } => "too_many_order_lines",
            Self::NonPositiveQuantity { .. } => "non_positive_quantity",
            Self::InvalidReference { .. } => "invalid_reference",
            Self::InvalidStatusCode(_) => "invalid_status_code",
            Self::Pagination(PaginationError::Cursor(_)) => "malformed_cursor",
            Self::Pagination(PaginationError::InvalidSortField { .. }) => "invalid_sort_field",
            Self::Pagination(PaginationError::ConflictingCursors) => "conflicting_cursors",
            Self::Stock(StockValidationError::NoMatch) => "no_match",
            Self::Stock(StockValidationError::InactivePrice { .. }) => "inactive_price",
            Self::Stock(StockValidationError::LineMismatch { .. }) => "line_mismatch",
            Self::Stock(StockValidationError::InsufficientStock { .. }) => "insufficient_stock",
            Self::Transition(TransitionError::AlreadyInStatus { .. }) => "already_in_status",
            Self::Transition(TransitionError::UnknownStatus { .. }) => "unknown_status",
            Self::Transition(TransitionError::InvalidTransition { .. }) => "invalid_transition",
            Self::OrderNotFound { .. } => "order_not_found",
            Self::StockUpdateFailed { .. } => "stock_update_failed",
            Self::Database(_) => "operation_failed",
            Self::Timeout { .. } => "timeout",
            Self::InvariantViolation(_) => "invariant_violation",
        }
    }
}

impl From<CursorError> for OrderError {
    fn from(err: CursorError) -> Self {
        OrderError::Pagination(PaginationError::Cursor(err))
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;
