//! # Orchestration Engine
//!
//! Transactional order workflows built on the models, the stock pre-check and
//! the status state machine.
//!
//! ## Core Components
//!
//! - **OrderCoordinator**: Creates orders, appends status records and serves
//!   paginated order and product lists
//! - **StockValidator**: Read-only check of requested lines against prices and
//!   stock, behind the [`StockSource`] seam
//! - **types**: Request structs handed over by the HTTP layer

pub mod order_coordinator;
pub mod stock_validator;
pub mod types;

// Re-export core types and components for easy access
pub use order_coordinator::OrderCoordinator;
pub use stock_validator::{check_stock_lines, StockSource, StockValidator};
pub use types::{quantities_by_variant_value, CreateOrderRequest, OrderLineRequest};
