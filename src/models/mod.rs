//! # Order Core Models
//!
//! sqlx-backed models for the order tables and the catalog reads the order
//! core depends on. Functions that must join a caller's transaction take a
//! `&mut PgConnection`; plain reads accept any `PgExecutor`.

pub mod order;
pub mod order_item;
pub mod order_status;
pub mod product;
pub mod stock_line;

// Re-export core models for easy access
pub use order::{NewOrder, Order, OrderSummary};
pub use order_item::OrderItem;
pub use order_status::{NewOrderStatusRecord, OrderStatusRecord};
pub use product::Product;
pub use stock_line::StockLine;
