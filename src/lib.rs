#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Order Core
//!
//! Transactional order engine and cursor pagination for an order-management
//! backend on PostgreSQL.
//!
//! ## Overview
//!
//! Customers place orders against priced product variants with finite stock.
//! The core owns the two pieces that must be correct under concurrency:
//!
//! - **Order transactions**: validate availability, price and activeness,
//!   persist the order with its items, decrement stock and record the initial
//!   status as one all-or-nothing unit
//! - **Cursor pagination**: stable, bidirectional, opaque-cursor pages over
//!   collections ordered by non-unique timestamps
//!
//! HTTP routing, body parsing and single-entity CRUD live outside this crate;
//! callers hand over typed requests and render the results.
//!
//! ## Module Organization
//!
//! - [`orchestration`] - Order coordinator and stock pre-check
//! - [`state_machine`] - Order status lifecycle rules
//! - [`query_builder`] - Cursor codec, pagination planner and keyset SQL
//! - [`models`] - SQLx models for orders, items, status history and catalog reads
//! - [`database`] - Connection pool and embedded migrations
//! - [`config`] - Layered configuration (defaults, TOML, environment)
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use order_core::config::OrderCoreConfig;
//! use order_core::database::DatabaseConnection;
//! use order_core::orchestration::{CreateOrderRequest, OrderCoordinator, OrderLineRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OrderCoreConfig::load()?;
//! order_core::logging::init_structured_logging(&config.logging);
//!
//! let db = DatabaseConnection::connect(&config.database).await?;
//! let coordinator = OrderCoordinator::new(db.pool().clone(), &config);
//!
//! let order = coordinator
//!     .create_order(CreateOrderRequest {
//!         customer_id: 1,
//!         platform_id: 1,
//!         retail_store_id: 1,
//!         payment_method_id: 1,
//!         lines: vec![OrderLineRequest { price_id: 7, variant_value_id: 5, quantity: 3 }],
//!     })
//!     .await?;
//!
//! coordinator.update_order_status(order.id, 2).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests, DATABASE_URL must point at PostgreSQL
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod query_builder;
pub mod state_machine;
pub mod validation;

pub use config::OrderCoreConfig;
pub use constants::PaymentStatus;
pub use error::{ErrorCategory, OrderError, Result};
pub use orchestration::{CreateOrderRequest, OrderCoordinator, OrderLineRequest};
pub use query_builder::{Cursor, PageRequest, PageResponse, PaginationPlanner};
pub use state_machine::{OrderStateMachine, OrderStatus};
