//! # Database Operations
//!
//! Connection pooling and schema migrations on top of SQLx.
//!
//! ## Key Components
//!
//! - [`connection`] - Pool construction from [`DatabaseConfig`](crate::config::DatabaseConfig),
//!   health checks and the embedded migrator
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use order_core::config::OrderCoreConfig;
//! use order_core::database::DatabaseConnection;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OrderCoreConfig::load()?;
//! let db = DatabaseConnection::connect(&config.database).await?;
//! assert!(db.health_check().await?);
//! # Ok(())
//! # }
//! ```

pub mod connection;

pub use connection::{DatabaseConnection, MIGRATOR};
