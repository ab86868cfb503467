//! # Query Builder System
//!
//! Cursor (keyset) pagination over collections ordered by non-unique
//! timestamps.
//!
//! ## Key Components
//!
//! - [`cursor`] - Opaque, URL-safe cursor encoding of a `(timestamp, id)` key
//! - [`pagination`] - Request normalization and page assembly
//! - [`keyset`] - Seek predicate, ordering and limit pushed onto `sqlx::QueryBuilder`
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use order_core::query_builder::{PageRequest, PaginationPlanner, push_keyset_pagination};
//!
//! let planner = PaginationPlanner::default();
//! let plan = planner.plan(&request)?;
//!
//! let mut query = sqlx::QueryBuilder::new("SELECT * FROM products p");
//! push_keyset_pagination(&mut query, &plan, "p.", false);
//! let rows: Vec<Product> = query.build_query_as().fetch_all(&pool).await?;
//!
//! let page = planner.build_page(&plan, rows, |p| (p.created_at, p.id));
//! ```

pub mod cursor;
pub mod keyset;
pub mod pagination;

pub use cursor::{decode_cursor, encode_cursor, Cursor};
pub use keyset::push_keyset_pagination;
pub use pagination::{
    PageDirection, PagePlan, PageRequest, PageResponse, PaginationPlanner, SortField, SortOrder,
};
