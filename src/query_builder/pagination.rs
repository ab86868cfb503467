//! Cursor pagination planning.
//!
//! Planning happens in two halves around the storage fetch:
//!
//! 1. [`PaginationPlanner::plan`] normalizes the request and decides the fetch
//!    cursor, the effective sort order and the fetch limit (`limit + 1`; the
//!    extra row only signals that more data exists).
//! 2. [`PaginationPlanner::build_page`] trims the sentinel row, restores the
//!    display order for backward navigation and produces the cursors.
//!
//! Backward navigation fetches in the reverse order starting at the
//! `prev_page` cursor, so storage returns the rows immediately preceding it;
//! they are reversed again before being shown.

use super::cursor::{decode_cursor, encode_cursor, Cursor};
use crate::config::PaginationConfig;
use crate::constants;
use crate::error::PaginationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw page request as received from the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    /// Forward cursor; empty means none
    pub next_page: String,
    /// Backward cursor; empty means none
    pub prev_page: String,
    pub limit: i64,
    pub order: String,
    pub sort_by: String,
}

impl PageRequest {
    pub fn first(limit: i64, order: SortOrder, sort_by: SortField) -> Self {
        Self {
            limit,
            order: order.to_string(),
            sort_by: sort_by.to_string(),
            ..Self::default()
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.next_page = cursor.into();
        self.prev_page.clear();
        self
    }

    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.prev_page = cursor.into();
        self.next_page.clear();
        self
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub has_next: bool,
    pub has_previous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<String>,
    pub limit: i64,
}

impl<T> PageResponse<T> {
    pub fn empty(limit: i64) -> Self {
        Self {
            items: Vec::new(),
            has_next: false,
            has_previous: false,
            next_page: None,
            prev_page: None,
            limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Lenient parse: anything other than exactly `asc`/`desc` becomes `desc`
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "asc" => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Columns a page may be sorted by. Doubles as the SQL identifier whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    pub fn is_timestamp(self) -> bool {
        !matches!(self, Self::Id)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl std::str::FromStr for SortField {
    type Err = PaginationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = if s.is_empty() {
            constants::pagination::DEFAULT_SORT_FIELD
        } else {
            s
        };
        match field {
            "created_at" => Ok(Self::CreatedAt),
            "id" => Ok(Self::Id),
            "updated_at" => Ok(Self::UpdatedAt),
            other => Err(PaginationError::InvalidSortField {
                field: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    Forward,
    Backward,
}

/// Normalized request plus the parameters for the storage fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    /// Visible page size
    pub limit: i64,
    /// Order requested by the caller (display order)
    pub order: SortOrder,
    pub sort_by: SortField,
    pub direction: PageDirection,
    /// Position to fetch after, in `effective_order`; `None` for the first page
    pub fetch_cursor: Option<Cursor>,
    /// Order the storage query must use
    pub effective_order: SortOrder,
    pub fetch_limit: i64,
    /// Whether the request carried any cursor at all
    pub has_incoming_cursor: bool,
}

/// Stateless page planner parameterized by the configured limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPlanner {
    default_limit: i64,
    max_limit: i64,
}

impl Default for PaginationPlanner {
    fn default() -> Self {
        Self {
            default_limit: constants::pagination::DEFAULT_LIMIT,
            max_limit: constants::pagination::MAX_LIMIT,
        }
    }
}

impl PaginationPlanner {
    pub fn new(config: &PaginationConfig) -> Self {
        Self {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        }
    }

    pub fn normalize_limit(&self, limit: i64) -> i64 {
        if limit <= 0 || limit > self.max_limit {
            self.default_limit
        } else {
            limit
        }
    }

    pub fn plan(&self, request: &PageRequest) -> Result<PagePlan, PaginationError> {
        if !request.next_page.is_empty() && !request.prev_page.is_empty() {
            return Err(PaginationError::ConflictingCursors);
        }

        let limit = self.normalize_limit(request.limit);
        let order = SortOrder::normalize(&request.order);
        let sort_by: SortField = request.sort_by.parse()?;

        let (direction, raw_cursor, effective_order) = if !request.prev_page.is_empty() {
            (PageDirection::Backward, &request.prev_page, order.reverse())
        } else {
            (PageDirection::Forward, &request.next_page, order)
        };

        let fetch_cursor = if raw_cursor.is_empty() {
            None
        } else {
            Some(decode_cursor(raw_cursor)?)
        };

        Ok(PagePlan {
            limit,
            order,
            sort_by,
            direction,
            fetch_cursor,
            effective_order,
            fetch_limit: limit + 1,
            has_incoming_cursor: !raw_cursor.is_empty(),
        })
    }

    /// Turn the over-fetched rows of `plan` into the caller-facing page.
    ///
    /// `key` must return the same `(timestamp, id)` the storage query sorted by.
    pub fn build_page<T, F>(&self, plan: &PagePlan, mut rows: Vec<T>, key: F) -> PageResponse<T>
    where
        F: Fn(&T) -> (DateTime<Utc>, i64),
    {
        if rows.is_empty() {
            return PageResponse::empty(plan.limit);
        }

        let has_more = rows.len() as i64 > plan.limit;
        if has_more {
            rows.truncate(plan.limit as usize);
        }

        let cursor_of = |row: &T| {
            let (timestamp, id) = key(row);
            encode_cursor(timestamp, id)
        };
        // rows is non-empty: limit >= 1 after normalization
        let first_cursor = rows.first().map(&cursor_of);
        let last_cursor = rows.last().map(&cursor_of);

        match plan.direction {
            PageDirection::Backward => {
                rows.reverse();
                PageResponse {
                    items: rows,
                    has_next: true,
                    has_previous: has_more,
                    next_page: first_cursor,
                    prev_page: if has_more { last_cursor } else { None },
                    limit: plan.limit,
                }
            }
            PageDirection::Forward => PageResponse {
                items: rows,
                has_next: has_more,
                has_previous: plan.has_incoming_cursor,
                next_page: if has_more { last_cursor } else { None },
                prev_page: if plan.has_incoming_cursor {
                    first_cursor
                } else {
                    None
                },
                limit: plan.limit,
            },
        }
    }
}
