//! Keyset (seek) SQL for a [`PagePlan`].
//!
//! Timestamp keys are compared at second precision in UTC, the same precision
//! the cursor carries, so a boundary row never reappears on the next page.
//! The `(date_trunc('second', col AT TIME ZONE 'UTC'), id)` expression matches
//! the pagination indexes in the migrations.

use super::pagination::{PagePlan, SortField, SortOrder};
use sqlx::{Postgres, QueryBuilder};

/// Second-precision UTC sort expression for a timestamp column
pub fn timestamp_key(table_prefix: &str, column: &str) -> String {
    format!("date_trunc('second', {table_prefix}{column} AT TIME ZONE 'UTC')")
}

/// Append the cursor predicate, `ORDER BY` and `LIMIT` for `plan`.
///
/// `table_prefix` is either empty or an alias with its trailing dot (`"o."`).
/// Set `has_where` when the query already carries a `WHERE` clause.
pub fn push_keyset_pagination(
    builder: &mut QueryBuilder<'_, Postgres>,
    plan: &PagePlan,
    table_prefix: &str,
    has_where: bool,
) {
    let id_column = format!("{table_prefix}id");
    let comparison = match plan.effective_order {
        SortOrder::Asc => " > ",
        SortOrder::Desc => " < ",
    };

    if let Some(cursor) = plan.fetch_cursor {
        builder.push(if has_where { " AND " } else { " WHERE " });
        match plan.sort_by {
            SortField::Id => {
                builder.push(&id_column).push(comparison).push_bind(cursor.id);
            }
            field => {
                builder
                    .push("(")
                    .push(timestamp_key(table_prefix, field.column()))
                    .push(", ")
                    .push(&id_column)
                    .push(")")
                    .push(comparison)
                    .push("(")
                    .push_bind(cursor.timestamp.naive_utc())
                    .push(", ")
                    .push_bind(cursor.id)
                    .push(")");
            }
        }
    }

    let direction = plan.effective_order.as_sql();
    builder.push(" ORDER BY ");
    if plan.sort_by.is_timestamp() {
        builder
            .push(timestamp_key(table_prefix, plan.sort_by.column()))
            .push(" ")
            .push(direction)
            .push(", ");
    }
    builder
        .push(&id_column)
        .push(" ")
        .push(direction)
        .push(" LIMIT ")
        .push_bind(plan.fetch_limit);
}
