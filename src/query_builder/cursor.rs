//! Opaque pagination cursors.
//!
//! A cursor is the sort key of a boundary row: its timestamp (second
//! precision, UTC) and its id. On the wire it is
//! `base64url("<RFC3339 timestamp>||<id>")`, e.g. `2026-01-10T10:00:00Z||12345`.
//! RFC3339 timestamps contain colons but never `||`, so the separator is
//! unambiguous.

use crate::error::CursorError;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chrono::{DateTime, SecondsFormat, Timelike, Utc};

/// Separator between timestamp and id in the raw cursor text
pub const CURSOR_SEPARATOR: &str = "||";

/// Decoded pagination position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub timestamp: DateTime<Utc>,
    pub id: i64,
}

impl Cursor {
    /// Build a cursor, truncating the timestamp to whole seconds
    pub fn new(timestamp: DateTime<Utc>, id: i64) -> Self {
        Self {
            timestamp: truncate_to_seconds(timestamp),
            id,
        }
    }

    /// The "no cursor supplied" sentinel: Unix epoch and id 0
    pub fn zero() -> Self {
        Self {
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            id: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    pub fn encode(&self) -> String {
        encode_cursor(self.timestamp, self.id)
    }

    pub fn decode(encoded: &str) -> Result<Self, CursorError> {
        decode_cursor(encoded)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::zero()
    }
}

/// Encode a sort key into an opaque, URL-safe cursor
pub fn encode_cursor(timestamp: DateTime<Utc>, id: i64) -> String {
    let raw = format!(
        "{}{CURSOR_SEPARATOR}{id}",
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    URL_SAFE.encode(raw.as_bytes())
}

/// Decode a cursor produced by [`encode_cursor`].
///
/// An empty string is not an error: it decodes to [`Cursor::zero`].
pub fn decode_cursor(encoded: &str) -> Result<Cursor, CursorError> {
    if encoded.is_empty() {
        return Ok(Cursor::zero());
    }

    let bytes = URL_SAFE
        .decode(encoded.as_bytes())
        .map_err(|e| CursorError::Malformed {
            reason: format!("failed to decode cursor: {e}"),
        })?;
    let raw = String::from_utf8(bytes).map_err(|e| CursorError::Malformed {
        reason: format!("cursor is not valid UTF-8: {e}"),
    })?;

    let parts: Vec<&str> = raw.split(CURSOR_SEPARATOR).collect();
    let [timestamp, id] = parts.as_slice() else {
        return Err(CursorError::Malformed {
            reason: format!("expected 2 parts, found {}", parts.len()),
        });
    };

    let timestamp = DateTime::parse_from_rfc3339(timestamp)
        .map_err(|e| CursorError::InvalidTimestamp {
            reason: format!("{timestamp}: {e}"),
        })?
        .with_timezone(&Utc);
    let id = id.parse::<i64>().map_err(|e| CursorError::InvalidId {
        reason: format!("{id}: {e}"),
    })?;

    Ok(Cursor { timestamp, id })
}

pub fn truncate_to_seconds(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.with_nanosecond(0).unwrap_or(timestamp)
}
