//! Timestamp formatting and parsing
//!
//! Show start times are stored as RFC 3339 text in UTC with whole-second
//! precision. Keeping every stored value in the same shape means the text
//! collates in chronological order, so SQL comparisons against a bound
//! "now" string are correct.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Format a timestamp in the canonical stored form (RFC 3339, UTC, seconds).
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a timestamp as submitted by a form or stored in the database.
///
/// Accepts RFC 3339 ("2026-08-07T20:00:00Z") and the plain datetime form
/// browsers and the booking forms produce ("2026-08-07 20:00:00"), which is
/// taken as UTC.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }

    // datetime-local inputs use a 'T' separator without a zone
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(naive.and_utc());
        }
    }

    Err(Error::InvalidInput(format!("Unrecognized timestamp: {}", text)))
}
