//! Canonical timestamp formatting shared by identity keys and exclusion
//! entries.
//!
//! The canonical form is ISO-8601 without an offset, with the seconds
//! component omitted when it is zero (`2024-01-15T09:00`,
//! `2024-01-15T09:00:30`). Parsing accepts both precisions so data written
//! with either shape keeps resolving.

use chrono::{NaiveDateTime, Timelike};

/// Formats `ts` in the canonical form.
pub fn format_canonical(ts: NaiveDateTime) -> String {
    if ts.second() == 0 && ts.nanosecond() == 0 {
        ts.format("%Y-%m-%dT%H:%M").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// Parses a canonical timestamp, tolerating both second and minute
/// precision. Returns `None` for anything else.
pub fn parse_canonical(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}
