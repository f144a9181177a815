//! Occurrence identity: addressing instances that are never persisted.
//!
//! Expanded occurrences have no rows of their own, so an edit or delete
//! aimed at one must carry an id that can be traced back to its master and
//! start time. The id is a deterministic hash of both; the reverse mapping
//! is a bounded brute-force search over candidate masters, the accepted
//! price of never storing occurrence rows.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Months, NaiveDateTime};

use super::expand::MAX_EXPANSION_STEPS;
use super::rule::RecurrenceRule;
use super::time::format_canonical;
use super::types::{Event, EventId};

/// Forward horizon for the brute-force inverse scan, measured from the
/// caller's notion of now.
pub const RESOLVE_HORIZON_MONTHS: u32 = 24;

/// Derives the synthetic id for one occurrence of a master event.
///
/// The id is a hash of `"{master_id}_{canonical_start}"`, masked to the
/// non-negative 63-bit range so it shares the row-id space. Deterministic
/// for the life of the process; distinct (master, start) pairs colliding is
/// possible in principle and accepted as practically rare rather than
/// cryptographically impossible.
///
/// # Examples
///
/// ```
/// use almanac_core::calendar::occurrence_id;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 15)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
///
/// assert_eq!(occurrence_id(42, start), occurrence_id(42, start));
/// assert!(occurrence_id(42, start) >= 0);
/// ```
pub fn occurrence_id(master_id: EventId, start: NaiveDateTime) -> EventId {
    let key = format!("{}_{}", master_id, format_canonical(start));
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() & 0x7FFF_FFFF_FFFF_FFFF) as EventId
}

/// A synthetic id traced back to its master and occurrence start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOccurrence {
    pub master_id: EventId,
    pub start: NaiveDateTime,
}

/// Brute-force inverse of [`occurrence_id`] over a candidate set.
///
/// Regenerates each recurring candidate's step sequence and tests every
/// cursor position against `id`, bounded per candidate by
/// [`MAX_EXPANSION_STEPS`] and by [`RESOLVE_HORIZON_MONTHS`] past `now`.
/// Returns the first match; `None` means the id does not address an
/// expanded occurrence (it may still be a stored row's own id). Callers
/// bound the cost by passing only the acting user's events.
pub fn resolve_occurrence(
    candidates: &[Event],
    id: EventId,
    now: NaiveDateTime,
) -> Option<ResolvedOccurrence> {
    let horizon = now
        .checked_add_months(Months::new(RESOLVE_HORIZON_MONTHS))
        .unwrap_or(NaiveDateTime::MAX);

    for event in candidates {
        let Some(rule) = event.recurrence_rule.as_deref().and_then(RecurrenceRule::parse) else {
            continue;
        };

        let mut cursor = event.start;
        let mut steps = 0;
        while steps < MAX_EXPANSION_STEPS {
            if occurrence_id(event.id, cursor) == id {
                return Some(ResolvedOccurrence {
                    master_id: event.id,
                    start: cursor,
                });
            }
            cursor = match rule.advance(cursor) {
                Some(next) => next,
                None => break,
            };
            steps += 1;
            if cursor > horizon {
                break;
            }
        }
    }

    None
}
