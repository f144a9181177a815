//! Occurrence expansion: turning recurring masters into concrete instances.
//!
//! Expansion is recomputed on every query and nothing it produces is ever
//! persisted. The master row plus its exclusion list fully determine the
//! result, which is what lets instance-level edits work by exclusion and
//! override instead of materialized occurrence rows.

use super::identity::occurrence_id;
use super::rule::RecurrenceRule;
use super::types::{Event, Occurrence};
use super::window::QueryWindow;

/// Hard cap on cursor advances when walking a single master's sequence.
/// Guards rules that cannot otherwise terminate inside the window.
pub const MAX_EXPANSION_STEPS: usize = 1000;

/// Expands one recurring master into the occurrences intersecting `window`.
///
/// Walks the rule's step sequence from the master's own start, emitting an
/// occurrence for every cursor position that is not excluded and overlaps
/// the window. Stops at the window end, the recurrence end date, the
/// recurrence count (counted in cursor advances, so excluded occurrences
/// still consume a slot) or the step cap, whichever comes first. A master
/// without a parseable non-empty rule expands to nothing.
pub fn expand_event(master: &Event, window: &QueryWindow) -> Vec<Occurrence> {
    let Some(rule) = master
        .recurrence_rule
        .as_deref()
        .and_then(RecurrenceRule::parse)
    else {
        return Vec::new();
    };

    let duration = master.duration();
    let mut occurrences = Vec::new();
    let mut cursor = master.start;
    let mut advances = 0;

    while cursor < window.end {
        if master
            .recurrence_end_date
            .is_some_and(|until| cursor > until)
        {
            break;
        }
        if master
            .recurrence_count
            .is_some_and(|count| advances >= count as usize)
        {
            break;
        }

        let end = cursor + duration;
        if !master.excluded_dates.contains(cursor) && window.overlaps(cursor, end) {
            occurrences.push(Occurrence {
                id: occurrence_id(master.id, cursor),
                title: master.title.clone(),
                description: master.description.clone(),
                start: cursor,
                end,
                user_id: master.user_id,
                parent_id: Some(master.id),
                original_start: Some(cursor),
                tags: master.tags.clone(),
            });
        }

        cursor = match rule.advance(cursor) {
            Some(next) => next,
            None => break,
        };
        advances += 1;
        if advances >= MAX_EXPANSION_STEPS {
            break;
        }
    }

    occurrences
}

/// Projects a mixed set of rows into the occurrences visible in `window`,
/// merged and sorted by start time.
///
/// Overrides and plain rows are included directly when they overlap the
/// window; recurring masters are expanded with [`expand_event`].
pub fn expand(events: &[Event], window: &QueryWindow) -> Vec<Occurrence> {
    let mut result = Vec::new();

    for event in events {
        if event.is_override() {
            if window.overlaps(event.start, event.end) {
                result.push(Occurrence::from_event(event));
            }
        } else if event.is_recurring() {
            result.extend(expand_event(event, window));
        } else if window.overlaps(event.start, event.end) {
            result.push(Occurrence::from_event(event));
        }
    }

    result.sort_by_key(|occurrence| occurrence.start);
    result
}
