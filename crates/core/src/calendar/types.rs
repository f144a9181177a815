use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::ExclusionSet;

/// Identifier for stored event rows and synthesized occurrences.
///
/// Row ids are assigned by the event store; occurrence ids are derived by
/// the identity scheme. Both live in the same non-negative `i64` space so a
/// single id argument can address either.
pub type EventId = i64;

/// Identifier for the user owning an event.
pub type UserId = i64;

/// Identifier for a tag attached to an event.
pub type TagId = i64;

/// A user-defined label attached to events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A stored event row: a plain event, a recurring master, or an override
/// detached from a series.
///
/// Overrides carry a parent reference and the start time of the occurrence
/// they replace; they never carry a recurrence rule themselves (kept by the
/// write paths, not enforced by the type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "startDateTime")]
    pub start: NaiveDateTime,
    #[serde(rename = "endDateTime")]
    pub end: NaiveDateTime,
    pub user_id: UserId,
    #[serde(default)]
    pub recurrence_rule: Option<String>,
    #[serde(default)]
    pub recurrence_end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub recurrence_count: Option<u32>,
    #[serde(default, rename = "parentEventId")]
    pub parent_id: Option<EventId>,
    #[serde(default, rename = "originalStartDateTime")]
    pub original_start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "ExclusionSet::is_empty")]
    pub excluded_dates: ExclusionSet,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Event {
    /// True when this row replaces one occurrence of a series.
    pub fn is_override(&self) -> bool {
        self.parent_id.is_some()
    }

    /// True when this row carries a recurrence rule to expand.
    pub fn is_recurring(&self) -> bool {
        matches!(&self.recurrence_rule, Some(rule) if !rule.is_empty())
    }

    /// Length of one occurrence, taken from the master's own start and end.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Payload for inserting a new event row; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub user_id: UserId,
    pub recurrence_rule: Option<String>,
    pub recurrence_end_date: Option<NaiveDateTime>,
    pub recurrence_count: Option<u32>,
    pub parent_id: Option<EventId>,
    pub original_start: Option<NaiveDateTime>,
    pub excluded_dates: ExclusionSet,
    pub tags: Vec<Tag>,
}

impl NewEvent {
    /// A plain non-recurring draft; recurrence and override fields start
    /// unset.
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            start,
            end,
            user_id,
            recurrence_rule: None,
            recurrence_end_date: None,
            recurrence_count: None,
            parent_id: None,
            original_start: None,
            excluded_dates: ExclusionSet::new(),
            tags: Vec::new(),
        }
    }

    /// Materializes the stored row once the store has picked an id.
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            start: self.start,
            end: self.end,
            user_id: self.user_id,
            recurrence_rule: self.recurrence_rule,
            recurrence_end_date: self.recurrence_end_date,
            recurrence_count: self.recurrence_count,
            parent_id: self.parent_id,
            original_start: self.original_start,
            excluded_dates: self.excluded_dates,
            tags: self.tags,
        }
    }
}

/// A concrete, time-bounded instance of an event inside a query window.
///
/// Built fresh on every query and never persisted. For expanded recurring
/// occurrences the id is synthesized and the parent/original-start fields
/// point back at the master; for plain rows and overrides they are the row's
/// own stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "startDateTime")]
    pub start: NaiveDateTime,
    #[serde(rename = "endDateTime")]
    pub end: NaiveDateTime,
    pub user_id: UserId,
    #[serde(default, rename = "parentEventId")]
    pub parent_id: Option<EventId>,
    #[serde(default, rename = "originalStartDateTime")]
    pub original_start: Option<NaiveDateTime>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Occurrence {
    /// Projects a stored row (plain event or override) into the window view.
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            start: event.start,
            end: event.end,
            user_id: event.user_id,
            parent_id: event.parent_id,
            original_start: event.original_start,
            tags: event.tags.clone(),
        }
    }
}
