//! API request types for event operations.
//!
//! Shared between the service layer and its callers. Following the
//! Functional Core pattern, these are pure data types with no I/O.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::EventError;
use super::types::{Event, TagId};

/// Whether an edit or delete targets one occurrence or the whole series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditScope {
    Instance,
    Series,
}

/// Error returned when parsing an [`EditScope`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid edit scope: {0:?} (expected \"instance\" or \"series\")")]
pub struct ParseEditScopeError(pub String);

impl FromStr for EditScope {
    type Err = ParseEditScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instance" => Ok(EditScope::Instance),
            "series" => Ok(EditScope::Series),
            other => Err(ParseEditScopeError(other.to_string())),
        }
    }
}

impl fmt::Display for EditScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditScope::Instance => write!(f, "instance"),
            EditScope::Series => write!(f, "series"),
        }
    }
}

/// Request payload for creating an event or replacing an existing one.
///
/// The same shape serves both writes: updates overwrite every field, they
/// do not merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "startDateTime")]
    pub start: NaiveDateTime,
    #[serde(rename = "endDateTime")]
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_end_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_count: Option<u32>,
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
}

impl EventPayload {
    /// Create a payload with just the required fields.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            start,
            end,
            recurrence_rule: None,
            recurrence_end_date: None,
            recurrence_count: None,
            tag_ids: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the recurrence rule string.
    pub fn with_recurrence_rule(mut self, rule: impl Into<String>) -> Self {
        self.recurrence_rule = Some(rule.into());
        self
    }

    /// Set the recurrence end date.
    pub fn with_recurrence_end_date(mut self, until: NaiveDateTime) -> Self {
        self.recurrence_end_date = Some(until);
        self
    }

    /// Set the maximum number of occurrences.
    pub fn with_recurrence_count(mut self, count: u32) -> Self {
        self.recurrence_count = Some(count);
        self
    }

    /// Set the tag ids to attach.
    pub fn with_tag_ids(mut self, tag_ids: Vec<TagId>) -> Self {
        self.tag_ids = tag_ids;
        self
    }

    /// Validates the payload's time range.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.end <= self.start {
            return Err(EventError::InvalidTimeRange);
        }
        Ok(())
    }

    /// Overwrites an event's own fields with this payload.
    ///
    /// Tags are resolved and replaced by the service layer, not here.
    pub fn apply_to(&self, event: &mut Event) {
        event.title = self.title.clone();
        event.description = self.description.clone();
        event.start = self.start;
        event.end = self.end;
        event.recurrence_rule = self.recurrence_rule.clone();
        event.recurrence_end_date = self.recurrence_end_date;
        event.recurrence_count = self.recurrence_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::NewEvent;
    use chrono::NaiveDate;

    fn make_date(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_edit_scope_round_trip() {
        assert_eq!("instance".parse::<EditScope>(), Ok(EditScope::Instance));
        assert_eq!("series".parse::<EditScope>(), Ok(EditScope::Series));
        assert_eq!(EditScope::Instance.to_string(), "instance");
        assert_eq!(EditScope::Series.to_string(), "series");
    }

    #[test]
    fn test_edit_scope_rejects_unknown_values() {
        let err = "everything".parse::<EditScope>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid edit scope: \"everything\" (expected \"instance\" or \"series\")"
        );
    }

    #[test]
    fn test_validate_accepts_ordered_range() {
        let payload = EventPayload::new("Standup", make_date(15, 9), make_date(15, 10));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_end_not_after_start() {
        let equal = EventPayload::new("Standup", make_date(15, 9), make_date(15, 9));
        assert_eq!(equal.validate(), Err(EventError::InvalidTimeRange));

        let inverted = EventPayload::new("Standup", make_date(15, 10), make_date(15, 9));
        assert_eq!(inverted.validate(), Err(EventError::InvalidTimeRange));
    }

    #[test]
    fn test_apply_to_overwrites_scalar_fields() {
        let mut event = NewEvent::new(7, "Standup", make_date(15, 9), make_date(15, 10));
        event.recurrence_rule = Some("FREQ=DAILY".to_string());
        event.recurrence_count = Some(4);
        let mut event = event.into_event(1);

        let payload = EventPayload::new("Planning", make_date(16, 11), make_date(16, 12))
            .with_description("Quarterly planning");
        payload.apply_to(&mut event);

        assert_eq!(event.title, "Planning");
        assert_eq!(event.description.as_deref(), Some("Quarterly planning"));
        assert_eq!(event.start, make_date(16, 11));
        assert!(event.recurrence_rule.is_none());
        assert!(event.recurrence_count.is_none());
    }

    #[test]
    fn test_payload_deserializes_from_wire_shape() {
        let json = r#"{
            "title": "Standup",
            "startDateTime": "2024-01-15T09:00:00",
            "endDateTime": "2024-01-15T10:00:00",
            "recurrenceRule": "FREQ=DAILY",
            "recurrenceCount": 4,
            "tagIds": [1, 2]
        }"#;

        let payload: EventPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.title, "Standup");
        assert_eq!(payload.recurrence_rule.as_deref(), Some("FREQ=DAILY"));
        assert_eq!(payload.recurrence_count, Some(4));
        assert_eq!(payload.tag_ids, vec![1, 2]);
    }
}
