//! Event workflows: creation, range queries, scoped edits and deletes.
//!
//! The pure expansion and identity logic lives in `almanac_core`; this
//! service wires it to the storage contract and owns every multi-step
//! flow, such as splitting a series or cascading a delete, so the stores
//! stay plain CRUD surfaces.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use almanac_core::calendar::{
    self, EditScope, Event, EventId, EventPayload, NewEvent, Occurrence, QueryWindow, Tag, TagId,
    UserId, resolve_occurrence,
};
use almanac_core::storage::{EventStore, TagStore};

use crate::error::{Result, ServiceError};

/// Orchestrates event workflows over an [`EventStore`] and a [`TagStore`].
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    tags: Arc<dyn TagStore>,
}

impl EventService {
    pub fn new(events: Arc<dyn EventStore>, tags: Arc<dyn TagStore>) -> Self {
        Self { events, tags }
    }

    /// Creates a new event for `user_id` from `payload`.
    ///
    /// The payload is validated and its tag ids resolved before anything
    /// is written, so a rejected request leaves no partial state behind.
    pub async fn create_event(&self, user_id: UserId, payload: EventPayload) -> Result<Event> {
        payload.validate()?;
        let tags = self.resolve_tags(&payload.tag_ids).await?;

        let draft = NewEvent {
            description: payload.description,
            recurrence_rule: payload.recurrence_rule,
            recurrence_end_date: payload.recurrence_end_date,
            recurrence_count: payload.recurrence_count,
            tags,
            ..NewEvent::new(user_id, payload.title, payload.start, payload.end)
        };
        let event = self.events.create(draft).await?;
        info!(event_id = %event.id, "Created new event");
        Ok(event)
    }

    /// Returns every occurrence for `user_id` that overlaps `window`,
    /// expanded from the stored rows and sorted by start time.
    ///
    /// When `tag` is given, only occurrences carrying that tag are kept.
    /// The filter runs after expansion, so an override is judged by its
    /// own tags rather than its master's.
    pub async fn events_in_range(
        &self,
        user_id: UserId,
        window: QueryWindow,
        tag: Option<TagId>,
    ) -> Result<Vec<Occurrence>> {
        debug!(
            %user_id,
            window_start = %window.start,
            window_end = %window.end,
            "Expanding events in range"
        );
        let rows = self.events.find_all_for_user(user_id).await?;
        let mut occurrences = calendar::expand(&rows, &window);
        if let Some(tag_id) = tag {
            occurrences.retain(|occ| occ.tags.iter().any(|t| t.id == tag_id));
        }
        Ok(occurrences)
    }

    /// Applies `payload` to the event identified by `target`.
    ///
    /// `target` may be a stored row id or a synthesized occurrence id.
    /// Editing a single occurrence of a recurring series splits it: the
    /// occurrence start is excluded from the master and a standalone
    /// override row takes its place. Every other combination edits the
    /// resolved row in place. Returns the row the edit landed on, the
    /// new override or the updated master.
    pub async fn update_event(
        &self,
        target: EventId,
        payload: EventPayload,
        scope: EditScope,
        user_id: UserId,
    ) -> Result<Event> {
        payload.validate()?;
        let (mut event, occurrence_start) = self.resolve_target(target, user_id).await?;
        let tags = self.resolve_tags(&payload.tag_ids).await?;

        match (scope, occurrence_start) {
            (EditScope::Instance, Some(occurrence)) => {
                self.split_series(event, occurrence, payload, tags).await
            }
            _ => {
                payload.apply_to(&mut event);
                event.tags = tags;
                self.events.update(&event).await?;
                info!(event_id = %event.id, "Updated event");
                Ok(event)
            }
        }
    }

    /// Deletes the event identified by `target` under `scope`.
    ///
    /// Series scope removes the resolved row and every override pointing
    /// at it. Instance scope depends on what `target` names: a
    /// synthesized occurrence or a recurring master grows an exclusion,
    /// while an override or plain row is removed outright.
    pub async fn delete_event(
        &self,
        target: EventId,
        scope: EditScope,
        user_id: UserId,
    ) -> Result<()> {
        let (mut event, occurrence_start) = self.resolve_target(target, user_id).await?;

        if scope == EditScope::Series {
            self.events.delete(event.id).await?;
            self.events.delete_by_parent(event.id).await?;
            info!(event_id = %event.id, "Deleted event series");
            return Ok(());
        }

        match occurrence_start {
            Some(occurrence) => {
                event.excluded_dates.insert(occurrence);
                self.events.update(&event).await?;
                info!(
                    event_id = %event.id,
                    occurrence = %calendar::format_canonical(occurrence),
                    "Excluded occurrence from series"
                );
            }
            None if event.is_override() || !event.is_recurring() => {
                self.events.delete(event.id).await?;
                info!(event_id = %event.id, "Deleted event");
            }
            None => {
                let first = event.start;
                event.excluded_dates.insert(first);
                self.events.update(&event).await?;
                info!(event_id = %event.id, "Excluded first occurrence of series");
            }
        }
        Ok(())
    }

    /// Detaches one occurrence of `master` into an override row.
    ///
    /// The master gains an exclusion for `occurrence` so expansion stops
    /// producing it, and a standalone row linked back through
    /// `parent_id`/`original_start` replaces it with the payload's data.
    /// Returns the new override row.
    async fn split_series(
        &self,
        mut master: Event,
        occurrence: NaiveDateTime,
        payload: EventPayload,
        tags: Vec<Tag>,
    ) -> Result<Event> {
        master.excluded_dates.insert(occurrence);
        self.events.update(&master).await?;

        let draft = NewEvent {
            description: payload.description,
            parent_id: Some(master.id),
            original_start: Some(occurrence),
            tags,
            ..NewEvent::new(master.user_id, payload.title, payload.start, payload.end)
        };
        let override_row = self.events.create(draft).await?;
        info!(
            event_id = %master.id,
            override_id = %override_row.id,
            occurrence = %calendar::format_canonical(occurrence),
            "Split occurrence into standalone override"
        );
        Ok(override_row)
    }

    /// Resolves `target` to a stored row, distinguishing synthesized
    /// occurrence ids from row ids.
    ///
    /// Occurrence ids are only matched against the acting user's own
    /// events, so an occurrence of someone else's series comes back as
    /// `NotFound` rather than `AccessDenied`. Row ids are checked for
    /// ownership after the lookup.
    async fn resolve_target(
        &self,
        target: EventId,
        user_id: UserId,
    ) -> Result<(Event, Option<NaiveDateTime>)> {
        let candidates = self.events.find_all_for_user(user_id).await?;
        let now = Local::now().naive_local();
        if let Some(resolved) = resolve_occurrence(&candidates, target, now) {
            let master = self
                .events
                .find_by_id(resolved.master_id)
                .await?
                .ok_or(ServiceError::NotFound(resolved.master_id))?;
            return Ok((master, Some(resolved.start)));
        }

        let event = self
            .events
            .find_by_id(target)
            .await?
            .ok_or(ServiceError::NotFound(target))?;
        if event.user_id != user_id {
            return Err(ServiceError::AccessDenied(target));
        }
        Ok((event, None))
    }

    /// Resolves `tag_ids` to full tags, failing if any id is unknown.
    async fn resolve_tags(&self, tag_ids: &[TagId]) -> Result<Vec<Tag>> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }
        let tags = self.tags.find_by_ids(tag_ids).await?;
        let missing: Vec<TagId> = tag_ids
            .iter()
            .copied()
            .filter(|id| !tags.iter().any(|t| t.id == *id))
            .collect();
        if !missing.is_empty() {
            return Err(ServiceError::UnknownTags(missing));
        }
        Ok(tags)
    }
}
