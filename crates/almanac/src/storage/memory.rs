//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use almanac_core::calendar::{Event, EventId, NewEvent, Tag, TagId, UserId};
use almanac_core::storage::{EventStore, Result, StoreError, TagStore};

/// In-memory storage backend for tests and local development.
///
/// Rows live in HashMaps wrapped in `Arc<RwLock<_>>` so one store can be
/// shared across tasks. Nothing is persisted; dropping the store drops
/// the data. Event ids are handed out from an atomic counter starting
/// at 1.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    events: Arc<RwLock<HashMap<EventId, Event>>>,
    tags: Arc<RwLock<HashMap<TagId, Tag>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(HashMap::new())),
            tags: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Registers a tag so it can be resolved through [`TagStore`].
    pub async fn insert_tag(&self, tag: Tag) {
        let mut tags = self.tags.write().await;
        tags.insert(tag.id, tag);
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn find_all_for_user(&self, user_id: UserId) -> Result<Vec<Event>> {
        let events = self.events.read().await;
        let mut rows: Vec<Event> = events
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.start);
        Ok(rows)
    }

    async fn find_all(&self) -> Result<Vec<Event>> {
        let events = self.events.read().await;
        let mut rows: Vec<Event> = events.values().cloned().collect();
        rows.sort_by_key(|e| e.start);
        Ok(rows)
    }

    async fn create(&self, draft: NewEvent) -> Result<Event> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let event = draft.into_event(id);
        let mut events = self.events.write().await;
        events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn update(&self, event: &Event) -> Result<()> {
        let mut events = self.events.write().await;
        if !events.contains_key(&event.id) {
            return Err(StoreError::not_found("Event", event.id));
        }
        events.insert(event.id, event.clone());
        Ok(())
    }

    async fn delete(&self, id: EventId) -> Result<()> {
        let mut events = self.events.write().await;
        events.remove(&id);
        Ok(())
    }

    async fn delete_by_parent(&self, parent_id: EventId) -> Result<()> {
        let mut events = self.events.write().await;
        events.retain(|_, e| e.parent_id != Some(parent_id));
        Ok(())
    }
}

#[async_trait]
impl TagStore for InMemoryStore {
    async fn find_by_ids(&self, ids: &[TagId]) -> Result<Vec<Tag>> {
        let tags = self.tags.read().await;
        let mut found: Vec<Tag> = ids.iter().filter_map(|id| tags.get(id).cloned()).collect();
        found.sort_by_key(|t| t.id);
        found.dedup_by_key(|t| t.id);
        Ok(found)
    }
}
