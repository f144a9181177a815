//! Storage traits the engine persists through.
//!
//! The engine never talks to a database directly; it drives these traits
//! and lets the embedding application decide what stands behind them. An
//! in-memory implementation ships with the service crate.

use async_trait::async_trait;

use crate::calendar::{Event, EventId, NewEvent, Tag, TagId, UserId};

use super::error::Result;

/// Persistence contract for event rows (masters, plain events, overrides).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Looks up a single row by id.
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>>;

    /// Every row owned by `user_id`, ordered by start ascending.
    async fn find_all_for_user(&self, user_id: UserId) -> Result<Vec<Event>>;

    /// Every stored row, for callers that must scan across users.
    async fn find_all(&self) -> Result<Vec<Event>>;

    /// Persists a new row and assigns its id.
    async fn create(&self, draft: NewEvent) -> Result<Event>;

    /// Overwrites an existing row. Fails with `NotFound` when the id has
    /// never been assigned.
    async fn update(&self, event: &Event) -> Result<()>;

    /// Removes a row. Removing an id that no longer exists is not an error.
    async fn delete(&self, id: EventId) -> Result<()>;

    /// Removes every override whose parent reference equals `parent_id`.
    async fn delete_by_parent(&self, parent_id: EventId) -> Result<()>;
}

/// Lookup contract for tags referenced by events.
///
/// Only consulted at edit time to validate tag ids; ids with no backing tag
/// are simply absent from the result, and the caller decides whether that
/// is an error.
#[async_trait]
pub trait TagStore: Send + Sync {
    async fn find_by_ids(&self, ids: &[TagId]) -> Result<Vec<Tag>>;
}
