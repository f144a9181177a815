//! Calendar event service.
//!
//! Glues the pure recurrence and identity logic from [`almanac_core`] to
//! a pluggable storage layer:
//!
//! - [`EventService`]: creation, range queries, scoped edits and deletes
//! - [`InMemoryStore`]: a storage backend for tests and local use
//! - [`ServiceError`]: the error surface callers match on

pub mod error;
pub mod service;
pub mod storage;

pub use error::{Result, ServiceError, service_error_to_status_code};
pub use service::EventService;
pub use storage::InMemoryStore;
