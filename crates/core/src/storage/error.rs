use thiserror::Error;

/// Errors that can occur during store operations.
///
/// `NotFound` is the only variant the engine itself produces through the
/// in-memory store; the connection and query variants exist for external
/// backend implementations of the same traits.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Storage connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Storage query failed: {0}")]
    QueryFailed(String),
}

impl StoreError {
    /// Convenience constructor for the common not-found case.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
