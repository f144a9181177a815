//! Service-level errors and their HTTP status mapping.
//!
//! The status mapping follows the Functional Core pattern: a pure function
//! the REST layer can call without matching on error variants itself.

use almanac_core::calendar::{EventError, EventId, TagId};
use almanac_core::storage::StoreError;
use thiserror::Error;

/// Errors surfaced by the event service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The payload failed validation; nothing was read or written.
    #[error(transparent)]
    Validation(#[from] EventError),

    /// The target id matched neither a stored row nor an expandable
    /// occurrence of the acting user's series.
    #[error("Event not found: {0}")]
    NotFound(EventId),

    /// The resolved record belongs to a different user.
    #[error("Access denied: event {0} belongs to another user")]
    AccessDenied(EventId),

    /// One or more requested tag ids have no backing tag. Rejected before
    /// any event mutation is persisted.
    #[error("One or more tags not found: {0:?}")]
    UnknownTags(Vec<TagId>),

    /// A store operation failed underneath the service.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Maps a [`ServiceError`] to an HTTP status code.
///
/// - `Validation` -> 422 (Unprocessable Entity)
/// - `UnknownTags` -> 422 (Unprocessable Entity)
/// - `NotFound` -> 404 (Not Found)
/// - `AccessDenied` -> 403 (Forbidden)
/// - `Store(NotFound)` -> 404 (Not Found)
/// - other `Store` errors -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use almanac::error::{service_error_to_status_code, ServiceError};
///
/// assert_eq!(service_error_to_status_code(&ServiceError::NotFound(42)), 404);
/// ```
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::Validation(_) => 422,
        ServiceError::UnknownTags(_) => 422,
        ServiceError::NotFound(_) => 404,
        ServiceError::AccessDenied(_) => 403,
        ServiceError::Store(StoreError::NotFound { .. }) => 404,
        ServiceError::Store(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422() {
        let error = ServiceError::Validation(EventError::InvalidTimeRange);
        assert_eq!(service_error_to_status_code(&error), 422);
    }

    #[test]
    fn test_unknown_tags_maps_to_422() {
        let error = ServiceError::UnknownTags(vec![3, 9]);
        assert_eq!(service_error_to_status_code(&error), 422);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(service_error_to_status_code(&ServiceError::NotFound(42)), 404);
    }

    #[test]
    fn test_access_denied_maps_to_403() {
        assert_eq!(
            service_error_to_status_code(&ServiceError::AccessDenied(42)),
            403
        );
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let error = ServiceError::Store(StoreError::not_found("Event", 42));
        assert_eq!(service_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_other_store_errors_map_to_500() {
        let error = ServiceError::Store(StoreError::QueryFailed("boom".to_string()));
        assert_eq!(service_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_access_denied_display() {
        assert_eq!(
            ServiceError::AccessDenied(42).to_string(),
            "Access denied: event 42 belongs to another user"
        );
    }

    #[test]
    fn test_validation_display_is_transparent() {
        let error = ServiceError::Validation(EventError::InvalidTimeRange);
        assert_eq!(
            error.to_string(),
            "End date and time must be after start date and time"
        );
    }
}
