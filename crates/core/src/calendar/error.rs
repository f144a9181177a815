use thiserror::Error;

/// Errors that can occur when validating event data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("End date and time must be after start date and time")]
    InvalidTimeRange,
}

/// Errors that can occur when constructing a query window.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("Window end must not precede its start")]
    InvalidRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_error_display() {
        assert_eq!(
            EventError::InvalidTimeRange.to_string(),
            "End date and time must be after start date and time"
        );
    }

    #[test]
    fn test_window_error_display() {
        assert_eq!(
            WindowError::InvalidRange.to_string(),
            "Window end must not precede its start"
        );
    }
}
