//! Calendar domain: events, recurrence rules, occurrence expansion and
//! occurrence identity.
//!
//! Everything here is pure computation over the arguments passed in; store
//! access lives behind the traits in [`crate::storage`].

mod error;
mod exclusions;
mod expand;
mod identity;
mod requests;
mod rule;
mod time;
mod types;
mod window;

pub use error::{EventError, WindowError};
pub use exclusions::ExclusionSet;
pub use expand::{MAX_EXPANSION_STEPS, expand, expand_event};
pub use identity::{
    RESOLVE_HORIZON_MONTHS, ResolvedOccurrence, occurrence_id, resolve_occurrence,
};
pub use requests::{EditScope, EventPayload, ParseEditScopeError};
pub use rule::{Frequency, RecurrenceRule};
pub use time::{format_canonical, parse_canonical};
pub use types::{Event, EventId, NewEvent, Occurrence, Tag, TagId, UserId};
pub use window::QueryWindow;
