//! Application services built on top of the storage contract.

mod events;

pub use events::EventService;
