//! Storage backends implementing the `almanac_core` contracts.

mod memory;

pub use memory::InMemoryStore;
