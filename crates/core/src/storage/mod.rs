//! Storage abstraction consumed by the service layer.

mod error;
mod traits;

pub use error::{Result, StoreError};
pub use traits::{EventStore, TagStore};
