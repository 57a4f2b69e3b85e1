//! Persistence boundary for event instances.
//!
//! The hosted document database sits behind the [`store::InstanceStore`]
//! trait; [`memory::MemoryStore`] is the in-process implementation used by
//! services and tests.

pub mod error;
pub mod memory;
pub mod model;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use model::event::{EventInstance, EventInstancePatch, NewEventInstance};
pub use store::InstanceStore;
