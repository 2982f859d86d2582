//! Core store abstractions: entities, the collection store, the change
//! notification registry, and the typed repository boundary

pub mod entity;
pub mod events;
pub mod repository;
pub mod store;

pub use entity::{Entity, FieldMap, RESERVED_FIELDS};
pub use events::{ChangeNotifier, Subscription};
pub use repository::{Filter, LocalRepository, Record, Repository, Stored};
pub use store::EntityStore;
