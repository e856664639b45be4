//! Bidirectional relation engine: endpoints, relation metadata, events and
//! the add/remove protocol every association in the graph goes through.
pub mod domain;
pub mod protocol;
pub mod store;

// Re-exports for easy external access
pub use domain::{
    Cardinality, DomainEvent, Edge, EntityRef, ManyEndpoint, RelationChange, RelationEvent,
    RelationKind, SingleEndpoint,
};
pub use protocol::{DirectedLink, ManyToMany, OneToMany};
pub use store::{Entity, EntityStore, RelationJournal};
