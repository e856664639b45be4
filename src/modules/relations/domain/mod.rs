pub mod edge;
pub mod endpoint;
pub mod entity_ref;
pub mod events;
pub mod relation_kind;

// Re-exports for easy access
pub use edge::Edge;
pub use endpoint::{ManyEndpoint, SingleEndpoint};
pub use entity_ref::EntityRef;
pub use events::{DomainEvent, RelationChange, RelationEvent};
pub use relation_kind::{Cardinality, RelationKind};
