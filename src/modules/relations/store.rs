use super::domain::{Edge, EntityRef, RelationEvent};
use std::fmt;

/// Anything the graph stores and links by id
pub trait Entity {
    type Id: Copy + Eq + Ord + fmt::Debug + fmt::Display;

    /// Short snake_case name used in messages and logs
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    fn entity_ref(id: Self::Id) -> EntityRef;

    /// Every link the entity currently holds, oriented per relation
    fn edges(&self) -> Vec<Edge>;

    /// True while any relation endpoint of the entity is non-empty
    fn has_links(&self) -> bool {
        !self.edges().is_empty()
    }
}

/// Id-keyed access to the entities of one kind.
///
/// A single graph implements this once per entity kind, which is what lets the
/// relation protocol reach both sides of a pair through one `&mut` borrow.
pub trait EntityStore<E: Entity> {
    fn entity(&self, id: &E::Id) -> Option<&E>;

    fn entity_mut(&mut self, id: &E::Id) -> Option<&mut E>;
}

/// Sink for the events produced by link/unlink operations
pub trait RelationJournal {
    fn record(&mut self, event: RelationEvent);
}
