use super::{EntityRef, RelationKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One oriented link as seen from an entity: `left` and `right` follow the
/// orientation of `relation`, whichever side the entity itself is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub relation: RelationKind,
    pub left: EntityRef,
    pub right: EntityRef,
}

impl Edge {
    pub fn new(relation: RelationKind, left: EntityRef, right: EntityRef) -> Self {
        Self {
            relation,
            left,
            right,
        }
    }

    /// The end of the edge that is not `entity`
    pub fn counterpart_of(&self, entity: &EntityRef) -> EntityRef {
        if &self.left == entity {
            self.right
        } else {
            self.left
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} -> {}]", self.relation, self.left, self.right)
    }
}
