/// Domain events for relation changes
///
/// Every real mutation of an association produces exactly one event, so the
/// event log doubles as an audit of how many links an operation touched.
/// No-op adds and removes produce nothing.
use super::{EntityRef, RelationKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Base trait for all domain events
pub trait DomainEvent: Send + Sync {
    /// When the event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Unique identifier for this event
    fn event_id(&self) -> Uuid;

    /// Type of event (for serialization/routing)
    fn event_type(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationChange {
    Linked,
    Unlinked,
}

impl RelationChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationChange::Linked => "linked",
            RelationChange::Unlinked => "unlinked",
        }
    }
}

/// A pair of entities was linked or unlinked (both endpoints updated)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationEvent {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub relation: RelationKind,
    pub change: RelationChange,
    pub left: EntityRef,
    pub right: EntityRef,
}

impl RelationEvent {
    pub fn new(
        relation: RelationKind,
        change: RelationChange,
        left: EntityRef,
        right: EntityRef,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            relation,
            change,
            left,
            right,
        }
    }
}

impl DomainEvent for RelationEvent {
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn event_id(&self) -> Uuid {
        self.event_id
    }

    fn event_type(&self) -> &'static str {
        match self.change {
            RelationChange::Linked => "RelationLinked",
            RelationChange::Unlinked => "RelationUnlinked",
        }
    }
}
