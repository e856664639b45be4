use super::person::{Person, PersonDetails};
use crate::modules::people::domain::value_objects::PersonRef;
use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind};
use crate::shared::domain::{FreeListenerId, GroupId};
use serde::{Deserialize, Serialize};

/// Attends group classes without being enrolled in a study program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeListener {
    id: FreeListenerId,
    pub details: PersonDetails,
    pub notes: Option<String>,
    #[serde(default)]
    pub(crate) groups: ManyEndpoint<GroupId>,
}

impl FreeListener {
    pub fn new(details: PersonDetails) -> Self {
        Self {
            id: FreeListenerId::new(),
            details,
            notes: None,
            groups: ManyEndpoint::new(),
        }
    }

    pub fn with_notes(mut self, notes: String) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn id(&self) -> FreeListenerId {
        self.id
    }

    pub fn groups(&self) -> Vec<GroupId> {
        self.groups.snapshot()
    }
}

impl Person for FreeListener {
    fn details(&self) -> &PersonDetails {
        &self.details
    }

    fn details_mut(&mut self) -> &mut PersonDetails {
        &mut self.details
    }

    fn person_ref(&self) -> PersonRef {
        PersonRef::FreeListener(self.id)
    }
}

impl Entity for FreeListener {
    type Id = FreeListenerId;
    const KIND: &'static str = "free_listener";

    fn id(&self) -> FreeListenerId {
        self.id
    }

    fn entity_ref(id: FreeListenerId) -> EntityRef {
        EntityRef::Person(PersonRef::FreeListener(id))
    }

    fn edges(&self) -> Vec<Edge> {
        let me = EntityRef::Person(PersonRef::FreeListener(self.id));
        self.groups
            .iter()
            .map(|group| Edge::new(RelationKind::GroupFreeListeners, EntityRef::Group(*group), me))
            .collect()
    }

    fn has_links(&self) -> bool {
        !self.groups.is_empty()
    }
}
