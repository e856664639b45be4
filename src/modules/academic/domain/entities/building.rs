use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind};
use crate::shared::domain::{BuildingId, ClassRoomId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    id: BuildingId,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub(crate) class_rooms: ManyEndpoint<ClassRoomId>,
}

impl Building {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: BuildingId::new(),
            name: name.into(),
            address: address.into(),
            class_rooms: ManyEndpoint::new(),
        }
    }

    pub fn id(&self) -> BuildingId {
        self.id
    }

    pub fn class_rooms(&self) -> Vec<ClassRoomId> {
        self.class_rooms.snapshot()
    }
}

impl Entity for Building {
    type Id = BuildingId;
    const KIND: &'static str = "building";

    fn id(&self) -> BuildingId {
        self.id
    }

    fn entity_ref(id: BuildingId) -> EntityRef {
        EntityRef::Building(id)
    }

    fn edges(&self) -> Vec<Edge> {
        self.class_rooms
            .iter()
            .map(|room| {
                Edge::new(
                    RelationKind::BuildingClassRooms,
                    EntityRef::Building(self.id),
                    EntityRef::ClassRoom(*room),
                )
            })
            .collect()
    }

    fn has_links(&self) -> bool {
        !self.class_rooms.is_empty()
    }
}
