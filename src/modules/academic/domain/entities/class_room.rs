use crate::modules::academic::domain::value_objects::ClassRoomKind;
use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind, SingleEndpoint};
use crate::shared::domain::{BuildingId, ClassRoomId, LessonId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRoom {
    id: ClassRoomId,
    pub number: String,
    pub capacity: u32,
    pub kind: ClassRoomKind,
    #[serde(default)]
    pub(crate) building: SingleEndpoint<BuildingId>,
    #[serde(default)]
    pub(crate) lessons: ManyEndpoint<LessonId>,
}

impl ClassRoom {
    pub fn new(number: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: ClassRoomId::new(),
            number: number.into(),
            capacity,
            kind: ClassRoomKind::default(),
            building: SingleEndpoint::new(),
            lessons: ManyEndpoint::new(),
        }
    }

    pub fn with_kind(mut self, kind: ClassRoomKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn id(&self) -> ClassRoomId {
        self.id
    }

    pub fn building(&self) -> Option<BuildingId> {
        self.building.get()
    }

    pub fn lessons(&self) -> Vec<LessonId> {
        self.lessons.snapshot()
    }
}

impl Entity for ClassRoom {
    type Id = ClassRoomId;
    const KIND: &'static str = "class_room";

    fn id(&self) -> ClassRoomId {
        self.id
    }

    fn entity_ref(id: ClassRoomId) -> EntityRef {
        EntityRef::ClassRoom(id)
    }

    fn edges(&self) -> Vec<Edge> {
        let me = EntityRef::ClassRoom(self.id);
        let mut edges: Vec<Edge> = self
            .building
            .get()
            .map(|building| Edge::new(RelationKind::BuildingClassRooms, EntityRef::Building(building), me))
            .into_iter()
            .collect();
        edges.extend(
            self.lessons
                .iter()
                .map(|lesson| Edge::new(RelationKind::ClassRoomLessons, me, EntityRef::Lesson(*lesson))),
        );
        edges
    }

    fn has_links(&self) -> bool {
        self.building.is_set() || !self.lessons.is_empty()
    }
}
