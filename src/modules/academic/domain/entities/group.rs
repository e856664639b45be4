use crate::modules::people::domain::PersonRef;
use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind};
use crate::shared::domain::{FreeListenerId, GroupId, LessonId, StudentId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    id: GroupId,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub(crate) students: ManyEndpoint<StudentId>,
    #[serde(default)]
    pub(crate) free_listeners: ManyEndpoint<FreeListenerId>,
    #[serde(default)]
    pub(crate) lessons: ManyEndpoint<LessonId>,
}

impl Group {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            capacity,
            students: ManyEndpoint::new(),
            free_listeners: ManyEndpoint::new(),
            lessons: ManyEndpoint::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn students(&self) -> Vec<StudentId> {
        self.students.snapshot()
    }

    pub fn free_listeners(&self) -> Vec<FreeListenerId> {
        self.free_listeners.snapshot()
    }

    pub fn lessons(&self) -> Vec<LessonId> {
        self.lessons.snapshot()
    }

    /// Students and free listeners together
    pub fn attendee_count(&self) -> usize {
        self.students.len() + self.free_listeners.len()
    }

    pub fn is_full(&self) -> bool {
        self.attendee_count() >= self.capacity as usize
    }
}

impl Entity for Group {
    type Id = GroupId;
    const KIND: &'static str = "group";

    fn id(&self) -> GroupId {
        self.id
    }

    fn entity_ref(id: GroupId) -> EntityRef {
        EntityRef::Group(id)
    }

    fn edges(&self) -> Vec<Edge> {
        let me = EntityRef::Group(self.id);
        let students = self.students.iter().map(|student| {
            Edge::new(RelationKind::GroupStudents, me, EntityRef::Person(PersonRef::Student(*student)))
        });
        let free_listeners = self.free_listeners.iter().map(|listener| {
            Edge::new(
                RelationKind::GroupFreeListeners,
                me,
                EntityRef::Person(PersonRef::FreeListener(*listener)),
            )
        });
        let lessons = self
            .lessons
            .iter()
            .map(|lesson| Edge::new(RelationKind::LessonGroup, EntityRef::Lesson(*lesson), me));
        students.chain(free_listeners).chain(lessons).collect()
    }

    fn has_links(&self) -> bool {
        !self.students.is_empty() || !self.free_listeners.is_empty() || !self.lessons.is_empty()
    }
}
