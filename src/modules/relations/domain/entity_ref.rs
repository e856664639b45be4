use crate::modules::people::domain::PersonRef;
use crate::shared::domain::{
    BuildingId, ClassRoomId, GroupId, LessonId, SemesterId, SpecializationId, StudyProgramId,
    SubjectId,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A typed pointer to any entity in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    Building(BuildingId),
    ClassRoom(ClassRoomId),
    Lesson(LessonId),
    Group(GroupId),
    Semester(SemesterId),
    Subject(SubjectId),
    Specialization(SpecializationId),
    StudyProgram(StudyProgramId),
    Person(PersonRef),
}

impl EntityRef {
    pub fn kind_name(&self) -> &'static str {
        match self {
            EntityRef::Building(_) => "building",
            EntityRef::ClassRoom(_) => "class_room",
            EntityRef::Lesson(_) => "lesson",
            EntityRef::Group(_) => "group",
            EntityRef::Semester(_) => "semester",
            EntityRef::Subject(_) => "subject",
            EntityRef::Specialization(_) => "specialization",
            EntityRef::StudyProgram(_) => "study_program",
            EntityRef::Person(person) => person.kind().name(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        match self {
            EntityRef::Building(id) => *id.as_uuid(),
            EntityRef::ClassRoom(id) => *id.as_uuid(),
            EntityRef::Lesson(id) => *id.as_uuid(),
            EntityRef::Group(id) => *id.as_uuid(),
            EntityRef::Semester(id) => *id.as_uuid(),
            EntityRef::Subject(id) => *id.as_uuid(),
            EntityRef::Specialization(id) => *id.as_uuid(),
            EntityRef::StudyProgram(id) => *id.as_uuid(),
            EntityRef::Person(person) => person.uuid(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind_name(), self.uuid())
    }
}
