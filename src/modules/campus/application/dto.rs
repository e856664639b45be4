use crate::modules::academic::domain::{
    Building, ClassRoom, Group, Lesson, Semester, Specialization, StudyProgram, Subject,
};
use crate::modules::campus::domain::CampusGraph;
use crate::modules::people::domain::{Admin, FreeListener, Student, Teacher};
use crate::modules::relations::{EntityRef, RelationKind};
use serde::{Deserialize, Serialize};

/// Entity counts per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusSummary {
    pub buildings: usize,
    pub class_rooms: usize,
    pub lessons: usize,
    pub groups: usize,
    pub semesters: usize,
    pub subjects: usize,
    pub specializations: usize,
    pub study_programs: usize,
    pub students: usize,
    pub free_listeners: usize,
    pub teachers: usize,
    pub admins: usize,
}

impl CampusSummary {
    pub fn of(graph: &CampusGraph) -> Self {
        Self {
            buildings: graph.count::<Building>(),
            class_rooms: graph.count::<ClassRoom>(),
            lessons: graph.count::<Lesson>(),
            groups: graph.count::<Group>(),
            semesters: graph.count::<Semester>(),
            subjects: graph.count::<Subject>(),
            specializations: graph.count::<Specialization>(),
            study_programs: graph.count::<StudyProgram>(),
            students: graph.count::<Student>(),
            free_listeners: graph.count::<FreeListener>(),
            teachers: graph.count::<Teacher>(),
            admins: graph.count::<Admin>(),
        }
    }

    pub fn total(&self) -> usize {
        self.buildings
            + self.class_rooms
            + self.lessons
            + self.groups
            + self.semesters
            + self.subjects
            + self.specializations
            + self.study_programs
            + self.students
            + self.free_listeners
            + self.teachers
            + self.admins
    }
}

/// One link of an entity as seen from that entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkView {
    pub relation: RelationKind,
    pub counterpart: EntityRef,
}
