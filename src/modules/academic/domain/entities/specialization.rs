use crate::modules::people::domain::PersonRef;
use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind};
use crate::shared::domain::{SpecializationId, StudentId, StudyProgramId, SubjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialization {
    id: SpecializationId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub(crate) subjects: ManyEndpoint<SubjectId>,
    #[serde(default)]
    pub(crate) study_programs: ManyEndpoint<StudyProgramId>,
    #[serde(default)]
    pub(crate) students: ManyEndpoint<StudentId>,
}

impl Specialization {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SpecializationId::new(),
            name: name.into(),
            description: None,
            subjects: ManyEndpoint::new(),
            study_programs: ManyEndpoint::new(),
            students: ManyEndpoint::new(),
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn id(&self) -> SpecializationId {
        self.id
    }

    pub fn subjects(&self) -> Vec<SubjectId> {
        self.subjects.snapshot()
    }

    pub fn study_programs(&self) -> Vec<StudyProgramId> {
        self.study_programs.snapshot()
    }

    pub fn students(&self) -> Vec<StudentId> {
        self.students.snapshot()
    }
}

impl Entity for Specialization {
    type Id = SpecializationId;
    const KIND: &'static str = "specialization";

    fn id(&self) -> SpecializationId {
        self.id
    }

    fn entity_ref(id: SpecializationId) -> EntityRef {
        EntityRef::Specialization(id)
    }

    fn edges(&self) -> Vec<Edge> {
        let me = EntityRef::Specialization(self.id);
        let subjects = self
            .subjects
            .iter()
            .map(|subject| Edge::new(RelationKind::SpecializationSubjects, me, EntityRef::Subject(*subject)));
        let programs = self.study_programs.iter().map(|program| {
            Edge::new(
                RelationKind::SpecializationStudyPrograms,
                me,
                EntityRef::StudyProgram(*program),
            )
        });
        let students = self.students.iter().map(|student| {
            Edge::new(
                RelationKind::SpecializationStudents,
                me,
                EntityRef::Person(PersonRef::Student(*student)),
            )
        });
        subjects.chain(programs).chain(students).collect()
    }

    fn has_links(&self) -> bool {
        !self.subjects.is_empty() || !self.study_programs.is_empty() || !self.students.is_empty()
    }
}
