use crate::modules::academic::domain::value_objects::StudyLevel;
use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind};
use crate::shared::domain::{SpecializationId, StudyProgramId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProgram {
    id: StudyProgramId,
    pub name: String,
    pub level: StudyLevel,
    pub semester_count: u8,
    #[serde(default)]
    pub(crate) specializations: ManyEndpoint<SpecializationId>,
}

impl StudyProgram {
    pub fn new(name: impl Into<String>, level: StudyLevel) -> Self {
        Self {
            id: StudyProgramId::new(),
            name: name.into(),
            level,
            semester_count: level.typical_semesters(),
            specializations: ManyEndpoint::new(),
        }
    }

    pub fn with_semester_count(mut self, semester_count: u8) -> Self {
        self.semester_count = semester_count;
        self
    }

    pub fn id(&self) -> StudyProgramId {
        self.id
    }

    pub fn specializations(&self) -> Vec<SpecializationId> {
        self.specializations.snapshot()
    }
}

impl Entity for StudyProgram {
    type Id = StudyProgramId;
    const KIND: &'static str = "study_program";

    fn id(&self) -> StudyProgramId {
        self.id
    }

    fn entity_ref(id: StudyProgramId) -> EntityRef {
        EntityRef::StudyProgram(id)
    }

    fn edges(&self) -> Vec<Edge> {
        self.specializations
            .iter()
            .map(|specialization| {
                Edge::new(
                    RelationKind::SpecializationStudyPrograms,
                    EntityRef::Specialization(*specialization),
                    EntityRef::StudyProgram(self.id),
                )
            })
            .collect()
    }

    fn has_links(&self) -> bool {
        !self.specializations.is_empty()
    }
}
