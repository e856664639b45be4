use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind};
use crate::shared::domain::{LessonId, SpecializationId, SubjectId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    id: SubjectId,
    pub code: String,
    pub name: String,
    pub ects: u8,
    #[serde(default)]
    pub(crate) lessons: ManyEndpoint<LessonId>,
    #[serde(default)]
    pub(crate) specializations: ManyEndpoint<SpecializationId>,
}

impl Subject {
    pub fn new(code: impl Into<String>, name: impl Into<String>, ects: u8) -> Self {
        Self {
            id: SubjectId::new(),
            code: code.into(),
            name: name.into(),
            ects,
            lessons: ManyEndpoint::new(),
            specializations: ManyEndpoint::new(),
        }
    }

    pub fn id(&self) -> SubjectId {
        self.id
    }

    pub fn lessons(&self) -> Vec<LessonId> {
        self.lessons.snapshot()
    }

    pub fn specializations(&self) -> Vec<SpecializationId> {
        self.specializations.snapshot()
    }
}

impl Entity for Subject {
    type Id = SubjectId;
    const KIND: &'static str = "subject";

    fn id(&self) -> SubjectId {
        self.id
    }

    fn entity_ref(id: SubjectId) -> EntityRef {
        EntityRef::Subject(id)
    }

    fn edges(&self) -> Vec<Edge> {
        let me = EntityRef::Subject(self.id);
        let lessons = self
            .lessons
            .iter()
            .map(|lesson| Edge::new(RelationKind::LessonSubject, EntityRef::Lesson(*lesson), me));
        let specializations = self.specializations.iter().map(|specialization| {
            Edge::new(
                RelationKind::SpecializationSubjects,
                EntityRef::Specialization(*specialization),
                me,
            )
        });
        lessons.chain(specializations).collect()
    }

    fn has_links(&self) -> bool {
        !self.lessons.is_empty() || !self.specializations.is_empty()
    }
}
