use super::person::{Person, PersonDetails};
use crate::modules::people::domain::value_objects::PersonRef;
use crate::modules::relations::{Edge, Entity, EntityRef, RelationKind, SingleEndpoint};
use crate::shared::domain::{LessonId, TeacherId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Teachers keep no collection of lessons; they only remember the lesson
/// they were most recently assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    id: TeacherId,
    pub details: PersonDetails,
    pub academic_title: Option<String>,
    pub hired_on: NaiveDate,
    #[serde(default)]
    pub(crate) latest_lesson: SingleEndpoint<LessonId>,
}

impl Teacher {
    pub fn new(details: PersonDetails, hired_on: NaiveDate) -> Self {
        Self {
            id: TeacherId::new(),
            details,
            academic_title: None,
            hired_on,
            latest_lesson: SingleEndpoint::new(),
        }
    }

    pub fn with_academic_title(mut self, title: String) -> Self {
        self.academic_title = Some(title);
        self
    }

    pub fn id(&self) -> TeacherId {
        self.id
    }

    pub fn latest_lesson(&self) -> Option<LessonId> {
        self.latest_lesson.get()
    }

    /// "dr Jan Kowalski" style name
    pub fn display_name(&self) -> String {
        match &self.academic_title {
            Some(title) => format!("{} {}", title, self.details.full_name()),
            None => self.details.full_name(),
        }
    }
}

impl Person for Teacher {
    fn details(&self) -> &PersonDetails {
        &self.details
    }

    fn details_mut(&mut self) -> &mut PersonDetails {
        &mut self.details
    }

    fn person_ref(&self) -> PersonRef {
        PersonRef::Teacher(self.id)
    }
}

impl Entity for Teacher {
    type Id = TeacherId;
    const KIND: &'static str = "teacher";

    fn id(&self) -> TeacherId {
        self.id
    }

    fn entity_ref(id: TeacherId) -> EntityRef {
        EntityRef::Person(PersonRef::Teacher(id))
    }

    fn edges(&self) -> Vec<Edge> {
        self.latest_lesson
            .get()
            .map(|lesson| {
                Edge::new(
                    RelationKind::LessonTeacher,
                    EntityRef::Lesson(lesson),
                    EntityRef::Person(PersonRef::Teacher(self.id)),
                )
            })
            .into_iter()
            .collect()
    }

    fn has_links(&self) -> bool {
        self.latest_lesson.is_set()
    }
}
