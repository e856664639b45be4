use super::person::{Person, PersonDetails};
use crate::modules::people::domain::value_objects::PersonRef;
use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind};
use crate::shared::domain::{GroupId, SpecializationId, StudentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    id: StudentId,
    pub details: PersonDetails,
    pub index_number: String,
    pub enrolled_on: NaiveDate,
    #[serde(default)]
    pub(crate) groups: ManyEndpoint<GroupId>,
    #[serde(default)]
    pub(crate) specializations: ManyEndpoint<SpecializationId>,
}

impl Student {
    pub fn new(details: PersonDetails, index_number: impl Into<String>, enrolled_on: NaiveDate) -> Self {
        Self {
            id: StudentId::new(),
            details,
            index_number: index_number.into(),
            enrolled_on,
            groups: ManyEndpoint::new(),
            specializations: ManyEndpoint::new(),
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn groups(&self) -> Vec<GroupId> {
        self.groups.snapshot()
    }

    pub fn specializations(&self) -> Vec<SpecializationId> {
        self.specializations.snapshot()
    }
}

impl Person for Student {
    fn details(&self) -> &PersonDetails {
        &self.details
    }

    fn details_mut(&mut self) -> &mut PersonDetails {
        &mut self.details
    }

    fn person_ref(&self) -> PersonRef {
        PersonRef::Student(self.id)
    }
}

impl Entity for Student {
    type Id = StudentId;
    const KIND: &'static str = "student";

    fn id(&self) -> StudentId {
        self.id
    }

    fn entity_ref(id: StudentId) -> EntityRef {
        EntityRef::Person(PersonRef::Student(id))
    }

    fn edges(&self) -> Vec<Edge> {
        let me = EntityRef::Person(PersonRef::Student(self.id));
        let groups = self
            .groups
            .iter()
            .map(|group| Edge::new(RelationKind::GroupStudents, EntityRef::Group(*group), me));
        let specializations = self.specializations.iter().map(|specialization| {
            Edge::new(
                RelationKind::SpecializationStudents,
                EntityRef::Specialization(*specialization),
                me,
            )
        });
        groups.chain(specializations).collect()
    }

    fn has_links(&self) -> bool {
        !self.groups.is_empty() || !self.specializations.is_empty()
    }
}
