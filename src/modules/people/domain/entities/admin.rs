use super::person::{Person, PersonDetails};
use crate::modules::people::domain::value_objects::PersonRef;
use crate::modules::relations::{Edge, Entity, EntityRef, ManyEndpoint, RelationKind, SingleEndpoint};
use crate::shared::domain::AdminId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Admins form a supervision forest: an admin without a supervisor is a
/// superadmin, and every other admin hangs below exactly one supervisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    id: AdminId,
    pub details: PersonDetails,
    pub role_title: String,
    pub hired_on: NaiveDate,
    #[serde(default)]
    pub(crate) supervisor: SingleEndpoint<AdminId>,
    #[serde(default)]
    pub(crate) subordinates: ManyEndpoint<AdminId>,
}

impl Admin {
    pub fn new(details: PersonDetails, role_title: impl Into<String>, hired_on: NaiveDate) -> Self {
        Self {
            id: AdminId::new(),
            details,
            role_title: role_title.into(),
            hired_on,
            supervisor: SingleEndpoint::new(),
            subordinates: ManyEndpoint::new(),
        }
    }

    pub fn id(&self) -> AdminId {
        self.id
    }

    pub fn supervisor(&self) -> Option<AdminId> {
        self.supervisor.get()
    }

    pub fn subordinates(&self) -> Vec<AdminId> {
        self.subordinates.snapshot()
    }

    pub fn is_superadmin(&self) -> bool {
        !self.supervisor.is_set()
    }
}

impl Person for Admin {
    fn details(&self) -> &PersonDetails {
        &self.details
    }

    fn details_mut(&mut self) -> &mut PersonDetails {
        &mut self.details
    }

    fn person_ref(&self) -> PersonRef {
        PersonRef::Admin(self.id)
    }
}

impl Entity for Admin {
    type Id = AdminId;
    const KIND: &'static str = "admin";

    fn id(&self) -> AdminId {
        self.id
    }

    fn entity_ref(id: AdminId) -> EntityRef {
        EntityRef::Person(PersonRef::Admin(id))
    }

    fn edges(&self) -> Vec<Edge> {
        let me = EntityRef::Person(PersonRef::Admin(self.id));
        let supervisor = self.supervisor.get().map(|supervisor| {
            Edge::new(
                RelationKind::AdminSupervision,
                EntityRef::Person(PersonRef::Admin(supervisor)),
                me,
            )
        });
        let subordinates = self.subordinates.iter().map(|subordinate| {
            Edge::new(
                RelationKind::AdminSupervision,
                me,
                EntityRef::Person(PersonRef::Admin(*subordinate)),
            )
        });
        supervisor.into_iter().chain(subordinates).collect()
    }

    fn has_links(&self) -> bool {
        self.supervisor.is_set() || !self.subordinates.is_empty()
    }
}
