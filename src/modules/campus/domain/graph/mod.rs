//! The in-memory campus graph.
//!
//! `CampusGraph` owns every entity in one id-keyed map per kind and is the
//! only store the relation protocol runs against. Entities are inserted with
//! empty endpoints, linked through the operations in `wiring`, detached
//! through `dispatch` and only then discarded.
mod dispatch;
mod integrity;
mod supervision;
mod wiring;

pub use integrity::IntegrityViolation;

use crate::modules::academic::domain::{
    Building, ClassRoom, Group, Lesson, Semester, Specialization, StudyProgram, Subject,
};
use crate::modules::people::domain::{
    Admin, FreeListener, Person, PersonDetails, PersonRef, Student, Teacher,
};
use crate::modules::relations::{
    Edge, Entity, EntityRef, EntityStore, RelationEvent, RelationJournal,
};
use crate::shared::domain::{
    AdminId, BuildingId, ClassRoomId, FreeListenerId, GroupId, LessonId, SemesterId,
    SpecializationId, StudentId, StudyProgramId, SubjectId, TeacherId,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusGraph {
    #[serde(default)]
    buildings: BTreeMap<BuildingId, Building>,
    #[serde(default)]
    class_rooms: BTreeMap<ClassRoomId, ClassRoom>,
    #[serde(default)]
    lessons: BTreeMap<LessonId, Lesson>,
    #[serde(default)]
    groups: BTreeMap<GroupId, Group>,
    #[serde(default)]
    semesters: BTreeMap<SemesterId, Semester>,
    #[serde(default)]
    subjects: BTreeMap<SubjectId, Subject>,
    #[serde(default)]
    specializations: BTreeMap<SpecializationId, Specialization>,
    #[serde(default)]
    study_programs: BTreeMap<StudyProgramId, StudyProgram>,
    #[serde(default)]
    students: BTreeMap<StudentId, Student>,
    #[serde(default)]
    free_listeners: BTreeMap<FreeListenerId, FreeListener>,
    #[serde(default)]
    teachers: BTreeMap<TeacherId, Teacher>,
    #[serde(default)]
    admins: BTreeMap<AdminId, Admin>,
    /// Relation changes not yet drained by the caller
    #[serde(skip)]
    pending_events: Vec<RelationEvent>,
}

/// Typed access to the map holding one entity kind
pub trait EntityArena<E: Entity> {
    fn arena(&self) -> &BTreeMap<E::Id, E>;

    fn arena_mut(&mut self) -> &mut BTreeMap<E::Id, E>;
}

impl<E: Entity> EntityStore<E> for CampusGraph
where
    CampusGraph: EntityArena<E>,
{
    fn entity(&self, id: &E::Id) -> Option<&E> {
        EntityArena::<E>::arena(self).get(id)
    }

    fn entity_mut(&mut self, id: &E::Id) -> Option<&mut E> {
        EntityArena::<E>::arena_mut(self).get_mut(id)
    }
}

macro_rules! arena {
    ($entity:ty, $id:ty, $field:ident, $one:ident) => {
        impl EntityArena<$entity> for CampusGraph {
            fn arena(&self) -> &BTreeMap<$id, $entity> {
                &self.$field
            }

            fn arena_mut(&mut self) -> &mut BTreeMap<$id, $entity> {
                &mut self.$field
            }
        }

        impl CampusGraph {
            pub fn $one(&self, id: &$id) -> Option<&$entity> {
                self.$field.get(id)
            }

            pub fn $field(&self) -> impl Iterator<Item = &$entity> + '_ {
                self.$field.values()
            }
        }
    };
}

arena!(Building, BuildingId, buildings, building);
arena!(ClassRoom, ClassRoomId, class_rooms, class_room);
arena!(Lesson, LessonId, lessons, lesson);
arena!(Group, GroupId, groups, group);
arena!(Semester, SemesterId, semesters, semester);
arena!(Subject, SubjectId, subjects, subject);
arena!(Specialization, SpecializationId, specializations, specialization);
arena!(StudyProgram, StudyProgramId, study_programs, study_program);
arena!(Student, StudentId, students, student);
arena!(FreeListener, FreeListenerId, free_listeners, free_listener);
arena!(Teacher, TeacherId, teachers, teacher);
arena!(Admin, AdminId, admins, admin);

impl RelationJournal for CampusGraph {
    fn record(&mut self, event: RelationEvent) {
        LogContext::relation_change(
            event.relation.name(),
            event.change.as_str(),
            &event.left.to_string(),
            &event.right.to_string(),
        );
        self.pending_events.push(event);
    }
}

impl CampusGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly built entity. Entities enter the graph unlinked.
    pub fn insert<E>(&mut self, entity: E) -> AppResult<E::Id>
    where
        E: Entity,
        Self: EntityArena<E>,
    {
        let id = entity.id();
        if EntityArena::<E>::arena(self).contains_key(&id) {
            return Err(AppError::AlreadyExists(format!("{} {}", E::KIND, id)));
        }
        if entity.has_links() {
            return Err(AppError::InvariantViolation(format!(
                "{} {} must be inserted without links",
                E::KIND,
                id
            )));
        }
        EntityArena::<E>::arena_mut(self).insert(id, entity);
        Ok(id)
    }

    pub fn get<E>(&self, id: &E::Id) -> Option<&E>
    where
        E: Entity,
        Self: EntityArena<E>,
    {
        EntityArena::<E>::arena(self).get(id)
    }

    pub fn contains<E>(&self, id: &E::Id) -> bool
    where
        E: Entity,
        Self: EntityArena<E>,
    {
        EntityArena::<E>::arena(self).contains_key(id)
    }

    pub fn count<E>(&self) -> usize
    where
        E: Entity,
        Self: EntityArena<E>,
    {
        EntityArena::<E>::arena(self).len()
    }

    /// Drop an entity that no longer holds any link
    pub fn discard<E>(&mut self, id: &E::Id) -> AppResult<E>
    where
        E: Entity,
        Self: EntityArena<E>,
    {
        let what = format!("{} {}", E::KIND, id);
        let entity = Validator::require_present(EntityArena::<E>::arena(self).get(id), &what)?;
        if entity.has_links() {
            return Err(AppError::InvariantViolation(format!(
                "{} still has links and cannot be discarded",
                what
            )));
        }
        Validator::require_present(EntityArena::<E>::arena_mut(self).remove(id), &what)
    }

    /// Edit the scalar attributes of an entity in place.
    ///
    /// The closure must leave the id and every link untouched; if it fails or
    /// changes either, the entity is restored and an error returned.
    pub fn modify<E, F, R>(&mut self, id: &E::Id, edit: F) -> AppResult<R>
    where
        E: Entity + Clone,
        Self: EntityArena<E>,
        F: FnOnce(&mut E) -> AppResult<R>,
    {
        let what = format!("{} {}", E::KIND, id);
        let slot = EntityArena::<E>::arena_mut(self).get_mut(id);
        let entity = Validator::require_present(slot, &what)?;
        let backup = entity.clone();

        let outcome = edit(&mut *entity);
        let tampered = entity.id() != backup.id() || entity.edges() != backup.edges();
        if outcome.is_err() || tampered {
            *entity = backup;
        }
        if tampered {
            return Err(AppError::InvariantViolation(format!(
                "editing {} must not change its id or links",
                what
            )));
        }
        outcome
    }

    /// Whether `entity` resolves to a live entity of its kind
    pub fn contains_ref(&self, entity: &EntityRef) -> bool {
        match entity {
            EntityRef::Building(id) => self.buildings.contains_key(id),
            EntityRef::ClassRoom(id) => self.class_rooms.contains_key(id),
            EntityRef::Lesson(id) => self.lessons.contains_key(id),
            EntityRef::Group(id) => self.groups.contains_key(id),
            EntityRef::Semester(id) => self.semesters.contains_key(id),
            EntityRef::Subject(id) => self.subjects.contains_key(id),
            EntityRef::Specialization(id) => self.specializations.contains_key(id),
            EntityRef::StudyProgram(id) => self.study_programs.contains_key(id),
            EntityRef::Person(PersonRef::Student(id)) => self.students.contains_key(id),
            EntityRef::Person(PersonRef::FreeListener(id)) => self.free_listeners.contains_key(id),
            EntityRef::Person(PersonRef::Teacher(id)) => self.teachers.contains_key(id),
            EntityRef::Person(PersonRef::Admin(id)) => self.admins.contains_key(id),
        }
    }

    /// Links currently held by `entity`, `None` when it does not exist
    pub fn edges_of(&self, entity: &EntityRef) -> Option<Vec<Edge>> {
        match entity {
            EntityRef::Building(id) => self.buildings.get(id).map(Entity::edges),
            EntityRef::ClassRoom(id) => self.class_rooms.get(id).map(Entity::edges),
            EntityRef::Lesson(id) => self.lessons.get(id).map(Entity::edges),
            EntityRef::Group(id) => self.groups.get(id).map(Entity::edges),
            EntityRef::Semester(id) => self.semesters.get(id).map(Entity::edges),
            EntityRef::Subject(id) => self.subjects.get(id).map(Entity::edges),
            EntityRef::Specialization(id) => self.specializations.get(id).map(Entity::edges),
            EntityRef::StudyProgram(id) => self.study_programs.get(id).map(Entity::edges),
            EntityRef::Person(PersonRef::Student(id)) => self.students.get(id).map(Entity::edges),
            EntityRef::Person(PersonRef::FreeListener(id)) => {
                self.free_listeners.get(id).map(Entity::edges)
            }
            EntityRef::Person(PersonRef::Teacher(id)) => self.teachers.get(id).map(Entity::edges),
            EntityRef::Person(PersonRef::Admin(id)) => self.admins.get(id).map(Entity::edges),
        }
    }

    /// Every entity in the graph paired with its links
    pub fn all_edges(&self) -> Vec<(EntityRef, Vec<Edge>)> {
        fn collect<E: Entity>(map: &BTreeMap<E::Id, E>, out: &mut Vec<(EntityRef, Vec<Edge>)>) {
            out.extend(map.values().map(|e| (E::entity_ref(e.id()), e.edges())));
        }

        let mut out = Vec::with_capacity(self.entity_count());
        collect(&self.buildings, &mut out);
        collect(&self.class_rooms, &mut out);
        collect(&self.lessons, &mut out);
        collect(&self.groups, &mut out);
        collect(&self.semesters, &mut out);
        collect(&self.subjects, &mut out);
        collect(&self.specializations, &mut out);
        collect(&self.study_programs, &mut out);
        collect(&self.students, &mut out);
        collect(&self.free_listeners, &mut out);
        collect(&self.teachers, &mut out);
        collect(&self.admins, &mut out);
        out
    }

    pub fn entity_count(&self) -> usize {
        self.buildings.len()
            + self.class_rooms.len()
            + self.lessons.len()
            + self.groups.len()
            + self.semesters.len()
            + self.subjects.len()
            + self.specializations.len()
            + self.study_programs.len()
            + self.students.len()
            + self.free_listeners.len()
            + self.teachers.len()
            + self.admins.len()
    }

    pub fn person_details(&self, person: &PersonRef) -> Option<&PersonDetails> {
        match person {
            PersonRef::Student(id) => self.students.get(id).map(Person::details),
            PersonRef::FreeListener(id) => self.free_listeners.get(id).map(Person::details),
            PersonRef::Teacher(id) => self.teachers.get(id).map(Person::details),
            PersonRef::Admin(id) => self.admins.get(id).map(Person::details),
        }
    }

    /// Every person of any kind, as tagged references
    pub fn people(&self) -> Vec<PersonRef> {
        let students = self.students.values().map(Person::person_ref);
        let listeners = self.free_listeners.values().map(Person::person_ref);
        let teachers = self.teachers.values().map(Person::person_ref);
        let admins = self.admins.values().map(Person::person_ref);
        students.chain(listeners).chain(teachers).chain(admins).collect()
    }

    /// Case-insensitive lookup across all person kinds
    pub fn person_by_email(&self, email: &str) -> Option<PersonRef> {
        self.people().into_iter().find(|person| {
            self.person_details(person)
                .map(|details| details.email.eq_ignore_ascii_case(email))
                .unwrap_or(false)
        })
    }

    /// Lessons whose teacher is `teacher`; there is no stored back-collection
    pub fn lessons_taught_by(&self, teacher: &TeacherId) -> Vec<LessonId> {
        self.lessons
            .values()
            .filter(|lesson| lesson.teacher.is(teacher))
            .map(|lesson| lesson.id())
            .collect()
    }

    pub fn pending_events(&self) -> &[RelationEvent] {
        &self.pending_events
    }

    /// Drain the relation events recorded since the last call
    pub fn take_events(&mut self) -> Vec<RelationEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn clear_events(&mut self) {
        self.pending_events.clear();
    }
}
