use super::dto::{CampusSummary, LinkView};
use super::rules::RecordRules;
use crate::modules::academic::domain::{
    Building, ClassRoom, ClassRoomKind, Group, Lesson, LessonKind, Semester, Specialization,
    StudyLevel, StudyProgram, Subject,
};
use crate::modules::campus::domain::{CampusGraph, CampusRepository, EntityArena};
use crate::modules::people::domain::{
    Admin, FreeListener, Person, PersonDetails, PersonRef, Student, Teacher,
};
use crate::modules::relations::{DomainEvent, Entity, EntityRef, RelationKind};
use crate::shared::domain::{AdminId, ClassRoomId, GroupId, LessonId, TeacherId};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;
use crate::{log_debug, log_info, log_warn};
use chrono::{NaiveDate, NaiveTime, Weekday};
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::RwLock;

fn not_found(kind: &str, id: &dyn Display) -> AppError {
    AppError::NotFound(format!("{} with ID {} not found", kind, id))
}

fn ensure_email_free(
    graph: &CampusGraph,
    email: &str,
    owner: Option<PersonRef>,
) -> AppResult<()> {
    match graph.person_by_email(email) {
        Some(existing) if Some(existing) != owner => Err(AppError::AlreadyExists(format!(
            "Email '{}' is already used by {}",
            email, existing
        ))),
        _ => Ok(()),
    }
}

fn ensure_exists(graph: &CampusGraph, entity: &EntityRef) -> AppResult<()> {
    if graph.contains_ref(entity) {
        Ok(())
    } else {
        Err(not_found(entity.kind_name(), &entity.uuid()))
    }
}

/// Application service over the campus graph.
///
/// Every operation takes the graph lock once. Mutations run against the
/// in-memory graph, then the whole graph is persisted while the write lock is
/// still held; if the operation or the save fails the graph is rolled back.
pub struct CampusService {
    graph: Arc<RwLock<CampusGraph>>,
    repository: Arc<dyn CampusRepository>,
}

impl CampusService {
    pub fn new(graph: CampusGraph, repository: Arc<dyn CampusRepository>) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
            repository,
        }
    }

    /// Load the stored graph (or start empty) and verify it before use
    pub async fn open(repository: Arc<dyn CampusRepository>) -> AppResult<Self> {
        let graph = match repository.load().await? {
            Some(graph) => {
                graph.ensure_integrity()?;
                log_info!("Loaded campus graph with {} entities", graph.entity_count());
                graph
            }
            None => {
                log_info!("No stored campus graph, starting empty");
                CampusGraph::new()
            }
        };
        Ok(Self::new(graph, repository))
    }

    async fn mutate<R, F>(&self, operation: &str, apply: F) -> AppResult<R>
    where
        F: FnOnce(&mut CampusGraph) -> AppResult<R>,
    {
        let mut graph = self.graph.write().await;
        let backup = graph.clone();

        let value = match apply(&mut *graph) {
            Ok(value) => value,
            Err(e) => {
                *graph = backup;
                if e.is_caller_error() {
                    log_debug!("{} rejected: {}", operation, e);
                } else {
                    LogContext::error_with_context(&e, operation);
                }
                return Err(e);
            }
        };

        let events = graph.take_events();
        if let Err(e) = self.repository.save(&graph).await {
            *graph = backup;
            LogContext::error_with_context(&e, operation);
            return Err(e);
        }
        for event in &events {
            log_debug!(
                "{} {} {} {} -> {}",
                event.occurred_at().format("%H:%M:%S%.3f"),
                event.event_type(),
                event.relation,
                event.left,
                event.right
            );
        }
        log_debug!("{} applied {} relation change(s)", operation, events.len());
        Ok(value)
    }

    /// Copy of the current graph
    pub async fn snapshot(&self) -> CampusGraph {
        self.graph.read().await.clone()
    }

    pub async fn summary(&self) -> CampusSummary {
        CampusSummary::of(&*self.graph.read().await)
    }

    pub async fn get<E>(&self, id: &E::Id) -> AppResult<E>
    where
        E: Entity + Clone,
        CampusGraph: EntityArena<E>,
    {
        let graph = self.graph.read().await;
        graph
            .get::<E>(id)
            .cloned()
            .ok_or_else(|| not_found(E::KIND, id))
    }

    pub async fn list<E>(&self) -> Vec<E>
    where
        E: Entity + Clone,
        CampusGraph: EntityArena<E>,
    {
        let graph = self.graph.read().await;
        EntityArena::<E>::arena(&*graph).values().cloned().collect()
    }

    /// Links of `entity`, each with the entity on the other end
    pub async fn links(&self, entity: EntityRef) -> AppResult<Vec<LinkView>> {
        let graph = self.graph.read().await;
        ensure_exists(&graph, &entity)?;
        Ok(graph
            .neighbours(&entity)?
            .into_iter()
            .map(|(relation, counterpart)| LinkView {
                relation,
                counterpart,
            })
            .collect())
    }

    /// Edit scalar attributes; links and id cannot be changed this way.
    ///
    /// The edited record goes through the same rules as a new one and the
    /// edit is undone if it breaks any of them.
    pub async fn update<E, F>(&self, id: E::Id, edit: F) -> AppResult<E>
    where
        E: RecordRules + Clone,
        CampusGraph: EntityArena<E>,
        F: FnOnce(&mut E) -> AppResult<()>,
    {
        self.mutate("update", |graph| {
            if !graph.contains::<E>(&id) {
                return Err(not_found(E::KIND, &id));
            }
            graph.modify::<E, _, _>(&id, edit)?;
            let edited = graph
                .get::<E>(&id)
                .cloned()
                .ok_or_else(|| not_found(E::KIND, &id))?;
            edited.check(graph)?;
            Ok(edited)
        })
        .await
    }
}

// Creation
impl CampusService {
    /// Insert `entity` once its own fields and its place in the graph check out
    async fn create<E>(&self, entity: E) -> AppResult<E>
    where
        E: RecordRules + Clone,
        CampusGraph: EntityArena<E>,
    {
        entity.check_fields()?;
        let created = entity.clone();
        let id = self
            .mutate("create", |graph| {
                entity.check_against(graph)?;
                graph.insert(entity)
            })
            .await?;
        LogContext::entity_operation("created", E::KIND, &id.to_string());
        Ok(created)
    }

    pub async fn create_building(&self, name: &str, address: &str) -> AppResult<Building> {
        self.create(Building::new(name.trim(), address.trim())).await
    }

    pub async fn create_class_room(
        &self,
        number: &str,
        capacity: u32,
        kind: ClassRoomKind,
    ) -> AppResult<ClassRoom> {
        self.create(ClassRoom::new(number.trim(), capacity).with_kind(kind))
            .await
    }

    pub async fn create_lesson(
        &self,
        kind: LessonKind,
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<Lesson> {
        self.create(Lesson::new(kind, weekday, start, end)?).await
    }

    pub async fn create_group(&self, name: &str, capacity: u32) -> AppResult<Group> {
        self.create(Group::new(name.trim(), capacity)).await
    }

    pub async fn create_semester(
        &self,
        name: &str,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    ) -> AppResult<Semester> {
        self.create(Semester::new(name.trim(), starts_on, ends_on)?)
            .await
    }

    pub async fn create_subject(&self, code: &str, name: &str, ects: u8) -> AppResult<Subject> {
        self.create(Subject::new(code, name.trim(), ects)).await
    }

    pub async fn create_specialization(
        &self,
        name: &str,
        description: Option<String>,
    ) -> AppResult<Specialization> {
        let mut specialization = Specialization::new(name.trim());
        if let Some(description) = description {
            specialization = specialization.with_description(description);
        }
        self.create(specialization).await
    }

    /// `semester_count` defaults to the level's usual length
    pub async fn create_study_program(
        &self,
        name: &str,
        level: StudyLevel,
        semester_count: Option<u8>,
    ) -> AppResult<StudyProgram> {
        let semester_count = semester_count.unwrap_or_else(|| level.typical_semesters());
        let program = StudyProgram::new(name.trim(), level).with_semester_count(semester_count);
        self.create(program).await
    }

    pub async fn create_student(
        &self,
        details: PersonDetails,
        index_number: &str,
        enrolled_on: NaiveDate,
    ) -> AppResult<Student> {
        self.create(Student::new(details, index_number, enrolled_on))
            .await
    }

    pub async fn create_free_listener(
        &self,
        details: PersonDetails,
        notes: Option<String>,
    ) -> AppResult<FreeListener> {
        let mut listener = FreeListener::new(details);
        if let Some(notes) = notes {
            listener = listener.with_notes(notes);
        }
        self.create(listener).await
    }

    pub async fn create_teacher(
        &self,
        details: PersonDetails,
        academic_title: Option<String>,
        hired_on: NaiveDate,
    ) -> AppResult<Teacher> {
        let mut teacher = Teacher::new(details, hired_on);
        if let Some(title) = academic_title {
            teacher = teacher.with_academic_title(title);
        }
        self.create(teacher).await
    }

    pub async fn create_admin(
        &self,
        details: PersonDetails,
        role_title: &str,
        hired_on: NaiveDate,
    ) -> AppResult<Admin> {
        self.create(Admin::new(details, role_title.trim(), hired_on))
            .await
    }
}

// Updates with domain rules
impl CampusService {
    /// Replace the personal details of anyone, keeping emails unique
    pub async fn update_person_details(
        &self,
        person: PersonRef,
        details: PersonDetails,
    ) -> AppResult<()> {
        details.validate()?;
        self.mutate("update person", |graph| {
            ensure_exists(graph, &EntityRef::Person(person))?;
            ensure_email_free(graph, &details.email, Some(person))?;
            match person {
                PersonRef::Student(id) => graph.modify::<Student, _, _>(&id, |p| {
                    *p.details_mut() = details;
                    Ok(())
                }),
                PersonRef::FreeListener(id) => graph.modify::<FreeListener, _, _>(&id, |p| {
                    *p.details_mut() = details;
                    Ok(())
                }),
                PersonRef::Teacher(id) => graph.modify::<Teacher, _, _>(&id, |p| {
                    *p.details_mut() = details;
                    Ok(())
                }),
                PersonRef::Admin(id) => graph.modify::<Admin, _, _>(&id, |p| {
                    *p.details_mut() = details;
                    Ok(())
                }),
            }
        })
        .await
    }

    pub async fn reschedule_lesson(
        &self,
        lesson: LessonId,
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    ) -> AppResult<Lesson> {
        self.update::<Lesson, _>(lesson, |l| l.reschedule(weekday, start, end))
            .await
    }
}

// Links
impl CampusService {
    /// Link two entities. Unknown ids are `NotFound`; supervision links also
    /// go through the cycle check.
    pub async fn link(
        &self,
        relation: RelationKind,
        left: EntityRef,
        right: EntityRef,
    ) -> AppResult<bool> {
        if let (
            RelationKind::AdminSupervision,
            EntityRef::Person(PersonRef::Admin(supervisor)),
            EntityRef::Person(PersonRef::Admin(subordinate)),
        ) = (relation, left, right)
        {
            return self.assign_supervisor(subordinate, supervisor).await;
        }

        self.mutate("link", |graph| {
            ensure_exists(graph, &left)?;
            ensure_exists(graph, &right)?;
            match (left, right) {
                (EntityRef::ClassRoom(room), EntityRef::Lesson(lesson)) => {
                    warn_on_room_fit(graph, room, lesson)
                }
                (EntityRef::Group(group), EntityRef::Person(_)) => {
                    warn_on_full_group(graph, group)
                }
                _ => {}
            }
            graph.link_refs(relation, left, right)
        })
        .await
    }

    pub async fn unlink(
        &self,
        relation: RelationKind,
        left: EntityRef,
        right: EntityRef,
    ) -> AppResult<bool> {
        self.mutate("unlink", |graph| {
            ensure_exists(graph, &left)?;
            ensure_exists(graph, &right)?;
            graph.unlink_refs(relation, left, right)
        })
        .await
    }

    /// Every lesson currently assigned to `teacher`
    pub async fn teacher_lessons(&self, teacher: TeacherId) -> AppResult<Vec<Lesson>> {
        let graph = self.graph.read().await;
        if graph.teacher(&teacher).is_none() {
            return Err(not_found(Teacher::KIND, &teacher));
        }
        Ok(graph
            .lessons_taught_by(&teacher)
            .iter()
            .filter_map(|id| graph.lesson(id).cloned())
            .collect())
    }
}

/// Warn when a lesson is put in a room of the wrong kind or one that is
/// already taken at that time. Neither blocks the link.
fn warn_on_room_fit(graph: &CampusGraph, room: ClassRoomId, lesson: LessonId) {
    let (Some(room), Some(lesson)) = (graph.class_room(&room), graph.lesson(&lesson)) else {
        return;
    };
    if !room.kind.suits(lesson.kind()) {
        log_warn!(
            "{} lesson {} placed in {} room {}",
            lesson.kind().display_name(),
            lesson.id(),
            room.kind.display_name(),
            room.number
        );
    }
    let clashes = room
        .lessons()
        .iter()
        .filter_map(|other| graph.lesson(other))
        .filter(|other| other.id() != lesson.id() && other.overlaps(lesson))
        .count();
    if clashes > 0 {
        log_warn!(
            "Room {} already has {} overlapping lesson(s) at {:?} {}",
            room.number,
            clashes,
            lesson.weekday(),
            lesson.start()
        );
    }
}

fn warn_on_full_group(graph: &CampusGraph, group: GroupId) {
    if let Some(group) = graph.group(&group).filter(|g| g.is_full()) {
        log_warn!(
            "Group {} is already at capacity ({} attendees)",
            group.name,
            group.capacity
        );
    }
}

// Deletion
impl CampusService {
    /// Cut every link of `entity`, then remove it
    pub async fn delete(&self, entity: EntityRef) -> AppResult<()> {
        if let EntityRef::Person(PersonRef::Admin(admin)) = entity {
            return self.delete_admin(admin).await;
        }

        let removed = self
            .mutate("delete", |graph| {
                ensure_exists(graph, &entity)?;
                graph.remove_entity(entity)
            })
            .await?;
        LogContext::entity_operation("deleted", entity.kind_name(), &entity.uuid().to_string());
        log_debug!("{} link(s) cut while deleting {}", removed, entity);
        Ok(())
    }
}

// Admin supervision
impl CampusService {
    /// Make `supervisor` the supervisor of `subordinate`, replacing any
    /// previous one. Rejects self-supervision and cycles.
    pub async fn assign_supervisor(
        &self,
        subordinate: AdminId,
        supervisor: AdminId,
    ) -> AppResult<bool> {
        self.mutate("assign supervisor", |graph| {
            if graph.admin(&subordinate).is_none() {
                return Err(not_found(Admin::KIND, &subordinate));
            }
            if graph.admin(&supervisor).is_none() {
                return Err(not_found(Admin::KIND, &supervisor));
            }
            if graph.would_create_cycle(&subordinate, &supervisor)? {
                return Err(AppError::InvariantViolation(format!(
                    "admin {} cannot supervise admin {}: supervision would form a cycle",
                    supervisor, subordinate
                )));
            }
            graph.set_admin_supervisor(subordinate, supervisor)
        })
        .await
    }

    /// Turn `subordinate` into a superadmin
    pub async fn remove_supervisor(&self, subordinate: AdminId) -> AppResult<bool> {
        self.mutate("remove supervisor", |graph| {
            if graph.admin(&subordinate).is_none() {
                return Err(not_found(Admin::KIND, &subordinate));
            }
            graph.clear_admin_supervisor(subordinate)
        })
        .await
    }

    /// Remove `admin`, handing its subordinates to its own supervisor. When a
    /// superadmin is deleted its subordinates become superadmins.
    pub async fn delete_admin(&self, admin: AdminId) -> AppResult<()> {
        let moved = self
            .mutate("delete admin", |graph| {
                let (supervisor, subordinates) = match graph.admin(&admin) {
                    Some(a) => (a.supervisor(), a.subordinates()),
                    None => return Err(not_found(Admin::KIND, &admin)),
                };

                graph.remove_entity(EntityRef::Person(PersonRef::Admin(admin)))?;
                if let Some(supervisor) = supervisor {
                    for subordinate in &subordinates {
                        graph.set_admin_supervisor(*subordinate, supervisor)?;
                    }
                }
                Ok(subordinates.len())
            })
            .await?;
        LogContext::entity_operation("deleted", Admin::KIND, &admin.to_string());
        log_debug!("{} subordinate(s) of admin {} re-parented", moved, admin);
        Ok(())
    }

    pub async fn superadmins(&self) -> Vec<Admin> {
        let graph = self.graph.read().await;
        graph
            .superadmins()
            .iter()
            .filter_map(|id| graph.admin(id).cloned())
            .collect()
    }

    /// Supervisors of `admin`, nearest first
    pub async fn supervision_chain(&self, admin: AdminId) -> AppResult<Vec<Admin>> {
        let graph = self.graph.read().await;
        if graph.admin(&admin).is_none() {
            return Err(not_found(Admin::KIND, &admin));
        }
        Ok(graph
            .supervisors_of(&admin)?
            .iter()
            .filter_map(|id| graph.admin(id).cloned())
            .collect())
    }
}
