//! Relation operations addressed by `EntityRef` instead of typed ids.
//!
//! Used wherever the relation is only known at runtime: detaching an entity
//! before it is discarded, and the service's link/unlink entry points.
use super::CampusGraph;
use crate::modules::academic::domain::{
    Building, ClassRoom, Group, Lesson, Semester, Specialization, StudyProgram, Subject,
};
use crate::modules::people::domain::{Admin, FreeListener, PersonRef, Student, Teacher};
use crate::modules::relations::{EntityRef, RelationKind};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::log_debug;

fn mismatch(relation: RelationKind, left: &EntityRef, right: &EntityRef) -> AppError {
    AppError::ValidationError(format!(
        "{} does not connect {} and {}",
        relation.display_name(),
        left.kind_name(),
        right.kind_name()
    ))
}

impl CampusGraph {
    /// Link `left` and `right`, oriented as `relation` defines them
    pub fn link_refs(
        &mut self,
        relation: RelationKind,
        left: EntityRef,
        right: EntityRef,
    ) -> AppResult<bool> {
        use EntityRef as E;
        use PersonRef as P;
        use RelationKind as K;

        match (relation, left, right) {
            (K::BuildingClassRooms, E::Building(b), E::ClassRoom(c)) => self.add_class_room(b, c),
            (K::ClassRoomLessons, E::ClassRoom(c), E::Lesson(l)) => {
                self.add_class_room_lesson(c, l)
            }
            (K::LessonSubject, E::Lesson(l), E::Subject(s)) => self.set_lesson_subject(l, s),
            (K::LessonGroup, E::Lesson(l), E::Group(g)) => self.set_lesson_group(l, g),
            (K::LessonTeacher, E::Lesson(l), E::Person(P::Teacher(t))) => {
                self.set_lesson_teacher(l, t)
            }
            (K::LessonSemesters, E::Lesson(l), E::Semester(s)) => self.add_lesson_semester(l, s),
            (K::GroupStudents, E::Group(g), E::Person(P::Student(s))) => {
                self.add_group_student(g, s)
            }
            (K::GroupFreeListeners, E::Group(g), E::Person(P::FreeListener(f))) => {
                self.add_group_free_listener(g, f)
            }
            (K::SpecializationSubjects, E::Specialization(sp), E::Subject(s)) => {
                self.add_specialization_subject(sp, s)
            }
            (K::SpecializationStudyPrograms, E::Specialization(sp), E::StudyProgram(p)) => {
                self.add_specialization_study_program(sp, p)
            }
            (K::SpecializationStudents, E::Specialization(sp), E::Person(P::Student(s))) => {
                self.add_specialization_student(sp, s)
            }
            (K::AdminSupervision, E::Person(P::Admin(sup)), E::Person(P::Admin(sub))) => {
                self.add_admin_subordinate(sup, sub)
            }
            _ => Err(mismatch(relation, &left, &right)),
        }
    }

    /// Remove the link between `left` and `right`; a missing link is a no-op
    pub fn unlink_refs(
        &mut self,
        relation: RelationKind,
        left: EntityRef,
        right: EntityRef,
    ) -> AppResult<bool> {
        use EntityRef as E;
        use PersonRef as P;
        use RelationKind as K;

        match (relation, left, right) {
            (K::BuildingClassRooms, E::Building(b), E::ClassRoom(c)) => {
                self.remove_class_room(b, c)
            }
            (K::ClassRoomLessons, E::ClassRoom(c), E::Lesson(l)) => {
                self.remove_class_room_lesson(c, l)
            }
            (K::LessonSubject, E::Lesson(l), E::Subject(s)) => self.remove_lesson_subject(l, s),
            (K::LessonGroup, E::Lesson(l), E::Group(g)) => self.remove_lesson_group(l, g),
            (K::LessonTeacher, E::Lesson(l), E::Person(P::Teacher(t))) => {
                self.remove_lesson_teacher(l, t)
            }
            (K::LessonSemesters, E::Lesson(l), E::Semester(s)) => {
                self.remove_lesson_semester(l, s)
            }
            (K::GroupStudents, E::Group(g), E::Person(P::Student(s))) => {
                self.remove_group_student(g, s)
            }
            (K::GroupFreeListeners, E::Group(g), E::Person(P::FreeListener(f))) => {
                self.remove_group_free_listener(g, f)
            }
            (K::SpecializationSubjects, E::Specialization(sp), E::Subject(s)) => {
                self.remove_specialization_subject(sp, s)
            }
            (K::SpecializationStudyPrograms, E::Specialization(sp), E::StudyProgram(p)) => {
                self.remove_specialization_study_program(sp, p)
            }
            (K::SpecializationStudents, E::Specialization(sp), E::Person(P::Student(s))) => {
                self.remove_specialization_student(sp, s)
            }
            (K::AdminSupervision, E::Person(P::Admin(sup)), E::Person(P::Admin(sub))) => {
                self.remove_admin_subordinate(sup, sub)
            }
            _ => Err(mismatch(relation, &left, &right)),
        }
    }

    /// Entities directly linked to `entity`, in edge order
    pub fn neighbours(&self, entity: &EntityRef) -> AppResult<Vec<(RelationKind, EntityRef)>> {
        let edges = Validator::require_present(self.edges_of(entity), &entity.to_string())?;
        Ok(edges
            .iter()
            .map(|edge| (edge.relation, edge.counterpart_of(entity)))
            .collect())
    }

    /// Remove every link `entity` takes part in, returning how many were cut.
    ///
    /// Works over a snapshot of the entity's edges, so each removal runs the
    /// ordinary two-sided protocol. A teacher is also released from every
    /// lesson still pointing at it, not only the latest one.
    pub fn detach(&mut self, entity: EntityRef) -> AppResult<usize> {
        let edges = Validator::require_present(self.edges_of(&entity), &entity.to_string())?;
        let mut removed = 0;

        if let EntityRef::Person(PersonRef::Teacher(teacher)) = entity {
            for lesson in self.lessons_taught_by(&teacher) {
                if self.clear_lesson_teacher(lesson)? {
                    removed += 1;
                }
            }
        }

        for edge in edges {
            if self.unlink_refs(edge.relation, edge.left, edge.right)? {
                removed += 1;
            }
        }

        log_debug!("Detached {} from {} links", entity, removed);
        Ok(removed)
    }

    /// Detach `entity`, then drop it from the graph
    pub fn remove_entity(&mut self, entity: EntityRef) -> AppResult<usize> {
        let removed = self.detach(entity)?;
        self.discard_ref(entity)?;
        Ok(removed)
    }

    /// Kind-dispatched `discard`; fails if the entity still has links
    pub fn discard_ref(&mut self, entity: EntityRef) -> AppResult<()> {
        match entity {
            EntityRef::Building(id) => self.discard::<Building>(&id).map(drop),
            EntityRef::ClassRoom(id) => self.discard::<ClassRoom>(&id).map(drop),
            EntityRef::Lesson(id) => self.discard::<Lesson>(&id).map(drop),
            EntityRef::Group(id) => self.discard::<Group>(&id).map(drop),
            EntityRef::Semester(id) => self.discard::<Semester>(&id).map(drop),
            EntityRef::Subject(id) => self.discard::<Subject>(&id).map(drop),
            EntityRef::Specialization(id) => self.discard::<Specialization>(&id).map(drop),
            EntityRef::StudyProgram(id) => self.discard::<StudyProgram>(&id).map(drop),
            EntityRef::Person(PersonRef::Student(id)) => self.discard::<Student>(&id).map(drop),
            EntityRef::Person(PersonRef::FreeListener(id)) => {
                self.discard::<FreeListener>(&id).map(drop)
            }
            EntityRef::Person(PersonRef::Teacher(id)) => self.discard::<Teacher>(&id).map(drop),
            EntityRef::Person(PersonRef::Admin(id)) => self.discard::<Admin>(&id).map(drop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::academic::domain::LessonKind;
    use crate::modules::people::domain::PersonDetails;
    use chrono::{NaiveDate, NaiveTime, Weekday};

    fn monday_lecture() -> Lesson {
        Lesson::new(
            LessonKind::Lecture,
            Weekday::Mon,
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn link_refs_follows_relation_orientation() {
        let mut graph = CampusGraph::new();
        let group = graph.insert(Group::new("11c", 25)).unwrap();
        let lesson = graph.insert(monday_lecture()).unwrap();
        let (lesson_ref, group_ref) = (EntityRef::Lesson(lesson), EntityRef::Group(group));

        let linked = graph
            .link_refs(RelationKind::LessonGroup, lesson_ref, group_ref)
            .unwrap();
        assert!(linked);
        assert_eq!(graph.group(&group).unwrap().lessons(), vec![lesson]);

        let err = graph
            .link_refs(RelationKind::LessonGroup, group_ref, lesson_ref)
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn remove_entity_detaches_every_link() {
        let mut graph = CampusGraph::new();
        let group = graph.insert(Group::new("11c", 25)).unwrap();
        let lesson = graph.insert(monday_lecture()).unwrap();
        let math = graph.insert(Subject::new("MAT1", "Calculus", 6)).unwrap();
        let student = graph
            .insert(Student::new(
                PersonDetails::new(
                    "Ola",
                    "Nowak",
                    "ola@uni.edu",
                    "600100200",
                    NaiveDate::from_ymd_opt(2002, 5, 5).unwrap(),
                ),
                "s12345",
                NaiveDate::from_ymd_opt(2021, 10, 1).unwrap(),
            ))
            .unwrap();
        graph.set_lesson_group(lesson, group).unwrap();
        graph.set_lesson_subject(lesson, math).unwrap();
        graph.add_group_student(group, student).unwrap();

        let removed = graph.remove_entity(EntityRef::Group(group)).unwrap();

        assert_eq!(removed, 2);
        assert!(graph.group(&group).is_none());
        assert_eq!(graph.lesson(&lesson).unwrap().group(), None);
        assert_eq!(graph.lesson(&lesson).unwrap().subject(), Some(math));
        assert!(graph.student(&student).unwrap().groups().is_empty());
        assert!(graph.verify_integrity().is_empty());
    }

    #[test]
    fn detaching_a_teacher_releases_all_of_its_lessons() {
        let mut graph = CampusGraph::new();
        let first = graph.insert(monday_lecture()).unwrap();
        let second = graph.insert(monday_lecture()).unwrap();
        let teacher = graph
            .insert(Teacher::new(
                PersonDetails::new(
                    "Jan",
                    "Kowalski",
                    "jan@uni.edu",
                    "600100200",
                    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
                ),
                NaiveDate::from_ymd_opt(2000, 10, 1).unwrap(),
            ))
            .unwrap();
        graph.set_lesson_teacher(first, teacher).unwrap();
        graph.set_lesson_teacher(second, teacher).unwrap();

        graph.remove_entity(EntityRef::Person(PersonRef::Teacher(teacher))).unwrap();

        assert_eq!(graph.lesson(&first).unwrap().teacher(), None);
        assert_eq!(graph.lesson(&second).unwrap().teacher(), None);
        assert_eq!(graph.count::<Teacher>(), 0);
    }

    #[test]
    fn neighbours_lists_counterparts() {
        let mut graph = CampusGraph::new();
        let building = graph.insert(Building::new("A1", "Koszykowa 86")).unwrap();
        let room = graph.insert(ClassRoom::new("101", 30)).unwrap();
        graph.add_class_room(building, room).unwrap();

        let neighbours = graph.neighbours(&EntityRef::ClassRoom(room)).unwrap();
        assert_eq!(
            neighbours,
            vec![(RelationKind::BuildingClassRooms, EntityRef::Building(building))]
        );
        assert!(graph.neighbours(&EntityRef::Semester(Default::default())).is_err());
    }
}
