//! Every association of the campus graph, wired once to the shared protocol.
//!
//! Each relation is a constant naming its two endpoints. The methods below
//! expose both sides of every pair so a link can be made from whichever end
//! the caller holds; both ends go through the same constant and therefore
//! the same two-step update.
use super::CampusGraph;
use crate::modules::academic::domain::{
    Building, ClassRoom, Group, Lesson, Semester, Specialization, StudyProgram, Subject,
};
use crate::modules::people::domain::{Admin, FreeListener, Student, Teacher};
use crate::modules::relations::{DirectedLink, ManyToMany, OneToMany, RelationKind};
use crate::shared::domain::{
    AdminId, BuildingId, ClassRoomId, FreeListenerId, GroupId, LessonId, SemesterId,
    SpecializationId, StudentId, StudyProgramId, SubjectId, TeacherId,
};
use crate::shared::errors::AppResult;

pub(super) const BUILDING_CLASS_ROOMS: OneToMany<Building, ClassRoom> = OneToMany {
    relation: RelationKind::BuildingClassRooms,
    owner_is_left: true,
    owner: |building| &mut building.class_rooms,
    dependent: |room| &mut room.building,
};

pub(super) const CLASS_ROOM_LESSONS: ManyToMany<ClassRoom, Lesson> = ManyToMany {
    relation: RelationKind::ClassRoomLessons,
    left: |room| &mut room.lessons,
    right: |lesson| &mut lesson.class_rooms,
};

pub(super) const LESSON_SUBJECT: OneToMany<Subject, Lesson> = OneToMany {
    relation: RelationKind::LessonSubject,
    owner_is_left: false,
    owner: |subject| &mut subject.lessons,
    dependent: |lesson| &mut lesson.subject,
};

pub(super) const LESSON_GROUP: OneToMany<Group, Lesson> = OneToMany {
    relation: RelationKind::LessonGroup,
    owner_is_left: false,
    owner: |group| &mut group.lessons,
    dependent: |lesson| &mut lesson.group,
};

pub(super) const LESSON_TEACHER: DirectedLink<Lesson, Teacher> = DirectedLink {
    relation: RelationKind::LessonTeacher,
    forward: |lesson| &mut lesson.teacher,
    latest: |teacher| &mut teacher.latest_lesson,
};

pub(super) const LESSON_SEMESTERS: ManyToMany<Lesson, Semester> = ManyToMany {
    relation: RelationKind::LessonSemesters,
    left: |lesson| &mut lesson.semesters,
    right: |semester| &mut semester.lessons,
};

pub(super) const GROUP_STUDENTS: ManyToMany<Group, Student> = ManyToMany {
    relation: RelationKind::GroupStudents,
    left: |group| &mut group.students,
    right: |student| &mut student.groups,
};

pub(super) const GROUP_FREE_LISTENERS: ManyToMany<Group, FreeListener> = ManyToMany {
    relation: RelationKind::GroupFreeListeners,
    left: |group| &mut group.free_listeners,
    right: |listener| &mut listener.groups,
};

pub(super) const SPECIALIZATION_SUBJECTS: ManyToMany<Specialization, Subject> = ManyToMany {
    relation: RelationKind::SpecializationSubjects,
    left: |specialization| &mut specialization.subjects,
    right: |subject| &mut subject.specializations,
};

pub(super) const SPECIALIZATION_STUDY_PROGRAMS: ManyToMany<Specialization, StudyProgram> =
    ManyToMany {
        relation: RelationKind::SpecializationStudyPrograms,
        left: |specialization| &mut specialization.study_programs,
        right: |program| &mut program.specializations,
    };

pub(super) const SPECIALIZATION_STUDENTS: ManyToMany<Specialization, Student> = ManyToMany {
    relation: RelationKind::SpecializationStudents,
    left: |specialization| &mut specialization.students,
    right: |student| &mut student.specializations,
};

pub(super) const ADMIN_SUPERVISION: OneToMany<Admin, Admin> = OneToMany {
    relation: RelationKind::AdminSupervision,
    owner_is_left: true,
    owner: |supervisor| &mut supervisor.subordinates,
    dependent: |subordinate| &mut subordinate.supervisor,
};

// Building <-> ClassRoom
impl CampusGraph {
    pub fn add_class_room(&mut self, building: BuildingId, room: ClassRoomId) -> AppResult<bool> {
        BUILDING_CLASS_ROOMS.add_owner(self, building, room)
    }

    pub fn remove_class_room(
        &mut self,
        building: BuildingId,
        room: ClassRoomId,
    ) -> AppResult<bool> {
        BUILDING_CLASS_ROOMS.remove_owned(self, building, room)
    }

    /// Move `room` into `building`, leaving its previous building
    pub fn set_class_room_building(
        &mut self,
        room: ClassRoomId,
        building: BuildingId,
    ) -> AppResult<bool> {
        BUILDING_CLASS_ROOMS.add_dependent(self, room, building)
    }

    pub fn remove_class_room_building(
        &mut self,
        room: ClassRoomId,
        building: BuildingId,
    ) -> AppResult<bool> {
        BUILDING_CLASS_ROOMS.remove_dependent(self, room, building)
    }

    pub fn clear_class_room_building(&mut self, room: ClassRoomId) -> AppResult<bool> {
        BUILDING_CLASS_ROOMS.release(self, room)
    }
}

// ClassRoom <-> Lesson
impl CampusGraph {
    pub fn add_class_room_lesson(
        &mut self,
        room: ClassRoomId,
        lesson: LessonId,
    ) -> AppResult<bool> {
        CLASS_ROOM_LESSONS.link(self, room, lesson)
    }

    pub fn remove_class_room_lesson(
        &mut self,
        room: ClassRoomId,
        lesson: LessonId,
    ) -> AppResult<bool> {
        CLASS_ROOM_LESSONS.unlink(self, room, lesson)
    }

    pub fn add_lesson_class_room(
        &mut self,
        lesson: LessonId,
        room: ClassRoomId,
    ) -> AppResult<bool> {
        CLASS_ROOM_LESSONS.link_from_right(self, lesson, room)
    }

    pub fn remove_lesson_class_room(
        &mut self,
        lesson: LessonId,
        room: ClassRoomId,
    ) -> AppResult<bool> {
        CLASS_ROOM_LESSONS.unlink_from_right(self, lesson, room)
    }
}

// Lesson -> Subject, Lesson -> Group
impl CampusGraph {
    pub fn set_lesson_subject(&mut self, lesson: LessonId, subject: SubjectId) -> AppResult<bool> {
        LESSON_SUBJECT.add_dependent(self, lesson, subject)
    }

    pub fn remove_lesson_subject(
        &mut self,
        lesson: LessonId,
        subject: SubjectId,
    ) -> AppResult<bool> {
        LESSON_SUBJECT.remove_dependent(self, lesson, subject)
    }

    pub fn clear_lesson_subject(&mut self, lesson: LessonId) -> AppResult<bool> {
        LESSON_SUBJECT.release(self, lesson)
    }

    pub fn add_subject_lesson(&mut self, subject: SubjectId, lesson: LessonId) -> AppResult<bool> {
        LESSON_SUBJECT.add_owner(self, subject, lesson)
    }

    pub fn remove_subject_lesson(
        &mut self,
        subject: SubjectId,
        lesson: LessonId,
    ) -> AppResult<bool> {
        LESSON_SUBJECT.remove_owned(self, subject, lesson)
    }

    pub fn set_lesson_group(&mut self, lesson: LessonId, group: GroupId) -> AppResult<bool> {
        LESSON_GROUP.add_dependent(self, lesson, group)
    }

    pub fn remove_lesson_group(&mut self, lesson: LessonId, group: GroupId) -> AppResult<bool> {
        LESSON_GROUP.remove_dependent(self, lesson, group)
    }

    pub fn clear_lesson_group(&mut self, lesson: LessonId) -> AppResult<bool> {
        LESSON_GROUP.release(self, lesson)
    }

    pub fn add_group_lesson(&mut self, group: GroupId, lesson: LessonId) -> AppResult<bool> {
        LESSON_GROUP.add_owner(self, group, lesson)
    }

    pub fn remove_group_lesson(&mut self, group: GroupId, lesson: LessonId) -> AppResult<bool> {
        LESSON_GROUP.remove_owned(self, group, lesson)
    }
}

// Lesson -> Teacher
impl CampusGraph {
    /// Assign the lesson's teacher; the teacher remembers it as its latest lesson
    pub fn set_lesson_teacher(&mut self, lesson: LessonId, teacher: TeacherId) -> AppResult<bool> {
        let previous = self.lessons.get(&lesson).and_then(|l| l.teacher.get());
        let changed = LESSON_TEACHER.assign(self, lesson, teacher)?;
        if let Some(previous) = previous.filter(|previous| *previous != teacher) {
            self.refill_latest_lesson(previous);
        }
        Ok(changed)
    }

    pub fn remove_lesson_teacher(
        &mut self,
        lesson: LessonId,
        teacher: TeacherId,
    ) -> AppResult<bool> {
        let changed = LESSON_TEACHER.unassign(self, lesson, teacher)?;
        if changed {
            self.refill_latest_lesson(teacher);
        }
        Ok(changed)
    }

    pub fn clear_lesson_teacher(&mut self, lesson: LessonId) -> AppResult<bool> {
        let previous = self.lessons.get(&lesson).and_then(|l| l.teacher.get());
        let changed = LESSON_TEACHER.release(self, lesson)?;
        if let Some(previous) = previous {
            self.refill_latest_lesson(previous);
        }
        Ok(changed)
    }

    /// A teacher that lost its latest lesson falls back to another lesson it
    /// still teaches, so the back reference stays empty only when none is left
    fn refill_latest_lesson(&mut self, teacher: TeacherId) {
        let is_empty = match self.teachers.get(&teacher) {
            Some(found) => !found.latest_lesson.is_set(),
            None => return,
        };
        if !is_empty {
            return;
        }
        let remaining = self.lessons_taught_by(&teacher).last().copied();
        if let (Some(lesson), Some(found)) = (remaining, self.teachers.get_mut(&teacher)) {
            found.latest_lesson.replace(lesson);
        }
    }
}

// Lesson <-> Semester
impl CampusGraph {
    pub fn add_lesson_semester(
        &mut self,
        lesson: LessonId,
        semester: SemesterId,
    ) -> AppResult<bool> {
        LESSON_SEMESTERS.link(self, lesson, semester)
    }

    pub fn remove_lesson_semester(
        &mut self,
        lesson: LessonId,
        semester: SemesterId,
    ) -> AppResult<bool> {
        LESSON_SEMESTERS.unlink(self, lesson, semester)
    }

    pub fn add_semester_lesson(
        &mut self,
        semester: SemesterId,
        lesson: LessonId,
    ) -> AppResult<bool> {
        LESSON_SEMESTERS.link_from_right(self, semester, lesson)
    }

    pub fn remove_semester_lesson(
        &mut self,
        semester: SemesterId,
        lesson: LessonId,
    ) -> AppResult<bool> {
        LESSON_SEMESTERS.unlink_from_right(self, semester, lesson)
    }
}

// Group <-> Student, Group <-> FreeListener
impl CampusGraph {
    pub fn add_group_student(&mut self, group: GroupId, student: StudentId) -> AppResult<bool> {
        GROUP_STUDENTS.link(self, group, student)
    }

    pub fn remove_group_student(&mut self, group: GroupId, student: StudentId) -> AppResult<bool> {
        GROUP_STUDENTS.unlink(self, group, student)
    }

    pub fn add_student_group(&mut self, student: StudentId, group: GroupId) -> AppResult<bool> {
        GROUP_STUDENTS.link_from_right(self, student, group)
    }

    pub fn remove_student_group(&mut self, student: StudentId, group: GroupId) -> AppResult<bool> {
        GROUP_STUDENTS.unlink_from_right(self, student, group)
    }

    pub fn add_group_free_listener(
        &mut self,
        group: GroupId,
        listener: FreeListenerId,
    ) -> AppResult<bool> {
        GROUP_FREE_LISTENERS.link(self, group, listener)
    }

    pub fn remove_group_free_listener(
        &mut self,
        group: GroupId,
        listener: FreeListenerId,
    ) -> AppResult<bool> {
        GROUP_FREE_LISTENERS.unlink(self, group, listener)
    }

    pub fn add_free_listener_group(
        &mut self,
        listener: FreeListenerId,
        group: GroupId,
    ) -> AppResult<bool> {
        GROUP_FREE_LISTENERS.link_from_right(self, listener, group)
    }

    pub fn remove_free_listener_group(
        &mut self,
        listener: FreeListenerId,
        group: GroupId,
    ) -> AppResult<bool> {
        GROUP_FREE_LISTENERS.unlink_from_right(self, listener, group)
    }
}

// Specialization <-> Subject / StudyProgram / Student
impl CampusGraph {
    pub fn add_specialization_subject(
        &mut self,
        specialization: SpecializationId,
        subject: SubjectId,
    ) -> AppResult<bool> {
        SPECIALIZATION_SUBJECTS.link(self, specialization, subject)
    }

    pub fn remove_specialization_subject(
        &mut self,
        specialization: SpecializationId,
        subject: SubjectId,
    ) -> AppResult<bool> {
        SPECIALIZATION_SUBJECTS.unlink(self, specialization, subject)
    }

    pub fn add_subject_specialization(
        &mut self,
        subject: SubjectId,
        specialization: SpecializationId,
    ) -> AppResult<bool> {
        SPECIALIZATION_SUBJECTS.link_from_right(self, subject, specialization)
    }

    pub fn remove_subject_specialization(
        &mut self,
        subject: SubjectId,
        specialization: SpecializationId,
    ) -> AppResult<bool> {
        SPECIALIZATION_SUBJECTS.unlink_from_right(self, subject, specialization)
    }

    pub fn add_specialization_study_program(
        &mut self,
        specialization: SpecializationId,
        program: StudyProgramId,
    ) -> AppResult<bool> {
        SPECIALIZATION_STUDY_PROGRAMS.link(self, specialization, program)
    }

    pub fn remove_specialization_study_program(
        &mut self,
        specialization: SpecializationId,
        program: StudyProgramId,
    ) -> AppResult<bool> {
        SPECIALIZATION_STUDY_PROGRAMS.unlink(self, specialization, program)
    }

    pub fn add_study_program_specialization(
        &mut self,
        program: StudyProgramId,
        specialization: SpecializationId,
    ) -> AppResult<bool> {
        SPECIALIZATION_STUDY_PROGRAMS.link_from_right(self, program, specialization)
    }

    pub fn remove_study_program_specialization(
        &mut self,
        program: StudyProgramId,
        specialization: SpecializationId,
    ) -> AppResult<bool> {
        SPECIALIZATION_STUDY_PROGRAMS.unlink_from_right(self, program, specialization)
    }

    pub fn add_specialization_student(
        &mut self,
        specialization: SpecializationId,
        student: StudentId,
    ) -> AppResult<bool> {
        SPECIALIZATION_STUDENTS.link(self, specialization, student)
    }

    pub fn remove_specialization_student(
        &mut self,
        specialization: SpecializationId,
        student: StudentId,
    ) -> AppResult<bool> {
        SPECIALIZATION_STUDENTS.unlink(self, specialization, student)
    }

    pub fn add_student_specialization(
        &mut self,
        student: StudentId,
        specialization: SpecializationId,
    ) -> AppResult<bool> {
        SPECIALIZATION_STUDENTS.link_from_right(self, student, specialization)
    }

    pub fn remove_student_specialization(
        &mut self,
        student: StudentId,
        specialization: SpecializationId,
    ) -> AppResult<bool> {
        SPECIALIZATION_STUDENTS.unlink_from_right(self, student, specialization)
    }
}

// Admin supervision. Only self-supervision is rejected here; cycles through
// other admins are checked by `would_create_cycle` before calling in.
impl CampusGraph {
    pub fn set_admin_supervisor(
        &mut self,
        subordinate: AdminId,
        supervisor: AdminId,
    ) -> AppResult<bool> {
        ADMIN_SUPERVISION.add_dependent(self, subordinate, supervisor)
    }

    pub fn remove_admin_supervisor(
        &mut self,
        subordinate: AdminId,
        supervisor: AdminId,
    ) -> AppResult<bool> {
        ADMIN_SUPERVISION.remove_dependent(self, subordinate, supervisor)
    }

    pub fn clear_admin_supervisor(&mut self, subordinate: AdminId) -> AppResult<bool> {
        ADMIN_SUPERVISION.release(self, subordinate)
    }

    pub fn add_admin_subordinate(
        &mut self,
        supervisor: AdminId,
        subordinate: AdminId,
    ) -> AppResult<bool> {
        ADMIN_SUPERVISION.add_owner(self, supervisor, subordinate)
    }

    pub fn remove_admin_subordinate(
        &mut self,
        supervisor: AdminId,
        subordinate: AdminId,
    ) -> AppResult<bool> {
        ADMIN_SUPERVISION.remove_owned(self, supervisor, subordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::academic::domain::LessonKind;
    use crate::modules::people::domain::PersonDetails;
    use crate::modules::relations::RelationChange;
    use crate::shared::errors::AppError;
    use chrono::{NaiveDate, NaiveTime, Weekday};

    fn lesson(graph: &mut CampusGraph) -> LessonId {
        let lesson = Lesson::new(
            LessonKind::Lecture,
            Weekday::Mon,
            NaiveTime::from_hms_opt(8, 15, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 45, 0).unwrap(),
        )
        .unwrap();
        graph.insert(lesson).unwrap()
    }

    fn teacher(graph: &mut CampusGraph, email: &str) -> TeacherId {
        let details = PersonDetails::new(
            "Jan",
            "Kowalski",
            email,
            "600100200",
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
        );
        graph
            .insert(Teacher::new(details, NaiveDate::from_ymd_opt(2000, 10, 1).unwrap()))
            .unwrap()
    }

    fn admin(graph: &mut CampusGraph, email: &str) -> AdminId {
        let details = PersonDetails::new(
            "Ewa",
            "Lis",
            email,
            "600100200",
            NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
        );
        graph
            .insert(Admin::new(details, "Registrar", NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()))
            .unwrap()
    }

    #[test]
    fn lesson_subject_replacement_moves_between_collections() {
        let mut graph = CampusGraph::new();
        let lesson = lesson(&mut graph);
        let math = graph.insert(Subject::new("MAT1", "Calculus", 6)).unwrap();
        let physics = graph.insert(Subject::new("FIZ1", "Physics", 5)).unwrap();

        assert!(graph.set_lesson_subject(lesson, math).unwrap());
        assert!(graph.set_lesson_subject(lesson, physics).unwrap());

        assert_eq!(graph.lesson(&lesson).unwrap().subject(), Some(physics));
        assert!(graph.subject(&math).unwrap().lessons().is_empty());
        assert_eq!(graph.subject(&physics).unwrap().lessons(), vec![lesson]);

        assert!(graph.remove_subject_lesson(physics, lesson).unwrap());
        assert_eq!(graph.lesson(&lesson).unwrap().subject(), None);
    }

    #[test]
    fn teacher_keeps_only_latest_lesson() {
        let mut graph = CampusGraph::new();
        let first = lesson(&mut graph);
        let second = lesson(&mut graph);
        let teacher = teacher(&mut graph, "jan@uni.edu");

        graph.set_lesson_teacher(first, teacher).unwrap();
        graph.set_lesson_teacher(second, teacher).unwrap();

        assert_eq!(graph.teacher(&teacher).unwrap().latest_lesson(), Some(second));
        assert_eq!(graph.lesson(&first).unwrap().teacher(), Some(teacher));
        assert_eq!(graph.lessons_taught_by(&teacher).len(), 2);

        graph.clear_lesson_teacher(second).unwrap();
        assert_eq!(graph.teacher(&teacher).unwrap().latest_lesson(), Some(first));
        assert_eq!(graph.lesson(&first).unwrap().teacher(), Some(teacher));

        graph.remove_lesson_teacher(first, teacher).unwrap();
        assert_eq!(graph.teacher(&teacher).unwrap().latest_lesson(), None);
        assert!(graph.verify_integrity().is_empty());
    }

    #[test]
    fn reassigning_a_lesson_forgets_the_old_teacher() {
        let mut graph = CampusGraph::new();
        let lesson = lesson(&mut graph);
        let jan = teacher(&mut graph, "jan@uni.edu");
        let ola = teacher(&mut graph, "ola@uni.edu");

        graph.set_lesson_teacher(lesson, jan).unwrap();
        graph.set_lesson_teacher(lesson, ola).unwrap();

        assert_eq!(graph.teacher(&jan).unwrap().latest_lesson(), None);
        assert_eq!(graph.teacher(&ola).unwrap().latest_lesson(), Some(lesson));
        assert!(!graph.remove_lesson_teacher(lesson, jan).unwrap());
    }

    #[test]
    fn supervision_from_either_side() {
        let mut graph = CampusGraph::new();
        let boss = admin(&mut graph, "boss@uni.edu");
        let clerk = admin(&mut graph, "clerk@uni.edu");

        assert!(graph.add_admin_subordinate(boss, clerk).unwrap());
        assert!(!graph.set_admin_supervisor(clerk, boss).unwrap());
        assert_eq!(graph.admin(&clerk).unwrap().supervisor(), Some(boss));
        assert_eq!(graph.admin(&boss).unwrap().subordinates(), vec![clerk]);

        assert!(graph.clear_admin_supervisor(clerk).unwrap());
        assert!(graph.admin(&boss).unwrap().subordinates().is_empty());
    }

    #[test]
    fn self_supervision_is_rejected() {
        let mut graph = CampusGraph::new();
        let boss = admin(&mut graph, "boss@uni.edu");

        let err = graph.set_admin_supervisor(boss, boss).unwrap_err();
        assert!(matches!(err, AppError::InvariantViolation(_)));
        assert!(graph.admin(&boss).unwrap().is_superadmin());
        assert!(graph.pending_events().is_empty());
    }

    #[test]
    fn each_link_records_one_event() {
        let mut graph = CampusGraph::new();
        let lesson = lesson(&mut graph);
        let winter = graph
            .insert(
                Semester::new(
                    "2024Z",
                    NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
                    NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
                )
                .unwrap(),
            )
            .unwrap();

        graph.add_semester_lesson(winter, lesson).unwrap();
        graph.add_lesson_semester(lesson, winter).unwrap();

        let events = graph.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].relation, RelationKind::LessonSemesters);
        assert_eq!(events[0].change, RelationChange::Linked);
        assert!(graph.pending_events().is_empty());
    }
}
