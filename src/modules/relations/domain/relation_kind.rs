use serde::{Deserialize, Serialize};
use std::fmt;

/// How many counterparts one side of a relation may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    Single,
    Many,
}

/// Every association the campus graph maintains.
///
/// The left side is the first entity named in the variant; the right side is
/// the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    BuildingClassRooms,
    ClassRoomLessons,
    LessonSubject,
    LessonGroup,
    LessonTeacher,
    LessonSemesters,
    GroupStudents,
    GroupFreeListeners,
    SpecializationSubjects,
    SpecializationStudyPrograms,
    SpecializationStudents,
    AdminSupervision,
}

impl RelationKind {
    pub const ALL: [RelationKind; 12] = [
        RelationKind::BuildingClassRooms,
        RelationKind::ClassRoomLessons,
        RelationKind::LessonSubject,
        RelationKind::LessonGroup,
        RelationKind::LessonTeacher,
        RelationKind::LessonSemesters,
        RelationKind::GroupStudents,
        RelationKind::GroupFreeListeners,
        RelationKind::SpecializationSubjects,
        RelationKind::SpecializationStudyPrograms,
        RelationKind::SpecializationStudents,
        RelationKind::AdminSupervision,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RelationKind::BuildingClassRooms => "building_class_rooms",
            RelationKind::ClassRoomLessons => "class_room_lessons",
            RelationKind::LessonSubject => "lesson_subject",
            RelationKind::LessonGroup => "lesson_group",
            RelationKind::LessonTeacher => "lesson_teacher",
            RelationKind::LessonSemesters => "lesson_semesters",
            RelationKind::GroupStudents => "group_students",
            RelationKind::GroupFreeListeners => "group_free_listeners",
            RelationKind::SpecializationSubjects => "specialization_subjects",
            RelationKind::SpecializationStudyPrograms => "specialization_study_programs",
            RelationKind::SpecializationStudents => "specialization_students",
            RelationKind::AdminSupervision => "admin_supervision",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RelationKind::BuildingClassRooms => "Building / Class rooms",
            RelationKind::ClassRoomLessons => "Class room / Lessons",
            RelationKind::LessonSubject => "Lesson / Subject",
            RelationKind::LessonGroup => "Lesson / Group",
            RelationKind::LessonTeacher => "Lesson / Teacher",
            RelationKind::LessonSemesters => "Lesson / Semesters",
            RelationKind::GroupStudents => "Group / Students",
            RelationKind::GroupFreeListeners => "Group / Free listeners",
            RelationKind::SpecializationSubjects => "Specialization / Subjects",
            RelationKind::SpecializationStudyPrograms => "Specialization / Study programs",
            RelationKind::SpecializationStudents => "Specialization / Students",
            RelationKind::AdminSupervision => "Supervisor / Subordinates",
        }
    }

    /// Cardinality of (left, right): how many rights a left holds and
    /// how many lefts a right holds
    pub fn cardinality(&self) -> (Cardinality, Cardinality) {
        use Cardinality::{Many, Single};
        match self {
            // one building, many rooms
            RelationKind::BuildingClassRooms => (Many, Single),
            // one subject/group/teacher per lesson
            RelationKind::LessonSubject
            | RelationKind::LessonGroup
            | RelationKind::LessonTeacher => (Single, Many),
            // one supervisor, many subordinates
            RelationKind::AdminSupervision => (Many, Single),
            RelationKind::ClassRoomLessons
            | RelationKind::LessonSemesters
            | RelationKind::GroupStudents
            | RelationKind::GroupFreeListeners
            | RelationKind::SpecializationSubjects
            | RelationKind::SpecializationStudyPrograms
            | RelationKind::SpecializationStudents => (Many, Many),
        }
    }

    /// Whether the right side keeps a reciprocal endpoint for every link.
    ///
    /// A teacher only remembers the lesson it was most recently assigned to.
    pub fn is_bidirectional(&self) -> bool {
        !matches!(self, RelationKind::LessonTeacher)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_names_are_distinct() {
        let mut names: Vec<_> = RelationKind::ALL.iter().map(|r| r.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), RelationKind::ALL.len());
    }

    #[test]
    fn only_teacher_link_is_one_directional() {
        let one_way: Vec<_> = RelationKind::ALL
            .iter()
            .filter(|r| !r.is_bidirectional())
            .collect();
        assert_eq!(one_way, vec![&RelationKind::LessonTeacher]);
    }

    #[test]
    fn single_valued_sides() {
        assert_eq!(
            RelationKind::BuildingClassRooms.cardinality(),
            (Cardinality::Many, Cardinality::Single)
        );
        assert_eq!(
            RelationKind::LessonSubject.cardinality(),
            (Cardinality::Single, Cardinality::Many)
        );
        assert_eq!(
            RelationKind::GroupStudents.cardinality(),
            (Cardinality::Many, Cardinality::Many)
        );
    }

    #[test]
    fn serde_uses_snake_case_names() {
        for relation in RelationKind::ALL {
            let json = serde_json::to_string(&relation).unwrap();
            assert_eq!(json, format!("\"{}\"", relation.name()));
        }
    }
}
