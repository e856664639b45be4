//! Academic structure: buildings, rooms, lessons, groups, semesters,
//! subjects, specializations and study programs.
pub mod domain;

// Re-exports for easy external access
pub use domain::{
    Building, ClassRoom, ClassRoomKind, Group, Lesson, LessonKind, Semester, Specialization,
    StudyLevel, StudyProgram, Subject,
};
