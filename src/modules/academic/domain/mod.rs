pub mod entities;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{
    Building, ClassRoom, Group, Lesson, Semester, Specialization, StudyProgram, Subject,
};
pub use value_objects::{ClassRoomKind, LessonKind, StudyLevel};
