pub mod class_room_kind;
pub mod lesson_kind;
pub mod study_level;

pub use class_room_kind::ClassRoomKind;
pub use lesson_kind::LessonKind;
pub use study_level::StudyLevel;
