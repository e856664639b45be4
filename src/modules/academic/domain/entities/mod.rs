pub mod building;
pub mod class_room;
pub mod group;
pub mod lesson;
pub mod semester;
pub mod specialization;
pub mod study_program;
pub mod subject;

pub use building::Building;
pub use class_room::ClassRoom;
pub use group::Group;
pub use lesson::Lesson;
pub use semester::Semester;
pub use specialization::Specialization;
pub use study_program::StudyProgram;
pub use subject::Subject;
