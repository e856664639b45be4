pub mod entity_id;

pub use entity_id::{
    AdminId, BuildingId, ClassRoomId, FreeListenerId, GroupId, LessonId, SemesterId,
    SpecializationId, StudentId, StudyProgramId, SubjectId, TeacherId,
};
