use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassRoomKind {
    LectureHall,
    Laboratory,
    Computer,
    Seminar,
}

impl ClassRoomKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ClassRoomKind::LectureHall => "Lecture hall",
            ClassRoomKind::Laboratory => "Laboratory",
            ClassRoomKind::Computer => "Computer room",
            ClassRoomKind::Seminar => "Seminar room",
        }
    }

    /// Whether lessons of `kind` can reasonably be held in this room
    pub fn suits(&self, kind: super::LessonKind) -> bool {
        use super::LessonKind;
        match (self, kind) {
            (ClassRoomKind::LectureHall, LessonKind::Lecture) => true,
            (ClassRoomKind::LectureHall, _) => false,
            (ClassRoomKind::Laboratory | ClassRoomKind::Computer, _) => true,
            (ClassRoomKind::Seminar, LessonKind::Laboratory) => false,
            (ClassRoomKind::Seminar, _) => true,
        }
    }
}

impl Default for ClassRoomKind {
    fn default() -> Self {
        ClassRoomKind::Seminar
    }
}
