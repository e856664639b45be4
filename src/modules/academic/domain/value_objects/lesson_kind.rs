use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    Lecture,
    Exercise,
    Laboratory,
}

impl LessonKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            LessonKind::Lecture => "Lecture",
            LessonKind::Exercise => "Exercise",
            LessonKind::Laboratory => "Laboratory",
        }
    }
}
