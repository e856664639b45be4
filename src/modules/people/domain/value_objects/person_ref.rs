use crate::shared::domain::{AdminId, FreeListenerId, StudentId, TeacherId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonKind {
    Student,
    FreeListener,
    Teacher,
    Admin,
}

impl PersonKind {
    pub fn name(&self) -> &'static str {
        match self {
            PersonKind::Student => "student",
            PersonKind::FreeListener => "free_listener",
            PersonKind::Teacher => "teacher",
            PersonKind::Admin => "admin",
        }
    }
}

/// Tagged pointer to any kind of person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PersonRef {
    Student(StudentId),
    FreeListener(FreeListenerId),
    Teacher(TeacherId),
    Admin(AdminId),
}

impl PersonRef {
    pub fn kind(&self) -> PersonKind {
        match self {
            PersonRef::Student(_) => PersonKind::Student,
            PersonRef::FreeListener(_) => PersonKind::FreeListener,
            PersonRef::Teacher(_) => PersonKind::Teacher,
            PersonRef::Admin(_) => PersonKind::Admin,
        }
    }

    pub fn uuid(&self) -> Uuid {
        match self {
            PersonRef::Student(id) => *id.as_uuid(),
            PersonRef::FreeListener(id) => *id.as_uuid(),
            PersonRef::Teacher(id) => *id.as_uuid(),
            PersonRef::Admin(id) => *id.as_uuid(),
        }
    }
}

impl fmt::Display for PersonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind().name(), self.uuid())
    }
}
