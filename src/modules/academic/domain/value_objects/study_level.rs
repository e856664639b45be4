use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyLevel {
    Bachelor,
    Engineer,
    Master,
    Doctoral,
}

impl StudyLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            StudyLevel::Bachelor => "Bachelor",
            StudyLevel::Engineer => "Engineer",
            StudyLevel::Master => "Master",
            StudyLevel::Doctoral => "Doctoral",
        }
    }

    /// Usual number of semesters for a program at this level
    pub fn typical_semesters(&self) -> u8 {
        match self {
            StudyLevel::Bachelor => 6,
            StudyLevel::Engineer => 7,
            StudyLevel::Master => 4,
            StudyLevel::Doctoral => 8,
        }
    }
}
