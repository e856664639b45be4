//! Typed identifiers for every entity kind.
//!
//! Relations store these ids instead of references, so each kind gets its own
//! newtype and a lesson id can never end up in a collection of group ids.
use crate::shared::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

entity_id!(BuildingId);
entity_id!(ClassRoomId);
entity_id!(LessonId);
entity_id!(GroupId);
entity_id!(SemesterId);
entity_id!(SubjectId);
entity_id!(SpecializationId);
entity_id!(StudyProgramId);
entity_id!(StudentId);
entity_id!(FreeListenerId);
entity_id!(TeacherId);
entity_id!(
    /// Admins supervise other admins, so this id appears on both ends of
    /// the supervision relation
    AdminId
);
