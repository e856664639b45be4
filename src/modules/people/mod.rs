//! People: students, free listeners, teachers and admins.
//!
//! The four kinds are separate entities sharing a `PersonDetails` record;
//! `PersonRef` tags which kind an id belongs to.
pub mod domain;

// Re-exports for easy external access
pub use domain::{Admin, FreeListener, Person, PersonDetails, PersonKind, PersonRef, Student, Teacher};
