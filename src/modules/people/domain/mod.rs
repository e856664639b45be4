pub mod entities;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{Admin, FreeListener, Person, PersonDetails, Student, Teacher};
pub use value_objects::{PersonKind, PersonRef};
