pub mod person_ref;

pub use person_ref::{PersonKind, PersonRef};
