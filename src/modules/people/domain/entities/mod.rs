pub mod admin;
pub mod free_listener;
pub mod person;
pub mod student;
pub mod teacher;

pub use admin::Admin;
pub use free_listener::FreeListener;
pub use person::{Person, PersonDetails};
pub use student::Student;
pub use teacher::Teacher;
