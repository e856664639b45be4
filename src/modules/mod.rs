pub mod academic;
pub mod campus;
pub mod people;
pub mod relations;
