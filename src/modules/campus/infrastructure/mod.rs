pub mod json_repository;
pub mod memory_repository;

pub use json_repository::JsonCampusRepository;
pub use memory_repository::InMemoryCampusRepository;
