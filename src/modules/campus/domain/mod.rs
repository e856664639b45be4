pub mod graph;
pub mod repository;

// Re-exports for easy access
pub use graph::{CampusGraph, EntityArena, IntegrityViolation};
pub use repository::CampusRepository;
