//! The campus graph: the store every entity lives in, the service that
//! guards it and the repositories that persist it.
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{CampusService, CampusSummary, LinkView, RecordRules};
pub use domain::{CampusGraph, CampusRepository, EntityArena, IntegrityViolation};
pub use infrastructure::{InMemoryCampusRepository, JsonCampusRepository};
