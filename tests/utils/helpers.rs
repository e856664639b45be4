/// Test helper functions and service builders
use campus_lib::modules::campus::{CampusGraph, CampusService, InMemoryCampusRepository};
use std::sync::Arc;

pub struct TestServices {
    pub campus_service: Arc<CampusService>,
    pub repository: Arc<InMemoryCampusRepository>,
}

/// Build a service over an empty in-memory store
pub fn build_test_services() -> TestServices {
    let repository = Arc::new(InMemoryCampusRepository::new());
    let campus_service = Arc::new(CampusService::new(CampusGraph::new(), repository.clone()));

    TestServices {
        campus_service,
        repository,
    }
}

/// Random student index number in the `s12345` format
pub fn index_number() -> String {
    format!("s{:06}", rand::random::<u32>() % 1_000_000)
}
