pub mod modules;
pub mod shared;

use modules::campus::{CampusService, JsonCampusRepository};
use shared::{AppConfig, AppResult};
use std::sync::Arc;

/// Open the campus service on the JSON document named by `config`
pub async fn open_campus(config: &AppConfig) -> AppResult<CampusService> {
    let repository = Arc::new(JsonCampusRepository::from_config(config));
    crate::log_info!("Opening campus store at {}", repository.path().display());
    CampusService::open(repository).await
}
