/// Repository trait for campus graph persistence
///
/// The whole graph is loaded and saved as one document; there is no partial
/// loading.
use super::graph::CampusGraph;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait CampusRepository: Send + Sync {
    /// Load the stored graph, `None` when nothing has been saved yet
    async fn load(&self) -> AppResult<Option<CampusGraph>>;

    /// Replace the stored graph with `graph`
    async fn save(&self, graph: &CampusGraph) -> AppResult<()>;

    /// Whether a stored graph exists
    async fn exists(&self) -> AppResult<bool>;
}
