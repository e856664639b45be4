use crate::modules::campus::domain::{CampusGraph, CampusRepository};
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Keeps the serialized graph in memory. Going through JSON means a loaded
/// graph never shares state with the one that was saved.
#[derive(Default)]
pub struct InMemoryCampusRepository {
    document: Mutex<Option<String>>,
    saves: AtomicUsize,
}

impl InMemoryCampusRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that already holds `graph`
    pub fn with_graph(graph: &CampusGraph) -> AppResult<Self> {
        Ok(Self {
            document: Mutex::new(Some(serde_json::to_string(graph)?)),
            saves: AtomicUsize::new(0),
        })
    }

    /// Repository holding an arbitrary document, e.g. a hand-edited one
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CampusRepository for InMemoryCampusRepository {
    async fn load(&self) -> AppResult<Option<CampusGraph>> {
        let document = self.document.lock().await;
        match document.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, graph: &CampusGraph) -> AppResult<()> {
        let json = serde_json::to_string(graph)?;
        *self.document.lock().await = Some(json);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn exists(&self) -> AppResult<bool> {
        Ok(self.document.lock().await.is_some())
    }
}
