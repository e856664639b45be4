/// File-backed implementation of CampusRepository
///
/// The graph is stored as one JSON document. Saves go to a sibling temporary
/// file first and are then renamed over the target, so a crash mid-write
/// leaves the previous document intact.
use crate::modules::campus::domain::{CampusGraph, CampusRepository};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{LogContext, TimedOperation};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct JsonCampusRepository {
    path: PathBuf,
    pretty: bool,
}

impl JsonCampusRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.data_file.clone()).with_pretty(config.pretty_json)
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn storage_error(&self, action: &str, e: std::io::Error) -> AppError {
        AppError::StorageError(format!(
            "Failed to {} {}: {}",
            action,
            self.path.display(),
            e
        ))
    }
}

#[async_trait]
impl CampusRepository for JsonCampusRepository {
    async fn load(&self) -> AppResult<Option<CampusGraph>> {
        LogContext::store_operation("load", &self.path.display().to_string());
        let timer = TimedOperation::new("load campus graph");

        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.storage_error("read", e)),
        };

        let graph: CampusGraph = serde_json::from_str(&raw).map_err(|e| {
            AppError::SerializationError(format!("{}: {}", self.path.display(), e))
        })?;

        timer.finish_with_info(&format!("{} entities", graph.entity_count()));
        Ok(Some(graph))
    }

    async fn save(&self, graph: &CampusGraph) -> AppResult<()> {
        LogContext::store_operation("save", &self.path.display().to_string());
        let timer = TimedOperation::new("save campus graph");

        let json = if self.pretty {
            serde_json::to_vec_pretty(graph)?
        } else {
            serde_json::to_vec(graph)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error("create directory for", e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &json)
            .await
            .map_err(|e| self.storage_error("write temporary file for", e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.storage_error("replace", e))?;

        timer.finish_with_info(&format!("{} bytes", json.len()));
        Ok(())
    }

    async fn exists(&self) -> AppResult<bool> {
        tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| self.storage_error("check", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::academic::domain::{Building, ClassRoom};
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let repo = JsonCampusRepository::new(dir.path().join("campus.json"));

        assert!(!repo.exists().await.unwrap());
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_keeps_links() {
        let dir = tempdir().unwrap();
        let repo = JsonCampusRepository::new(dir.path().join("nested").join("campus.json"))
            .with_pretty(false);

        let mut graph = CampusGraph::new();
        let building = graph.insert(Building::new("A1", "Koszykowa 86")).unwrap();
        let room = graph.insert(ClassRoom::new("101", 30)).unwrap();
        graph.add_class_room(building, room).unwrap();
        repo.save(&graph).await.unwrap();

        assert!(repo.exists().await.unwrap());
        assert!(!repo.temp_path().exists());

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.class_room(&room).unwrap().building(), Some(building));
    }

    #[tokio::test]
    async fn malformed_document_is_a_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("campus.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonCampusRepository::new(&path).load().await.unwrap_err();
        assert!(matches!(err, AppError::SerializationError(_)));
    }
}
