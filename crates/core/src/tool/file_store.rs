//! File-based tool storage

use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use super::model::ToolDefinition;
use super::repository::ToolRepository;
use crate::document::FileCollection;
use crate::Result;

/// Tool definitions stored as a JSON collection
pub struct FileToolStore {
    collection: FileCollection<ToolDefinition>,
}

impl FileToolStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            collection: FileCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl ToolRepository for FileToolStore {
    async fn create(&self, tool: ToolDefinition) -> Result<ToolDefinition> {
        self.collection.insert(tool).await
    }

    async fn get_active(&self, id: Uuid) -> Result<Option<ToolDefinition>> {
        Ok(self.collection.get(id).await.filter(|tool| tool.is_active))
    }

    async fn list_active(&self) -> Result<Vec<ToolDefinition>> {
        Ok(self.collection.find(|tool| tool.is_active).await)
    }

    async fn deactivate(&self, id: Uuid, creator_id: &str) -> Result<Option<ToolDefinition>> {
        self.collection
            .update_if(
                id,
                |tool| tool.creator_id == creator_id,
                |tool| tool.is_active = false,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{ToolExecutionEnvironment, ToolType};
    use tempfile::TempDir;

    async fn create_test_store() -> (FileToolStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileToolStore::new(temp_dir.path().join("tools.json"))
            .await
            .unwrap();
        (store, temp_dir)
    }

    fn browser(creator: &str) -> ToolDefinition {
        ToolDefinition::new(
            "Browser",
            "Sandboxed browser",
            ToolType::Browser,
            ToolExecutionEnvironment::Sandbox,
            creator,
        )
    }

    #[tokio::test]
    async fn test_deactivate_hides_tool() {
        let (store, _temp) = create_test_store().await;

        let tool = store.create(browser("alice")).await.unwrap();
        assert_eq!(store.list_active().await.unwrap().len(), 1);

        let deactivated = store.deactivate(tool.id, "alice").await.unwrap().unwrap();
        assert!(!deactivated.is_active);

        assert!(store.get_active(tool.id).await.unwrap().is_none());
        assert!(store.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_only_creator_can_deactivate() {
        let (store, _temp) = create_test_store().await;

        let tool = store.create(browser("alice")).await.unwrap();

        assert!(store.deactivate(tool.id, "bob").await.unwrap().is_none());
        assert!(store.get_active(tool.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_deactivate_unknown_tool() {
        let (store, _temp) = create_test_store().await;

        let result = store.deactivate(Uuid::new_v4(), "alice").await.unwrap();
        assert!(result.is_none());
    }
}
