//! File-based agent storage

use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use super::model::AgentDefinition;
use super::repository::AgentRepository;
use crate::document::FileCollection;
use crate::Result;

/// Agent definitions stored as a JSON collection
pub struct FileAgentStore {
    collection: FileCollection<AgentDefinition>,
}

impl FileAgentStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            collection: FileCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl AgentRepository for FileAgentStore {
    async fn create(&self, agent: AgentDefinition) -> Result<AgentDefinition> {
        self.collection.insert(agent).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<AgentDefinition>> {
        Ok(self.collection.get(id).await)
    }

    async fn get_owned(&self, id: Uuid, owner_id: &str) -> Result<Option<AgentDefinition>> {
        Ok(self
            .collection
            .get(id)
            .await
            .filter(|agent| agent.owner_id == owner_id))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<AgentDefinition>> {
        Ok(self.collection.find(|agent| agent.owner_id == owner_id).await)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.collection.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentType;
    use tempfile::TempDir;

    async fn create_test_store() -> (FileAgentStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileAgentStore::new(temp_dir.path().join("agents.json"))
            .await
            .unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_list_by_owner() {
        let (store, _temp) = create_test_store().await;

        store
            .create(AgentDefinition::new("A", AgentType::Cloud, "alice"))
            .await
            .unwrap();
        store
            .create(AgentDefinition::new("B", AgentType::Local, "alice"))
            .await
            .unwrap();
        store
            .create(AgentDefinition::new("C", AgentType::Hybrid, "bob"))
            .await
            .unwrap();

        assert_eq!(store.list_by_owner("alice").await.unwrap().len(), 2);
        assert_eq!(store.list_by_owner("bob").await.unwrap().len(), 1);
        assert!(store.list_by_owner("carol").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_owned_hides_foreign_agents() {
        let (store, _temp) = create_test_store().await;

        let agent = store
            .create(AgentDefinition::new("Private", AgentType::Cloud, "alice"))
            .await
            .unwrap();

        assert!(store.get_owned(agent.id, "alice").await.unwrap().is_some());
        assert!(store.get_owned(agent.id, "mallory").await.unwrap().is_none());
        assert!(store.get(agent.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_agent() {
        let (store, _temp) = create_test_store().await;

        let agent = store
            .create(AgentDefinition::new("Temp", AgentType::Cloud, "alice"))
            .await
            .unwrap();

        assert!(store.delete(agent.id).await.unwrap());
        assert!(store.get(agent.id).await.unwrap().is_none());
        assert!(!store.delete(agent.id).await.unwrap());
    }
}
