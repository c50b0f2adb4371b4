//! Agent repository trait

use async_trait::async_trait;
use uuid::Uuid;

use super::model::AgentDefinition;
use crate::Result;

/// Repository interface for agent definitions
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Create a new agent definition
    async fn create(&self, agent: AgentDefinition) -> Result<AgentDefinition>;

    /// Get an agent by ID regardless of owner
    async fn get(&self, id: Uuid) -> Result<Option<AgentDefinition>>;

    /// Get an agent by ID if it belongs to `owner_id`
    async fn get_owned(&self, id: Uuid, owner_id: &str) -> Result<Option<AgentDefinition>>;

    /// List agents owned by `owner_id`
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<AgentDefinition>>;

    /// Delete an agent by ID
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
