//! Tool repository trait

use async_trait::async_trait;
use uuid::Uuid;

use super::model::ToolDefinition;
use crate::Result;

/// Repository interface for tool definitions
#[async_trait]
pub trait ToolRepository: Send + Sync {
    /// Create a new tool definition
    async fn create(&self, tool: ToolDefinition) -> Result<ToolDefinition>;

    /// Get an active tool by ID
    async fn get_active(&self, id: Uuid) -> Result<Option<ToolDefinition>>;

    /// List all active tools
    async fn list_active(&self) -> Result<Vec<ToolDefinition>>;

    /// Mark a tool inactive if it was created by `creator_id`.
    ///
    /// Returns the deactivated tool, or `None` when no such tool exists for
    /// that creator.
    async fn deactivate(&self, id: Uuid, creator_id: &str) -> Result<Option<ToolDefinition>>;
}
