//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Task, TaskTransition};
use crate::Result;

/// Repository interface for task CRUD operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task
    async fn create(&self, task: Task) -> Result<Task>;

    /// Get a task by ID
    async fn get(&self, id: Uuid) -> Result<Option<Task>>;

    /// Get a task by ID if it belongs to `user_id`
    async fn get_owned(&self, id: Uuid, user_id: &str) -> Result<Option<Task>>;

    /// Get all tasks of a user
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Task>>;

    /// Apply `transition` if it still applies to the stored task.
    ///
    /// Returns `None` when the task is missing or has already moved on, for
    /// example after a concurrent cancel.
    async fn transition(&self, id: Uuid, transition: TaskTransition) -> Result<Option<Task>>;
}
