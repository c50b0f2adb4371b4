//! File-based task storage implementation
//!
//! Stores tasks as JSON in a file on disk.

use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

use super::model::{Task, TaskTransition};
use super::repository::TaskRepository;
use crate::document::FileCollection;
use crate::{Error, Result};

/// File-based task store using JSON
pub struct FileTaskStore {
    collection: FileCollection<Task>,
}

impl FileTaskStore {
    /// Create a new FileTaskStore
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            collection: FileCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
    async fn create(&self, task: Task) -> Result<Task> {
        self.collection.insert(task).await.map_err(|e| match e {
            Error::Conflict(msg) => Error::InvalidInput(msg),
            other => other,
        })
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>> {
        Ok(self.collection.get(id).await)
    }

    async fn get_owned(&self, id: Uuid, user_id: &str) -> Result<Option<Task>> {
        Ok(self
            .collection
            .get(id)
            .await
            .filter(|task| task.user_id == user_id))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Task>> {
        Ok(self.collection.find(|task| task.user_id == user_id).await)
    }

    async fn transition(&self, id: Uuid, transition: TaskTransition) -> Result<Option<Task>> {
        let guard = transition.clone();
        self.collection
            .update_if(
                id,
                move |task| guard.applies_to(task.status),
                move |task| transition.apply(task),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskPriority, TaskStatus};
    use tempfile::TempDir;

    async fn create_test_store() -> (FileTaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");
        let store = FileTaskStore::new(&path).await.unwrap();
        (store, temp_dir)
    }

    fn new_task(title: &str, user: &str) -> Task {
        Task::new(title, "description", Uuid::new_v4(), user)
    }

    #[tokio::test]
    async fn test_create_and_get_task() {
        let (store, _temp) = create_test_store().await;

        let task = new_task("Test task", "alice");
        let id = task.id;
        store.create(task).await.unwrap();

        let retrieved = store.get(id).await.unwrap();
        assert_eq!(retrieved.unwrap().title, "Test task");

        // Test non-existent task
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_user() {
        let (store, _temp) = create_test_store().await;

        store.create(new_task("Task 1", "alice")).await.unwrap();
        store.create(new_task("Task 2", "alice")).await.unwrap();
        store.create(new_task("Task 3", "bob")).await.unwrap();

        assert_eq!(store.list_by_user("alice").await.unwrap().len(), 2);
        assert_eq!(store.list_by_user("bob").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_owned() {
        let (store, _temp) = create_test_store().await;

        let task = store.create(new_task("Mine", "alice")).await.unwrap();

        assert!(store.get_owned(task.id, "alice").await.unwrap().is_some());
        assert!(store.get_owned(task.id, "bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transition_skips_cancelled_task() {
        let (store, _temp) = create_test_store().await;

        let task = store.create(new_task("Run me", "alice")).await.unwrap();

        let running = store
            .transition(task.id, TaskTransition::Start)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(running.status, TaskStatus::Running);
        assert!(running.updated_at >= task.updated_at);
        assert!(store
            .transition(task.id, TaskTransition::Start)
            .await
            .unwrap()
            .is_none());

        store
            .transition(task.id, TaskTransition::Cancel)
            .await
            .unwrap()
            .unwrap();

        let finished = store
            .transition(task.id, TaskTransition::Complete(crate::Payload::new()))
            .await
            .unwrap();
        assert!(finished.is_none());
        let stored = store.get(task.id).await.unwrap().unwrap();
        assert_eq!(stored.status, TaskStatus::Cancelled);

        assert!(store
            .transition(Uuid::new_v4(), TaskTransition::Reset)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tasks.json");

        let task_id;

        {
            let store = FileTaskStore::new(&path).await.unwrap();
            let task = new_task("Persistent task", "alice").with_priority(TaskPriority::High);
            task_id = task.id;
            store.create(task).await.unwrap();
        }

        {
            let store = FileTaskStore::new(&path).await.unwrap();
            let task = store.get(task_id).await.unwrap().unwrap();
            assert_eq!(task.title, "Persistent task");
            assert_eq!(task.priority, TaskPriority::High);
        }
    }

    #[tokio::test]
    async fn test_duplicate_task_error() {
        let (store, _temp) = create_test_store().await;

        let task = new_task("Test task", "alice");
        store.create(task.clone()).await.unwrap();

        match store.create(task).await.unwrap_err() {
            Error::InvalidInput(msg) => assert!(msg.contains("already exists")),
            e => panic!("Expected InvalidInput error, got: {:?}", e),
        }
    }
}
