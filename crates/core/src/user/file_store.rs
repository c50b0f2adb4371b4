//! File-based user storage

use async_trait::async_trait;
use std::path::PathBuf;

use super::model::UserAccount;
use crate::document::FileCollection;
use crate::{Error, Result};

/// Repository interface for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user, rejecting a taken username
    async fn create(&self, user: UserAccount) -> Result<UserAccount>;

    /// Look a user up by username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>>;
}

/// User accounts stored as a JSON collection
pub struct FileUserStore {
    collection: FileCollection<UserAccount>,
}

impl FileUserStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            collection: FileCollection::open(path).await?,
        })
    }
}

#[async_trait]
impl UserRepository for FileUserStore {
    async fn create(&self, user: UserAccount) -> Result<UserAccount> {
        let username = user.username.clone();
        if self
            .collection
            .find_one(|existing| existing.username == username)
            .await
            .is_some()
        {
            return Err(Error::Conflict("Username already registered".to_string()));
        }
        self.collection.insert(user).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>> {
        Ok(self
            .collection
            .find_one(|user| user.username == username)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_username_is_unique() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileUserStore::new(temp_dir.path().join("users.json"))
            .await
            .unwrap();

        store
            .create(UserAccount::new("a@example.com", "alice", None, "hash"))
            .await
            .unwrap();

        let duplicate = store
            .create(UserAccount::new("other@example.com", "alice", None, "hash"))
            .await;
        assert!(matches!(duplicate, Err(Error::Conflict(_))));

        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.email, "a@example.com");
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }
}
