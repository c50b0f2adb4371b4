//! File-backed document collection
//!
//! Every persisted record kind lives in its own JSON file. The whole file is
//! loaded into an in-memory cache on open and rewritten after each mutation.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::{Error, Result};

/// A record that can be stored in a [`FileCollection`]
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Primary key
    fn id(&self) -> Uuid;

    /// Creation time, used for ordering listings
    fn created_at(&self) -> DateTime<Utc>;

    /// Stamp the last-modified time
    fn touch(&mut self, now: DateTime<Utc>);
}

/// JSON file holding every document of one kind
pub struct FileCollection<T> {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory cache of documents
    cache: RwLock<HashMap<Uuid, T>>,
}

impl<T: Document> FileCollection<T> {
    /// Open a collection, loading the file if it exists.
    ///
    /// The file is created on first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                HashMap::new()
            } else {
                let docs: Vec<T> = serde_json::from_str(&content)?;
                docs.into_iter().map(|d| (d.id(), d)).collect()
            }
        } else {
            HashMap::new()
        };

        debug!("Opened collection {:?} with {} documents", path, cache.len());

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the cache to disk
    async fn persist(&self) -> Result<()> {
        let cache = self.cache.read().await;
        let docs: Vec<&T> = cache.values().collect();
        let content = serde_json::to_string_pretty(&docs)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Insert a new document, rejecting duplicate ids
    pub async fn insert(&self, doc: T) -> Result<T> {
        {
            let mut cache = self.cache.write().await;
            if cache.contains_key(&doc.id()) {
                return Err(Error::Conflict(format!(
                    "Document with ID {} already exists",
                    doc.id()
                )));
            }
            cache.insert(doc.id(), doc.clone());
        }
        self.persist().await?;
        Ok(doc)
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        let cache = self.cache.read().await;
        cache.get(&id).cloned()
    }

    /// First document matching the predicate
    pub async fn find_one<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        let cache = self.cache.read().await;
        cache.values().find(|d| predicate(d)).cloned()
    }

    /// All documents matching the predicate, newest first
    pub async fn find<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let cache = self.cache.read().await;
        let mut docs: Vec<T> = cache.values().filter(|d| predicate(d)).cloned().collect();
        docs.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        docs
    }

    pub async fn list(&self) -> Vec<T> {
        self.find(|_| true).await
    }

    /// Apply an in-place mutation if the stored document satisfies `guard`.
    ///
    /// The check and the write happen under one lock. Returns `None` when the
    /// id is unknown or the guard rejects the stored document.
    pub async fn update_if<G, F>(&self, id: Uuid, guard: G, apply: F) -> Result<Option<T>>
    where
        G: FnOnce(&T) -> bool,
        F: FnOnce(&mut T),
    {
        let updated = {
            let mut cache = self.cache.write().await;
            match cache.get_mut(&id) {
                Some(doc) => {
                    if guard(&*doc) {
                        apply(doc);
                        doc.touch(Utc::now());
                        Some(doc.clone())
                    } else {
                        None
                    }
                }
                None => None,
            }
        };
        if updated.is_some() {
            self.persist().await?;
        }
        Ok(updated)
    }

    pub async fn remove(&self, id: Uuid) -> Result<bool> {
        let removed = {
            let mut cache = self.cache.write().await;
            cache.remove(&id).is_some()
        };
        if removed {
            self.persist().await?;
        }
        Ok(removed)
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }
}
