//! Client status checks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::document::{Document, FileCollection};
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

impl Document for StatusCheck {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn touch(&mut self, _now: DateTime<Utc>) {}
}

/// Append-only store of status checks
pub struct StatusCheckStore {
    collection: FileCollection<StatusCheck>,
}

impl StatusCheckStore {
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            collection: FileCollection::open(path).await?,
        })
    }

    pub async fn record(&self, client_name: &str) -> Result<StatusCheck> {
        self.collection.insert(StatusCheck::new(client_name)).await
    }

    /// Most recent checks first, capped at `limit`
    pub async fn list(&self, limit: usize) -> Vec<StatusCheck> {
        let mut checks = self.collection.list().await;
        checks.truncate(limit);
        checks
    }
}
