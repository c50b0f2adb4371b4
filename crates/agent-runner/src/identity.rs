//! Identity shared by every agent and tool realization

use omnia_core::Payload;
use serde::{Deserialize, Serialize};

/// Who a realization is: its id, display name and opaque configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub config: Payload,
}

impl Identity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, config: Payload) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            config,
        }
    }

    /// Read an unsigned integer config value
    pub fn config_u64(&self, key: &str) -> Option<u64> {
        self.config.get(key).and_then(serde_json::Value::as_u64)
    }
}
