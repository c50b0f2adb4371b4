//! Per-invocation execution contexts

use chrono::{DateTime, Utc};
use omnia_core::Payload;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State of a single agent run. Owned by exactly one `AgentRunner::run` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentContext {
    pub task_id: String,
    pub inputs: Payload,
    pub memory: Payload,
    pub outputs: Payload,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl AgentContext {
    pub fn new(task_id: impl Into<String>, inputs: Payload, memory: Option<Payload>) -> Self {
        Self {
            task_id: task_id.into(),
            inputs,
            memory: memory.unwrap_or_default(),
            outputs: Payload::new(),
            started_at: Utc::now(),
            completed_at: None,
            error: None,
        }
    }

    /// Whether the run has exited
    pub fn is_finished(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// State of a single tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolContext {
    pub tool_id: String,
    pub inputs: Payload,
    pub execution_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl ToolContext {
    /// Create a context with a fresh execution id
    pub fn new(tool_id: impl Into<String>, inputs: Payload) -> Self {
        Self {
            tool_id: tool_id.into(),
            inputs,
            execution_id: Uuid::new_v4(),
            started_at: Utc::now(),
            completed_at: None,
            error: None,
        }
    }
}
