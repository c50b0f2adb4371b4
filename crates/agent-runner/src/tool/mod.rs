//! Tool execution contract
//!
//! Tools are stateless: each [`ToolRunner::run`] builds a fresh context with
//! its own execution id, and concurrent runs on one tool are allowed.

mod browser;
mod factory;
mod system;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use omnia_core::Payload;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::context::ToolContext;
use crate::error::{guarded, HookError};
use crate::identity::Identity;

pub use browser::BrowserTool;
pub use factory::ToolFactory;
pub use system::SystemTool;

/// Capability set of a runnable tool
#[async_trait]
pub trait Tool: Send + Sync {
    fn identity(&self) -> &Identity;

    async fn execute(&self, context: &ToolContext) -> Result<Payload, HookError>;
}

/// How a tool run ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    Success { outputs: Payload },
    Error { error: String },
}

/// Result of one tool run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEnvelope {
    pub tool_id: String,
    pub tool_name: String,
    pub execution_id: Uuid,
    #[serde(flatten)]
    pub outcome: ToolOutcome,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl ToolEnvelope {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ToolOutcome::Success { .. })
    }
}

/// Drives a tool through a single execution
pub struct ToolRunner {
    tool: Box<dyn Tool>,
}

impl ToolRunner {
    pub fn new(tool: Box<dyn Tool>) -> Self {
        Self { tool }
    }

    pub fn id(&self) -> &str {
        &self.tool.identity().id
    }

    pub fn name(&self) -> &str {
        &self.tool.identity().name
    }

    pub async fn run(&self, inputs: Payload) -> ToolEnvelope {
        let mut context = ToolContext::new(self.id(), inputs);
        debug!(
            "Running tool {} (execution {})",
            self.id(),
            context.execution_id
        );

        let result = guarded("execute", self.tool.execute(&context)).await;
        let completed_at = Utc::now();
        context.completed_at = Some(completed_at);

        let outcome = match result {
            Ok(outputs) => ToolOutcome::Success { outputs },
            Err(e) => {
                let message = e.to_string();
                warn!("Tool {} failed: {}", self.id(), message);
                context.error = Some(message.clone());
                ToolOutcome::Error { error: message }
            }
        };

        ToolEnvelope {
            tool_id: context.tool_id,
            tool_name: self.name().to_string(),
            execution_id: context.execution_id,
            outcome,
            started_at: context.started_at,
            completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct BrokenTool {
        identity: Identity,
    }

    #[async_trait]
    impl Tool for BrokenTool {
        fn identity(&self) -> &Identity {
            &self.identity
        }

        async fn execute(&self, _context: &ToolContext) -> Result<Payload, HookError> {
            Err(HookError::failed("driver not installed"))
        }
    }

    fn broken() -> ToolRunner {
        ToolRunner::new(Box::new(BrokenTool {
            identity: Identity::new("t9", "Broken", Payload::new()),
        }))
    }

    #[tokio::test]
    async fn test_failure_envelope() {
        let envelope = broken().run(Payload::new()).await;

        assert_eq!(envelope.tool_id, "t9");
        assert_eq!(envelope.tool_name, "Broken");
        assert_eq!(
            envelope.outcome,
            ToolOutcome::Error {
                error: "driver not installed".to_string()
            }
        );
        assert!(envelope.completed_at >= envelope.started_at);

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "driver not installed");
        assert!(value.get("outputs").is_none());
    }

    #[tokio::test]
    async fn test_execution_ids_are_unique() {
        let runner = broken();
        let first = runner.run(Payload::new()).await;
        let second = runner.run(Payload::new()).await;

        assert_ne!(first.execution_id, second.execution_id);
        assert_ne!(first.execution_id.to_string(), first.tool_id);
    }

    #[test]
    fn test_success_envelope_shape() {
        let now = Utc::now();
        let envelope = ToolEnvelope {
            tool_id: "t1".to_string(),
            tool_name: "Browser".to_string(),
            execution_id: Uuid::new_v4(),
            outcome: ToolOutcome::Success {
                outputs: Payload::new(),
            },
            started_at: now,
            completed_at: now,
        };

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["outputs"], json!({}));
        assert!(value.get("error").is_none());
    }
}
