use async_trait::async_trait;
use omnia_core::Payload;
use serde_json::json;
use tracing::info;

use crate::command::{payload, simulate_latency, timestamp};
use crate::context::AgentContext;
use crate::error::HookError;
use crate::identity::Identity;

use super::Agent;

/// Agent that runs on the user's machine
pub struct LocalAgent {
    identity: Identity,
}

impl LocalAgent {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl Agent for LocalAgent {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    async fn initialize(&self) -> Result<(), HookError> {
        info!("Initializing local agent {}", self.identity.name);
        Ok(())
    }

    async fn execute(&self, context: &AgentContext) -> Result<Payload, HookError> {
        info!(
            "Executing local agent {} for task {}",
            self.identity.name, context.task_id
        );
        simulate_latency(&self.identity).await;

        Ok(payload(json!({
            "result": format!("Processed by local agent {}", self.identity.name),
            "inputs": context.inputs,
            "environment": "local",
            "timestamp": timestamp(),
        })))
    }

    async fn shutdown(&self) -> Result<(), HookError> {
        info!("Shutting down local agent {}", self.identity.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_agent_reports_environment() {
        let agent = LocalAgent::new(Identity::new("a2", "Desk", Payload::new()));
        let context = AgentContext::new("task-1", Payload::new(), None);

        let outputs = agent.execute(&context).await.unwrap();

        assert_eq!(outputs["result"], "Processed by local agent Desk");
        assert_eq!(outputs["environment"], "local");
        assert_eq!(outputs["inputs"], json!({}));
    }
}
