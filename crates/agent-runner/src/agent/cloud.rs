use async_trait::async_trait;
use omnia_core::Payload;
use serde_json::json;
use tracing::info;

use crate::command::{payload, simulate_latency, timestamp};
use crate::context::AgentContext;
use crate::error::HookError;
use crate::identity::Identity;

use super::Agent;

/// Agent backed by a hosted model provider
pub struct CloudAgent {
    identity: Identity,
}

impl CloudAgent {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl Agent for CloudAgent {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    async fn initialize(&self) -> Result<(), HookError> {
        info!("Initializing cloud agent {}", self.identity.name);
        Ok(())
    }

    async fn execute(&self, context: &AgentContext) -> Result<Payload, HookError> {
        info!(
            "Executing cloud agent {} for task {}",
            self.identity.name, context.task_id
        );
        simulate_latency(&self.identity).await;

        Ok(payload(json!({
            "result": format!("Processed by cloud agent {}", self.identity.name),
            "inputs": context.inputs,
            "timestamp": timestamp(),
        })))
    }

    async fn shutdown(&self) -> Result<(), HookError> {
        info!("Shutting down cloud agent {}", self.identity.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentRunner;
    use crate::agent::AgentRunResult;

    #[tokio::test]
    async fn test_cloud_agent_echoes_inputs() {
        let agent = CloudAgent::new(Identity::new("a1", "Scout", Payload::new()));
        let runner = AgentRunner::new(Box::new(agent));

        let inputs = payload(json!({ "question": "status?" }));
        let run = runner.run("task-9", inputs.clone(), None).await.unwrap();

        match run.result {
            AgentRunResult::Success(outputs) => {
                assert_eq!(outputs["result"], "Processed by cloud agent Scout");
                assert_eq!(outputs["inputs"], json!(inputs));
                assert!(outputs["timestamp"].is_string());
                assert!(outputs.get("environment").is_none());
            }
            other => panic!("Expected success, got: {:?}", other),
        }
    }
}
