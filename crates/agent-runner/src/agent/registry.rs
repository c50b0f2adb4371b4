use std::collections::HashMap;
use std::sync::Arc;

use omnia_core::agent::AgentDefinition;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{AgentFactory, AgentRunner};

/// Long-lived runners, one per agent id, so a running agent stays guarded
/// across callers
#[derive(Default)]
pub struct AgentRegistry {
    runners: RwLock<HashMap<String, Arc<AgentRunner>>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner for `definition`, built through the factory on first use.
    /// Returns `None` when the agent type has no realization.
    pub async fn get_or_create(&self, definition: &AgentDefinition) -> Option<Arc<AgentRunner>> {
        let id = definition.id.to_string();
        if let Some(runner) = self.runners.read().await.get(&id) {
            return Some(runner.clone());
        }

        let mut runners = self.runners.write().await;
        if let Some(runner) = runners.get(&id) {
            return Some(runner.clone());
        }

        let agent = AgentFactory::create_for(
            definition.agent_type,
            id.clone(),
            definition.name.clone(),
            definition.config.clone(),
        )?;
        info!("Registered runner for agent {} ({})", definition.name, id);
        let runner = Arc::new(AgentRunner::new(agent));
        runners.insert(id, runner.clone());
        Some(runner)
    }

    /// Drop the cached runner for an agent. An in-flight run keeps its own
    /// reference and finishes normally.
    pub async fn evict(&self, agent_id: &str) -> bool {
        let removed = self.runners.write().await.remove(agent_id).is_some();
        if removed {
            debug!("Evicted runner for agent {}", agent_id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.runners.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.runners.read().await.is_empty()
    }
}
