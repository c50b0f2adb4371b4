use omnia_core::agent::AgentType;
use omnia_core::Payload;

use crate::identity::Identity;
use crate::resolution::Resolution;

use super::{Agent, CloudAgent, LocalAgent};

/// Maps agent type tags to realizations
pub struct AgentFactory;

impl AgentFactory {
    /// Resolve a type tag such as `"cloud"` into an agent
    pub fn resolve(
        agent_type: &str,
        id: impl Into<String>,
        name: impl Into<String>,
        config: Payload,
    ) -> Resolution<Box<dyn Agent>> {
        match agent_type.parse::<AgentType>() {
            Ok(agent_type) => Self::resolve_type(agent_type, id, name, config),
            Err(_) => Resolution::Unrecognized(agent_type.to_string()),
        }
    }

    pub fn resolve_type(
        agent_type: AgentType,
        id: impl Into<String>,
        name: impl Into<String>,
        config: Payload,
    ) -> Resolution<Box<dyn Agent>> {
        let identity = Identity::new(id, name, config);
        match agent_type {
            AgentType::Cloud => Resolution::Ready(Box::new(CloudAgent::new(identity))),
            AgentType::Local => Resolution::Ready(Box::new(LocalAgent::new(identity))),
            AgentType::Hybrid => Resolution::Fallback {
                instance: Box::new(CloudAgent::new(identity)),
                requested: AgentType::Hybrid.as_str(),
                used: AgentType::Cloud.as_str(),
            },
        }
    }

    /// Create an agent, logging when the type has no realization of its own
    pub fn create(
        agent_type: &str,
        id: impl Into<String>,
        name: impl Into<String>,
        config: Payload,
    ) -> Option<Box<dyn Agent>> {
        Self::resolve(agent_type, id, name, config).into_logged("agent")
    }

    pub fn create_for(
        agent_type: AgentType,
        id: impl Into<String>,
        name: impl Into<String>,
        config: Payload,
    ) -> Option<Box<dyn Agent>> {
        Self::resolve_type(agent_type, id, name, config).into_logged("agent")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{AgentRunResult, AgentRunner};

    #[test]
    fn test_known_types_resolve() {
        for tag in ["cloud", "local", "Cloud"] {
            let resolution = AgentFactory::resolve(tag, "a1", "Agent", Payload::new());
            assert!(matches!(resolution, Resolution::Ready(_)), "{tag}");
        }
    }

    #[tokio::test]
    async fn test_hybrid_falls_back_to_cloud() {
        match AgentFactory::resolve("hybrid", "a1", "Mixer", Payload::new()) {
            Resolution::Fallback { requested, used, .. } => {
                assert_eq!(requested, "hybrid");
                assert_eq!(used, "cloud");
            }
            other => panic!("Expected fallback, got: {:?}", other.is_available()),
        }

        let agent = AgentFactory::create_for(AgentType::Hybrid, "a1", "Mixer", Payload::new())
            .expect("hybrid agents fall back to cloud");
        assert_eq!(agent.identity().id, "a1");

        let run = AgentRunner::new(agent)
            .run("task-1", Payload::new(), None)
            .await
            .unwrap();
        match run.result {
            AgentRunResult::Success(outputs) => {
                assert_eq!(outputs["result"], "Processed by cloud agent Mixer")
            }
            other => panic!("Expected success, got: {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_type_yields_nothing() {
        assert!(AgentFactory::create("quantum", "a1", "Agent", Payload::new()).is_none());
        assert!(matches!(
            AgentFactory::resolve("quantum", "a1", "Agent", Payload::new()),
            Resolution::Unrecognized(tag) if tag == "quantum"
        ));
    }
}
