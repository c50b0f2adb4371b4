//! Agent execution contract
//!
//! An [`Agent`] supplies three lifecycle hooks. [`AgentRunner`] owns one agent
//! instance and drives a run through them:
//!
//! 1. take the running flag (concurrent runs are rejected, not queued)
//! 2. `initialize`, then `execute` against a fresh [`AgentContext`]
//! 3. stamp `completed_at`, call `shutdown`, release the flag
//!
//! Hook failures and panics never escape `run`; they become an error result.

mod cloud;
mod factory;
mod local;
mod registry;

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use omnia_core::Payload;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::context::AgentContext;
use crate::error::{guarded, HookError, RunError};
use crate::identity::Identity;

pub use cloud::CloudAgent;
pub use factory::AgentFactory;
pub use local::LocalAgent;
pub use registry::AgentRegistry;

/// Capability set of a runnable agent
#[async_trait]
pub trait Agent: Send + Sync {
    fn identity(&self) -> &Identity;

    /// Setup hook, called at the start of every run
    async fn initialize(&self) -> Result<(), HookError> {
        Ok(())
    }

    /// The unit of work
    async fn execute(&self, context: &AgentContext) -> Result<Payload, HookError>;

    /// Release hook, called once after every run whatever the outcome
    async fn shutdown(&self) -> Result<(), HookError> {
        Ok(())
    }
}

/// Outcome of a finished run, serialized either as the outputs mapping or as
/// `{"error": message}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentRunResult {
    Error { error: String },
    Success(Payload),
}

impl AgentRunResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// A finished run: the context it used and its result
#[derive(Debug, Clone, Serialize)]
pub struct AgentRun {
    pub context: AgentContext,
    pub result: AgentRunResult,
}

/// Clears the running flag on every exit path
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns an agent instance and serializes access to it
pub struct AgentRunner {
    agent: Box<dyn Agent>,
    running: AtomicBool,
}

impl AgentRunner {
    pub fn new(agent: Box<dyn Agent>) -> Self {
        Self {
            agent,
            running: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.agent.identity().id
    }

    pub fn name(&self) -> &str {
        &self.agent.identity().name
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run the agent once.
    ///
    /// Only fails when another run on this instance is in flight; every hook
    /// failure is reported through [`AgentRunResult::Error`].
    pub async fn run(
        &self,
        task_id: impl Into<String>,
        inputs: Payload,
        memory: Option<Payload>,
    ) -> Result<AgentRun, RunError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(RunError::AlreadyRunning {
                agent_id: self.id().to_string(),
            });
        }
        let _guard = RunningGuard(&self.running);

        let mut context = AgentContext::new(task_id, inputs, memory);
        info!("Agent {} starting task {}", self.id(), context.task_id);

        let outcome = match guarded("initialize", self.agent.initialize()).await {
            Ok(()) => guarded("execute", self.agent.execute(&context)).await,
            Err(e) => Err(e),
        };
        context.completed_at = Some(Utc::now());

        let result = match outcome {
            Ok(outputs) => {
                context.outputs = outputs.clone();
                debug!("Agent {} finished task {}", self.id(), context.task_id);
                AgentRunResult::Success(outputs)
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Agent {} failed task {}: {}", self.id(), context.task_id, message);
                context.error = Some(message.clone());
                AgentRunResult::Error { error: message }
            }
        };

        if let Err(e) = guarded("shutdown", self.agent.shutdown()).await {
            warn!("Agent {} shutdown failed: {}", self.id(), e);
        }

        Ok(AgentRun { context, result })
    }
}
