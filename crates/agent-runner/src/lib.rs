//! Agent Runner - execution contract for platform agents and tools
//!
//! This crate provides:
//! - The [`Agent`] lifecycle (initialize / execute / shutdown) driven by a
//!   reentrancy-guarded [`AgentRunner`]
//! - The stateless [`Tool`] contract and its [`ToolEnvelope`] result
//! - Factories mapping type tags to concrete realizations
//! - Model-backed inference services

mod agent;
mod command;
mod context;
mod error;
mod identity;
pub mod inference;
mod resolution;
mod tool;

pub use agent::{
    Agent, AgentFactory, AgentRegistry, AgentRun, AgentRunResult, AgentRunner, CloudAgent,
    LocalAgent,
};
pub use command::SIMULATED_LATENCY_KEY;
pub use context::{AgentContext, ToolContext};
pub use error::{HookError, RunError};
pub use identity::Identity;
pub use inference::InferenceError;
pub use resolution::Resolution;
pub use tool::{BrowserTool, SystemTool, Tool, ToolEnvelope, ToolFactory, ToolOutcome, ToolRunner};
