//! Agent module
//!
//! Persisted agent definitions. The runtime side (realizations and the
//! execution contract) lives in the `agent-runner` crate.

mod file_store;
mod model;
mod repository;

pub use file_store::FileAgentStore;
pub use model::*;
pub use repository::AgentRepository;
