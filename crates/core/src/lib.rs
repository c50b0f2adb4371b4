//! Core library for the Omnia platform backend
//!
//! This crate contains the persisted domain model, including:
//! - Agent and tool definitions
//! - Tasks assigned to agents
//! - User accounts and status checks
//! - The file-backed document collection they are stored in

pub mod agent;
pub mod document;
pub mod error;
pub mod status;
pub mod task;
pub mod tool;
pub mod user;

pub use document::{Document, FileCollection};
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Free-form JSON mapping used for inputs, outputs, memory and config.
pub type Payload = serde_json::Map<String, serde_json::Value>;
