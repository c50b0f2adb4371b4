//! Tool module
//!
//! Persisted tool definitions, shared across users.

mod file_store;
mod model;
mod repository;

pub use file_store::FileToolStore;
pub use model::*;
pub use repository::ToolRepository;
