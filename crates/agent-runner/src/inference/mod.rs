//! Model-backed inference services
//!
//! [`ModelService`] owns a [`ModelBackend`] and tracks which models are loaded.
//! The text and embedding services sit on top of it with a default model each.

mod backend;
mod embedding;
mod error;
mod service;
mod text;

pub use backend::{MockBackend, ModelBackend, ModelKind};
pub use embedding::{
    cosine_similarity, EmbeddingService, ScoredText, SimilarityRanking, DEFAULT_EMBEDDING_MODEL,
};
pub use error::InferenceError;
pub use service::{ModelService, DEFAULT_MODEL_CACHE_DIR};
pub use text::{ChatMessage, TextGenerationService, DEFAULT_MAX_LENGTH, DEFAULT_TEXT_MODEL};
