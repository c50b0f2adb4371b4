use thiserror::Error;

/// Errors from the inference services
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model {model_id} not loaded")]
    ModelNotLoaded { model_id: String },

    #[error("Unsupported model type: {0}")]
    UnsupportedModelType(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
