use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use super::{InferenceError, MockBackend, ModelBackend, ModelKind};

/// Where model weights are cached when nothing else is configured
pub const DEFAULT_MODEL_CACHE_DIR: &str = "/tmp/omnia_ai/models";

/// Loads models on a backend and routes requests to them.
///
/// Constructed once at startup and shared by reference; there is no global
/// instance.
pub struct ModelService {
    backend: Arc<dyn ModelBackend>,
    cache_dir: PathBuf,
    loaded: RwLock<HashMap<String, ModelKind>>,
}

impl ModelService {
    pub fn new(backend: Arc<dyn ModelBackend>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            cache_dir: cache_dir.into(),
            loaded: RwLock::new(HashMap::new()),
        }
    }

    /// Service over [`MockBackend`]
    pub fn mock(cache_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(MockBackend), cache_dir)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Create the cache directory
    pub async fn initialize(&self) -> Result<(), InferenceError> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        info!("Model cache at {}", self.cache_dir.display());
        Ok(())
    }

    /// Load a model. Loading an already loaded model is a no-op.
    pub async fn load_model(&self, model_id: &str, kind: ModelKind) -> Result<(), InferenceError> {
        if self.loaded.read().await.contains_key(model_id) {
            info!("Model {} already loaded", model_id);
            return Ok(());
        }

        info!("Loading model {} of type {}", model_id, kind);
        if let Err(e) = self.backend.load(model_id, kind).await {
            error!("Error loading model {}: {}", model_id, e);
            return Err(e);
        }
        self.loaded.write().await.insert(model_id.to_string(), kind);
        Ok(())
    }

    pub async fn is_loaded(&self, model_id: &str) -> bool {
        self.loaded.read().await.contains_key(model_id)
    }

    async fn require(&self, model_id: &str, kind: ModelKind) -> Result<(), InferenceError> {
        match self.loaded.read().await.get(model_id) {
            Some(loaded) if *loaded == kind => Ok(()),
            _ => {
                error!("Model {} not loaded", model_id);
                Err(InferenceError::ModelNotLoaded {
                    model_id: model_id.to_string(),
                })
            }
        }
    }

    pub async fn generate_text(
        &self,
        model_id: &str,
        prompt: &str,
        max_length: usize,
    ) -> Result<String, InferenceError> {
        self.require(model_id, ModelKind::CausalLm).await?;
        self.backend.generate(model_id, prompt, max_length).await
    }

    pub async fn embed(&self, model_id: &str, texts: &[String]) -> Result<Vec<Vec<f32>>, InferenceError> {
        self.require(model_id, ModelKind::Embedding).await?;
        self.backend.embed(model_id, texts).await
    }

    /// Unload every model
    pub async fn shutdown(&self) {
        let mut loaded = self.loaded.write().await;
        info!("Unloading {} model(s)", loaded.len());
        loaded.clear();
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_initialize_creates_cache_dir() {
        let temp_dir = TempDir::new().unwrap();
        let cache_dir = temp_dir.path().join("models").join("nested");
        let service = ModelService::mock(&cache_dir);

        service.initialize().await.unwrap();

        assert!(cache_dir.is_dir());
        assert_eq!(service.cache_dir(), cache_dir.as_path());
    }

    #[tokio::test]
    async fn test_generation_requires_loaded_model() {
        let service = ModelService::mock("/tmp/unused");

        match service.generate_text("gpt2", "hi", 10).await {
            Err(InferenceError::ModelNotLoaded { model_id }) => assert_eq!(model_id, "gpt2"),
            other => panic!("Expected ModelNotLoaded, got: {:?}", other),
        }

        service.load_model("gpt2", ModelKind::CausalLm).await.unwrap();
        service.load_model("gpt2", ModelKind::CausalLm).await.unwrap();
        let text = service.generate_text("gpt2", "hi", 10).await.unwrap();
        assert_eq!(text, MockBackend::RESPONSE);
    }

    #[tokio::test]
    async fn test_kinds_are_not_interchangeable() {
        let service = ModelService::mock("/tmp/unused");
        service.load_model("minilm", ModelKind::Embedding).await.unwrap();

        assert!(service.generate_text("minilm", "hi", 10).await.is_err());
        assert!(service.embed("minilm", &["hi".to_string()]).await.is_ok());
    }

    #[tokio::test]
    async fn test_shutdown_unloads_everything() {
        let service = ModelService::mock("/tmp/unused");
        service.load_model("gpt2", ModelKind::CausalLm).await.unwrap();
        assert!(service.is_loaded("gpt2").await);

        service.shutdown().await;

        assert!(!service.is_loaded("gpt2").await);
    }
}
