use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::InferenceError;

/// Kind of model a backend can load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    CausalLm,
    Embedding,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CausalLm => "causal_lm",
            Self::Embedding => "embedding",
        }
    }
}

impl FromStr for ModelKind {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "causal_lm" => Ok(Self::CausalLm),
            "embedding" => Ok(Self::Embedding),
            other => Err(InferenceError::UnsupportedModelType(other.to_string())),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that can actually run models
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Prepare `model_id` for use
    async fn load(&self, model_id: &str, kind: ModelKind) -> Result<(), InferenceError>;

    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        max_length: usize,
    ) -> Result<String, InferenceError>;

    /// One embedding per input text
    async fn embed(&self, model_id: &str, texts: &[String]) -> Result<Vec<Vec<f32>>, InferenceError>;
}

/// Fixed-output backend used until real weights are wired in
#[derive(Debug, Default, Clone)]
pub struct MockBackend;

impl MockBackend {
    pub const RESPONSE: &'static str = "This is a mock response from Omnia AI.";
    pub const EMBEDDING: [f32; 5] = [0.1, 0.2, 0.3, 0.4, 0.5];
}

#[async_trait]
impl ModelBackend for MockBackend {
    async fn load(&self, _model_id: &str, _kind: ModelKind) -> Result<(), InferenceError> {
        Ok(())
    }

    async fn generate(
        &self,
        _model_id: &str,
        _prompt: &str,
        _max_length: usize,
    ) -> Result<String, InferenceError> {
        Ok(Self::RESPONSE.to_string())
    }

    async fn embed(&self, _model_id: &str, texts: &[String]) -> Result<Vec<Vec<f32>>, InferenceError> {
        Ok(texts.iter().map(|_| Self::EMBEDDING.to_vec()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_parsing() {
        assert_eq!("causal_lm".parse::<ModelKind>().unwrap(), ModelKind::CausalLm);
        assert_eq!("embedding".parse::<ModelKind>().unwrap(), ModelKind::Embedding);
        let err = "diffusion".parse::<ModelKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported model type: diffusion");
    }

    #[tokio::test]
    async fn test_mock_embeds_every_text() {
        let texts = vec!["a".to_string(), "b".to_string()];
        let embeddings = MockBackend.embed("m", &texts).await.unwrap();
        assert_eq!(embeddings.len(), 2);
        assert_eq!(embeddings[1], MockBackend::EMBEDDING.to_vec());
    }
}
