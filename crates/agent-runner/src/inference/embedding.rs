use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{InferenceError, ModelKind, ModelService};

pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Cosine similarity of two vectors; `0.0` when either has zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let norm_a = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredText {
    pub text: String,
    pub score: f64,
}

/// Candidates ranked by similarity to a query, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRanking {
    pub most_similar: Option<String>,
    pub score: f64,
    pub all_scores: Vec<ScoredText>,
}

/// Embeddings on a single sentence model
pub struct EmbeddingService {
    models: Arc<ModelService>,
    model_id: String,
}

impl EmbeddingService {
    pub fn new(models: Arc<ModelService>) -> Self {
        Self::with_model(models, DEFAULT_EMBEDDING_MODEL)
    }

    pub fn with_model(models: Arc<ModelService>, model_id: impl Into<String>) -> Self {
        Self {
            models,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub async fn initialize(&self) -> Result<(), InferenceError> {
        self.models.load_model(&self.model_id, ModelKind::Embedding).await
    }

    pub async fn get_embedding(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        self.get_embeddings(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| InferenceError::Backend("backend returned no embedding".to_string()))
    }

    pub async fn get_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, InferenceError> {
        self.models.embed(&self.model_id, texts).await
    }

    pub async fn compute_similarity(&self, text1: &str, text2: &str) -> Result<f64, InferenceError> {
        let first = self.get_embedding(text1).await?;
        let second = self.get_embedding(text2).await?;
        Ok(cosine_similarity(&first, &second))
    }

    pub async fn find_most_similar(
        &self,
        query: &str,
        candidates: &[String],
    ) -> Result<SimilarityRanking, InferenceError> {
        let query_embedding = self.get_embedding(query).await?;
        let candidate_embeddings = if candidates.is_empty() {
            Vec::new()
        } else {
            self.get_embeddings(candidates).await?
        };

        let mut all_scores: Vec<ScoredText> = candidates
            .iter()
            .zip(&candidate_embeddings)
            .map(|(text, embedding)| ScoredText {
                text: text.clone(),
                score: cosine_similarity(&query_embedding, embedding),
            })
            .collect();
        all_scores.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(SimilarityRanking {
            most_similar: all_scores.first().map(|best| best.text.clone()),
            score: all_scores.first().map_or(0.0, |best| best.score),
            all_scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).abs() < 1e-9);
        assert!((cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]) + 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    async fn service() -> EmbeddingService {
        let service = EmbeddingService::new(Arc::new(ModelService::mock("/tmp/unused")));
        service.initialize().await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_identical_mock_embeddings_are_similar() {
        let similarity = service().await.compute_similarity("cat", "dog").await.unwrap();
        assert!((similarity - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_find_most_similar() {
        let service = service().await;
        let candidates = vec!["alpha".to_string(), "beta".to_string()];

        let ranking = service.find_most_similar("query", &candidates).await.unwrap();

        assert_eq!(ranking.all_scores.len(), 2);
        assert!(ranking.most_similar.is_some());
        assert!((ranking.score - 1.0).abs() < 1e-6);

        let empty = service.find_most_similar("query", &[]).await.unwrap();
        assert_eq!(empty.most_similar, None);
        assert_eq!(empty.score, 0.0);
        assert!(empty.all_scores.is_empty());
    }

    #[tokio::test]
    async fn test_requires_initialize() {
        let service = EmbeddingService::new(Arc::new(ModelService::mock("/tmp/unused")));
        assert!(matches!(
            service.get_embedding("x").await,
            Err(InferenceError::ModelNotLoaded { .. })
        ));
    }
}
