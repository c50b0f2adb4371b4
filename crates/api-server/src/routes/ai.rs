//! Text generation and similarity endpoints

use agent_runner::inference::DEFAULT_MAX_LENGTH;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::{route_error, RouteError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct GenerateTextRequest {
    prompt: String,
    #[serde(default = "default_max_length")]
    max_length: usize,
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

#[derive(Debug, Serialize)]
struct GenerateTextResponse {
    text: String,
    model_id: String,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct SimilarityRequest {
    text1: String,
    text2: String,
}

#[derive(Debug, Serialize)]
struct SimilarityResponse {
    similarity: f64,
    model_id: String,
    timestamp: String,
}

async fn generate_text(
    State(state): State<AppState>,
    Json(req): Json<GenerateTextRequest>,
) -> Result<Json<GenerateTextResponse>, RouteError> {
    let service = state.text_generation();
    let text = async {
        service.initialize().await?;
        service.generate_text(&req.prompt, req.max_length).await
    }
    .await
    .map_err(|e| {
        error!("Text generation failed: {}", e);
        route_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate text")
    })?;

    Ok(Json(GenerateTextResponse {
        text,
        model_id: service.model_id().to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

async fn compute_similarity(
    State(state): State<AppState>,
    Json(req): Json<SimilarityRequest>,
) -> Result<Json<SimilarityResponse>, RouteError> {
    let service = state.embeddings();
    let similarity = async {
        service.initialize().await?;
        service.compute_similarity(&req.text1, &req.text2).await
    }
    .await
    .map_err(|e| {
        error!("Similarity computation failed: {}", e);
        route_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to compute similarity")
    })?;

    Ok(Json(SimilarityResponse {
        similarity,
        model_id: service.model_id().to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ai/generate", post(generate_text))
        .route("/api/ai/similarity", post(compute_similarity))
}
