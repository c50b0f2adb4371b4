//! Root and health check endpoints

use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct RootResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: String,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Omnia AI Platform API",
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api", get(root))
        .route("/api/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{build_state, send};

    #[tokio::test]
    async fn root_and_health_respond() {
        let (state, _temp_dir) = build_state().await;
        let app = super::router().with_state(state);

        let (status, body) = send(&app, "GET", "/api", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Omnia AI Platform API");

        let (status, body) = send(&app, "GET", "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["timestamp"].is_string());
    }
}
