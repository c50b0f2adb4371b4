//! Agent definitions and agent runs

use agent_runner::{AgentRunResult, RunError};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use omnia_core::agent::{AgentCapability, AgentDefinition, AgentRepository, AgentType};
use omnia_core::Payload;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::{bad_request, current_user, map_core_error, not_found, route_error, RouteError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateAgentRequest {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type")]
    agent_type: AgentType,
    #[serde(default)]
    capabilities: Vec<AgentCapability>,
    #[serde(default)]
    config: Payload,
}

#[derive(Debug, Deserialize)]
struct RunAgentRequest {
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    inputs: Payload,
    #[serde(default)]
    memory: Option<Payload>,
}

fn agent_not_found() -> RouteError {
    not_found("Agent not found")
}

/// Map a run attempt onto a response
pub(crate) fn run_error(err: RunError) -> RouteError {
    match err {
        RunError::AlreadyRunning { .. } => route_error(StatusCode::CONFLICT, err.to_string()),
    }
}

pub(crate) fn no_realization(agent_type: AgentType) -> RouteError {
    route_error(
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("No realization for agent type {}", agent_type),
    )
}

async fn create_agent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateAgentRequest>,
) -> Result<(StatusCode, Json<AgentDefinition>), RouteError> {
    let user = current_user(&state, &headers).await?;
    if req.name.trim().is_empty() {
        return Err(bad_request("Name cannot be empty"));
    }

    let mut agent = AgentDefinition::new(req.name, req.agent_type, user.username)
        .with_capabilities(req.capabilities)
        .with_config(req.config);
    if let Some(description) = req.description {
        agent = agent.with_description(description);
    }

    let created = state
        .agent_store()
        .create(agent)
        .await
        .map_err(map_core_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_agents(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<AgentDefinition>>, RouteError> {
    let user = current_user(&state, &headers).await?;
    let agents = state
        .agent_store()
        .list_by_owner(&user.username)
        .await
        .map_err(map_core_error)?;
    Ok(Json(agents))
}

async fn get_agent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<AgentDefinition>, RouteError> {
    let user = current_user(&state, &headers).await?;
    state
        .agent_store()
        .get_owned(id, &user.username)
        .await
        .map_err(map_core_error)?
        .map(Json)
        .ok_or_else(agent_not_found)
}

/// DELETE /api/agents/{id} - Delete an agent, returning the removed definition
async fn delete_agent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<AgentDefinition>, RouteError> {
    let user = current_user(&state, &headers).await?;
    let agent = state
        .agent_store()
        .get_owned(id, &user.username)
        .await
        .map_err(map_core_error)?
        .ok_or_else(agent_not_found)?;

    state
        .agent_store()
        .delete(id)
        .await
        .map_err(map_core_error)?;
    state.runners().evict(&id.to_string()).await;
    info!("Deleted agent {}", id);

    Ok(Json(agent))
}

async fn run_agent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<RunAgentRequest>,
) -> Result<Json<AgentRunResult>, RouteError> {
    let user = current_user(&state, &headers).await?;
    let agent = state
        .agent_store()
        .get_owned(id, &user.username)
        .await
        .map_err(map_core_error)?
        .ok_or_else(agent_not_found)?;

    let runner = state
        .runners()
        .get_or_create(&agent)
        .await
        .ok_or_else(|| no_realization(agent.agent_type))?;

    let task_id = req.task_id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let run = runner
        .run(task_id, req.inputs, req.memory)
        .await
        .map_err(run_error)?;

    Ok(Json(run.result))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/agents", get(list_agents).post(create_agent))
        .route("/api/agents/{id}", get(get_agent).delete(delete_agent))
        .route("/api/agents/{id}/run", post(run_agent))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{build_state, login, send};

    #[tokio::test]
    async fn agents_require_authentication() {
        let (state, _temp_dir) = build_state().await;
        let app = super::router().with_state(state);

        let (status, _) = send(&app, "GET", "/api/agents", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(&app, "GET", "/api/agents", Some("not-a-jwt"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Could not validate credentials");
    }

    #[tokio::test]
    async fn create_list_get_delete() {
        let (state, _temp_dir) = build_state().await;
        let token = login(&state, "ada").await;
        let other = login(&state, "bob").await;
        let app = super::router().with_state(state);

        let (status, agent) = send(
            &app,
            "POST",
            "/api/agents",
            Some(&token),
            Some(json!({
                "name": "Scout",
                "type": "cloud",
                "capabilities": ["text_generation", "web_browsing"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(agent["owner_id"], "ada");
        assert_eq!(agent["type"], "cloud");
        let uri = format!("/api/agents/{}", agent["id"].as_str().unwrap());

        let (_, listed) = send(&app, "GET", "/api/agents", Some(&token), None).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "GET", &uri, Some(&other), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, fetched) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Scout");

        let (status, deleted) = send(&app, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["id"], agent["id"]);

        let (status, body) = send(&app, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Agent not found");
    }

    #[tokio::test]
    async fn run_returns_outputs() {
        let (state, _temp_dir) = build_state().await;
        let token = login(&state, "ada").await;
        let app = super::router().with_state(state);

        let (_, agent) = send(
            &app,
            "POST",
            "/api/agents",
            Some(&token),
            Some(json!({ "name": "Desk", "type": "local" })),
        )
        .await;
        let uri = format!("/api/agents/{}/run", agent["id"].as_str().unwrap());

        let (status, result) = send(
            &app,
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "inputs": { "question": "ping" } })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["result"], "Processed by local agent Desk");
        assert_eq!(result["environment"], "local");
        assert_eq!(result["inputs"]["question"], "ping");
    }

    #[tokio::test]
    async fn run_unknown_agent_is_not_found() {
        let (state, _temp_dir) = build_state().await;
        let token = login(&state, "ada").await;
        let app = super::router().with_state(state);

        let uri = format!("/api/agents/{}/run", uuid::Uuid::new_v4());
        let (status, _) = send(&app, "POST", &uri, Some(&token), Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn concurrent_run_is_conflict() {
        let (state, _temp_dir) = build_state().await;
        let token = login(&state, "ada").await;
        let app = super::router().with_state(state);

        let (_, agent) = send(
            &app,
            "POST",
            "/api/agents",
            Some(&token),
            Some(json!({
                "name": "Slow",
                "type": "cloud",
                "config": { "simulated_latency_ms": 300 }
            })),
        )
        .await;
        let agent_id = agent["id"].as_str().unwrap().to_string();
        let uri = format!("/api/agents/{}/run", agent_id);

        let first = {
            let app = app.clone();
            let token = token.clone();
            let uri = uri.clone();
            tokio::spawn(async move {
                send(&app, "POST", &uri, Some(&token), Some(json!({ "inputs": {} }))).await
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let (status, body) = send(&app, "POST", &uri, Some(&token), Some(json!({}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], format!("Agent {} is already running", agent_id));

        let (status, result) = first.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["result"], "Processed by cloud agent Slow");

        let (status, _) = send(&app, "POST", &uri, Some(&token), Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
