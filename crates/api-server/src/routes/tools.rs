//! Tool definitions and tool runs

use agent_runner::{ToolEnvelope, ToolFactory, ToolRunner};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use omnia_core::tool::{
    ToolDefinition, ToolExecutionEnvironment, ToolInput, ToolOutput, ToolRepository, ToolType,
};
use omnia_core::Payload;
use serde::Deserialize;
use uuid::Uuid;

use super::{bad_request, current_user, map_core_error, not_found, route_error, RouteError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateToolRequest {
    name: String,
    description: String,
    #[serde(rename = "type")]
    tool_type: ToolType,
    execution_environment: ToolExecutionEnvironment,
    #[serde(default)]
    inputs: Vec<ToolInput>,
    #[serde(default)]
    outputs: Vec<ToolOutput>,
    #[serde(default)]
    config: Payload,
}

#[derive(Debug, Deserialize)]
struct RunToolRequest {
    #[serde(default)]
    inputs: Payload,
}

fn tool_not_found() -> RouteError {
    not_found("Tool not found")
}

async fn create_tool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateToolRequest>,
) -> Result<(StatusCode, Json<ToolDefinition>), RouteError> {
    let user = current_user(&state, &headers).await?;
    if req.name.trim().is_empty() {
        return Err(bad_request("Name cannot be empty"));
    }

    let tool = ToolDefinition::new(
        req.name,
        req.description,
        req.tool_type,
        req.execution_environment,
        user.username,
    )
    .with_inputs(req.inputs)
    .with_outputs(req.outputs)
    .with_config(req.config);

    let created = state
        .tool_store()
        .create(tool)
        .await
        .map_err(map_core_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_tools(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ToolDefinition>>, RouteError> {
    current_user(&state, &headers).await?;
    let tools = state
        .tool_store()
        .list_active()
        .await
        .map_err(map_core_error)?;
    Ok(Json(tools))
}

async fn get_tool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ToolDefinition>, RouteError> {
    current_user(&state, &headers).await?;
    state
        .tool_store()
        .get_active(id)
        .await
        .map_err(map_core_error)?
        .map(Json)
        .ok_or_else(tool_not_found)
}

/// DELETE /api/tools/{id} - Deactivate a tool; only its creator may do so
async fn delete_tool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ToolDefinition>, RouteError> {
    let user = current_user(&state, &headers).await?;
    state
        .tool_store()
        .deactivate(id, &user.username)
        .await
        .map_err(map_core_error)?
        .map(Json)
        .ok_or_else(|| not_found("Tool not found or you don't have permission"))
}

async fn run_tool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(req): Json<RunToolRequest>,
) -> Result<Json<ToolEnvelope>, RouteError> {
    current_user(&state, &headers).await?;
    let definition = state
        .tool_store()
        .get_active(id)
        .await
        .map_err(map_core_error)?
        .ok_or_else(tool_not_found)?;

    let tool = ToolFactory::create_for(
        definition.tool_type,
        definition.id.to_string(),
        definition.name,
        definition.config,
    )
    .ok_or_else(|| {
        route_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("No realization for tool type {}", definition.tool_type),
        )
    })?;

    Ok(Json(ToolRunner::new(tool).run(req.inputs).await))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tools", get(list_tools).post(create_tool))
        .route("/api/tools/{id}", get(get_tool).delete(delete_tool))
        .route("/api/tools/{id}/run", post(run_tool))
}
