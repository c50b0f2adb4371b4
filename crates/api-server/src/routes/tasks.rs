//! Task API endpoints
//!
//! Tasks are owned by the user who created them and bound to one agent.
//! Running a task drives it pending -> running -> completed/failed.

use agent_runner::AgentRunResult;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use omnia_core::agent::AgentRepository;
use omnia_core::task::{Task, TaskPriority, TaskRepository, TaskTransition};
use omnia_core::Payload;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::agents::{no_realization, run_error};
use super::{bad_request, current_user, map_core_error, not_found, RouteError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct CreateTaskRequest {
    title: String,
    #[serde(default)]
    description: String,
    agent_id: Uuid,
    #[serde(default)]
    inputs: Payload,
    #[serde(default)]
    priority: TaskPriority,
}

fn task_not_found() -> RouteError {
    not_found("Task not found")
}

async fn owned_task(state: &AppState, id: Uuid, username: &str) -> Result<Task, RouteError> {
    state
        .task_store()
        .get_owned(id, username)
        .await
        .map_err(map_core_error)?
        .ok_or_else(task_not_found)
}

async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), RouteError> {
    let user = current_user(&state, &headers).await?;
    if req.title.trim().is_empty() {
        return Err(bad_request("Title cannot be empty"));
    }

    let agent_exists = state
        .agent_store()
        .get(req.agent_id)
        .await
        .map_err(map_core_error)?
        .is_some();
    if !agent_exists {
        return Err(not_found("Agent not found"));
    }

    let task = Task::new(req.title, req.description, req.agent_id, user.username)
        .with_inputs(req.inputs)
        .with_priority(req.priority);
    let created = state
        .task_store()
        .create(task)
        .await
        .map_err(map_core_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Task>>, RouteError> {
    let user = current_user(&state, &headers).await?;
    let tasks = state
        .task_store()
        .list_by_user(&user.username)
        .await
        .map_err(map_core_error)?;
    Ok(Json(tasks))
}

async fn get_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, RouteError> {
    let user = current_user(&state, &headers).await?;
    Ok(Json(owned_task(&state, id, &user.username).await?))
}

/// A guarded transition found the task in another state; report the current one
async fn transition_rejected(state: &AppState, id: Uuid, action: &str) -> RouteError {
    match state.task_store().get(id).await {
        Ok(Some(task)) => bad_request(format!(
            "Cannot {} a task with status {}",
            action,
            task.status.as_str()
        )),
        Ok(None) => task_not_found(),
        Err(err) => map_core_error(err),
    }
}

/// DELETE /api/tasks/{id} - Cancel a pending or running task
async fn cancel_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, RouteError> {
    let user = current_user(&state, &headers).await?;
    owned_task(&state, id, &user.username).await?;

    match state
        .task_store()
        .transition(id, TaskTransition::Cancel)
        .await
        .map_err(map_core_error)?
    {
        Some(cancelled) => {
            info!("Cancelled task {}", id);
            Ok(Json(cancelled))
        }
        None => Err(transition_rejected(&state, id, "cancel").await),
    }
}

/// POST /api/tasks/{id}/run - Run the task's agent on the task inputs
///
/// Every status change goes through a guarded store transition, so a cancel
/// acknowledged while the agent runs is never overwritten by the result.
async fn run_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, RouteError> {
    let user = current_user(&state, &headers).await?;
    let task = owned_task(&state, id, &user.username).await?;

    let agent = state
        .agent_store()
        .get(task.agent_id)
        .await
        .map_err(map_core_error)?
        .ok_or_else(|| not_found("Agent not found"))?;
    let runner = state
        .runners()
        .get_or_create(&agent)
        .await
        .ok_or_else(|| no_realization(agent.agent_type))?;

    let task = match state
        .task_store()
        .transition(id, TaskTransition::Start)
        .await
        .map_err(map_core_error)?
    {
        Some(task) => task,
        None => return Err(transition_rejected(&state, id, "run").await),
    };

    let run = match runner
        .run(task.id.to_string(), task.inputs.clone(), None)
        .await
    {
        Ok(run) => run,
        Err(err) => {
            warn!("Task {} not started: {}", id, err);
            state
                .task_store()
                .transition(id, TaskTransition::Reset)
                .await
                .map_err(map_core_error)?;
            return Err(run_error(err));
        }
    };

    let finish = match run.result {
        AgentRunResult::Success(outputs) => TaskTransition::Complete(outputs),
        AgentRunResult::Error { error } => TaskTransition::Fail(error),
    };
    match state
        .task_store()
        .transition(id, finish)
        .await
        .map_err(map_core_error)?
    {
        Some(updated) => {
            info!("Task {} finished with status {}", id, updated.status.as_str());
            Ok(Json(updated))
        }
        None => {
            warn!("Task {} left the running state during its run; result discarded", id);
            owned_task(&state, id, &user.username).await.map(Json)
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", get(get_task).delete(cancel_task))
        .route("/api/tasks/{id}/run", post(run_task))
}
