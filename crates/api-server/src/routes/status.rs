//! Client status checks

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use omnia_core::status::StatusCheck;
use serde::Deserialize;

use super::{bad_request, map_core_error, RouteError};
use crate::state::AppState;

const STATUS_LIST_LIMIT: usize = 1000;

#[derive(Debug, Deserialize)]
struct CreateStatusCheckRequest {
    client_name: String,
}

async fn create_status_check(
    State(state): State<AppState>,
    Json(req): Json<CreateStatusCheckRequest>,
) -> Result<(StatusCode, Json<StatusCheck>), RouteError> {
    if req.client_name.trim().is_empty() {
        return Err(bad_request("client_name cannot be empty"));
    }
    let check = state
        .status_store()
        .record(&req.client_name)
        .await
        .map_err(map_core_error)?;
    Ok((StatusCode::CREATED, Json(check)))
}

async fn list_status_checks(State(state): State<AppState>) -> Json<Vec<StatusCheck>> {
    Json(state.status_store().list(STATUS_LIST_LIMIT).await)
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/status",
        get(list_status_checks).post(create_status_check),
    )
}
