//! Route handlers

pub mod agents;
pub mod ai;
pub mod auth;
pub mod health;
pub mod status;
pub mod tasks;
pub mod tools;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json, Router,
};
use omnia_core::user::UserAccount;
use serde::Serialize;
use tracing::error;

use crate::auth::AuthError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type RouteError = (StatusCode, Json<ErrorResponse>);

pub fn route_error(status: StatusCode, error: impl Into<String>) -> RouteError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

pub fn bad_request(error: impl Into<String>) -> RouteError {
    route_error(StatusCode::BAD_REQUEST, error)
}

pub fn unauthorized(error: impl Into<String>) -> RouteError {
    route_error(StatusCode::UNAUTHORIZED, error)
}

pub fn not_found(error: impl Into<String>) -> RouteError {
    route_error(StatusCode::NOT_FOUND, error)
}

pub fn internal_error(error: impl std::fmt::Display) -> RouteError {
    error!("Request failed: {}", error);
    route_error(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
}

/// Translate a storage error into a response
pub fn map_core_error(err: omnia_core::Error) -> RouteError {
    match err {
        omnia_core::Error::InvalidInput(message) => bad_request(message),
        omnia_core::Error::Conflict(message) => route_error(StatusCode::CONFLICT, message),
        omnia_core::Error::NotFound(_) => not_found(err.to_string()),
        other => internal_error(other),
    }
}

pub fn map_auth_error(err: AuthError) -> RouteError {
    match err {
        AuthError::InvalidInput(_) | AuthError::Conflict(_) => bad_request(err.message()),
        AuthError::Unauthorized(_) => unauthorized(err.message()),
        AuthError::Storage(_) => internal_error(err),
    }
}

/// Resolve the `Authorization: Bearer` header to the calling user
pub async fn current_user(state: &AppState, headers: &HeaderMap) -> Result<UserAccount, RouteError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Not authenticated"))?;

    state.auth().current_user(token).await.map_err(|err| match err {
        AuthError::Storage(_) => internal_error(err),
        _ => unauthorized("Could not validate credentials"),
    })
}

/// Every API route
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(status::router())
        .merge(ai::router())
        .merge(auth::router())
        .merge(agents::router())
        .merge(tools::router())
        .merge(tasks::router())
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::state::AppState;

    pub async fn build_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let state = AppState::new(&AppConfig::for_data_dir(temp_dir.path()))
            .await
            .unwrap();
        (state, temp_dir)
    }

    /// Register `username` and return a bearer token for it
    pub async fn login(state: &AppState, username: &str) -> String {
        state
            .auth()
            .register(&format!("{}@example.com", username), username, "password", None)
            .await
            .unwrap();
        state.auth().issue_token(username).unwrap()
    }

    /// Send a request, returning the status and parsed JSON body (`Null` when empty)
    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}
