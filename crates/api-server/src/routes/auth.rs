//! Registration and token issuance

use axum::{extract::State, http::StatusCode, routing::post, Form, Json, Router};
use chrono::{DateTime, Utc};
use omnia_core::user::UserAccount;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{map_auth_error, RouteError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    email: String,
    username: String,
    password: String,
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserAccount> for UserResponse {
    fn from(user: UserAccount) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    access_token: String,
    token_type: &'static str,
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), RouteError> {
    let user = state
        .auth()
        .register(&req.email, &req.username, &req.password, req.full_name)
        .await
        .map_err(map_auth_error)?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/auth/token - OAuth2 password flow (form encoded)
async fn issue_token(
    State(state): State<AppState>,
    Form(req): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, RouteError> {
    let user = state
        .auth()
        .authenticate(&req.username, &req.password)
        .await
        .map_err(map_auth_error)?;
    let access_token = state
        .auth()
        .issue_token(&user.username)
        .map_err(map_auth_error)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/token", post(issue_token))
}
