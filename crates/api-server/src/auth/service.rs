use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use omnia_core::user::{FileUserStore, UserAccount, UserRepository};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::password::{hash_password, verify_password};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Message without the category prefix, for response bodies
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message)
            | Self::Unauthorized(message)
            | Self::Conflict(message)
            | Self::Storage(message) => message,
        }
    }
}

impl From<omnia_core::Error> for AuthError {
    fn from(err: omnia_core::Error) -> Self {
        match err {
            omnia_core::Error::Conflict(message) => Self::Conflict(message),
            omnia_core::Error::InvalidInput(message) => Self::InvalidInput(message),
            other => Self::Storage(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username
    pub sub: String,
    pub exp: usize,
}

/// User registration, login and token verification
pub struct AuthService {
    users: FileUserStore,
    jwt_secret: String,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(users: FileUserStore, jwt_secret: impl Into<String>, token_ttl_minutes: i64) -> Self {
        Self {
            users,
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::minutes(token_ttl_minutes),
        }
    }

    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
        full_name: Option<String>,
    ) -> Result<UserAccount, AuthError> {
        let email = email.trim();
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::InvalidInput("Username cannot be empty".to_string()));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidInput("Password cannot be empty".to_string()));
        }
        if !is_plausible_email(email) {
            return Err(AuthError::InvalidInput(format!("Invalid email address: {}", email)));
        }

        let user = UserAccount::new(email, username, full_name, hash_password(password));
        let user = self.users.create(user).await?;
        info!("Registered user {}", user.username);
        Ok(user)
    }

    /// Check credentials and return the matching active user
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<UserAccount, AuthError> {
        let invalid = || AuthError::Unauthorized("Incorrect username or password".to_string());
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;
        if !user.is_active || !verify_password(&user.password_hash, password) {
            debug!("Rejected credentials for {}", username);
            return Err(invalid());
        }
        Ok(user)
    }

    pub fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let claims = TokenClaims {
            sub: username.to_string(),
            exp: (Utc::now() + self.token_ttl).timestamp().max(0) as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|err| AuthError::Storage(format!("Failed to encode JWT: {}", err)))
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|decoded| decoded.claims)
        .map_err(|err| AuthError::Unauthorized(format!("Invalid token: {}", err)))
    }

    /// Resolve a bearer token to its active user
    pub async fn current_user(&self, token: &str) -> Result<UserAccount, AuthError> {
        let claims = self.verify_token(token)?;
        match self.users.find_by_username(&claims.sub).await? {
            Some(user) if user.is_active => Ok(user),
            _ => Err(AuthError::Unauthorized(
                "Could not validate credentials".to_string(),
            )),
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}
