//! Environment-driven server configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use agent_runner::inference::DEFAULT_MODEL_CACHE_DIR;
use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = ".omnia-data";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
pub const DEFAULT_JWT_SECRET: &str = "omnia-dev-secret-change-me";
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub model_cache_dir: PathBuf,
    /// Allowed CORS origins; `None` allows any
    pub cors_origins: Option<Vec<String>>,
}

fn env_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw =
            env_string(&lookup, "OMNIA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: "OMNIA_BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let token_ttl_minutes = match env_string(&lookup, "OMNIA_TOKEN_TTL_MINUTES") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "OMNIA_TOKEN_TTL_MINUTES",
                    value: raw,
                })?,
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let cors_origins = env_string(&lookup, "OMNIA_CORS_ORIGINS").map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        Ok(Self {
            data_dir: env_string(&lookup, "OMNIA_DATA_DIR")
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                .into(),
            bind_addr,
            jwt_secret: env_string(&lookup, "OMNIA_JWT_SECRET")
                .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            token_ttl_minutes,
            model_cache_dir: env_string(&lookup, "MODEL_CACHE_DIR")
                .unwrap_or_else(|| DEFAULT_MODEL_CACHE_DIR.to_string())
                .into(),
            cors_origins: cors_origins.filter(|origins| !origins.is_empty()),
        })
    }

    /// Defaults with everything stored under `data_dir`
    #[cfg(test)]
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            model_cache_dir: data_dir.join("models"),
            data_dir,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            cors_origins: None,
        }
    }
}
