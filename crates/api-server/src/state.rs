//! Application state

use std::sync::Arc;

use agent_runner::inference::{EmbeddingService, ModelService, TextGenerationService};
use agent_runner::AgentRegistry;
use omnia_core::agent::FileAgentStore;
use omnia_core::status::StatusCheckStore;
use omnia_core::task::FileTaskStore;
use omnia_core::tool::FileToolStore;
use omnia_core::user::FileUserStore;
use tracing::{error, info};

use crate::auth::AuthService;
use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    agent_store: FileAgentStore,
    tool_store: FileToolStore,
    task_store: FileTaskStore,
    status_store: StatusCheckStore,
    auth: AuthService,
    models: Arc<ModelService>,
    text_generation: TextGenerationService,
    embeddings: EmbeddingService,
    runners: AgentRegistry,
}

impl AppState {
    /// Open every collection under the configured data directory
    pub async fn new(config: &AppConfig) -> omnia_core::Result<Self> {
        let data_dir = &config.data_dir;
        tokio::fs::create_dir_all(data_dir).await?;

        let users = FileUserStore::new(data_dir.join("users.json")).await?;
        let models = Arc::new(ModelService::mock(config.model_cache_dir.clone()));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                agent_store: FileAgentStore::new(data_dir.join("agents.json")).await?,
                tool_store: FileToolStore::new(data_dir.join("tools.json")).await?,
                task_store: FileTaskStore::new(data_dir.join("tasks.json")).await?,
                status_store: StatusCheckStore::new(data_dir.join("status_checks.json")).await?,
                auth: AuthService::new(users, config.jwt_secret.clone(), config.token_ttl_minutes),
                text_generation: TextGenerationService::new(Arc::clone(&models)),
                embeddings: EmbeddingService::new(Arc::clone(&models)),
                models,
                runners: AgentRegistry::new(),
            }),
        })
    }

    /// Prepare the model cache and load the default models. Failures are
    /// logged; the affected endpoints retry loading on demand.
    pub async fn start_models(&self) {
        let result = async {
            self.inner.models.initialize().await?;
            self.inner.embeddings.initialize().await?;
            self.inner.text_generation.initialize().await
        }
        .await;

        match result {
            Ok(()) => info!("AI services initialized"),
            Err(e) => error!("Error initializing AI services: {}", e),
        }
    }

    pub async fn shutdown(&self) {
        info!("Shutting down Omnia AI Platform");
        self.inner.models.shutdown().await;
    }

    pub fn agent_store(&self) -> &FileAgentStore {
        &self.inner.agent_store
    }

    pub fn tool_store(&self) -> &FileToolStore {
        &self.inner.tool_store
    }

    pub fn task_store(&self) -> &FileTaskStore {
        &self.inner.task_store
    }

    pub fn status_store(&self) -> &StatusCheckStore {
        &self.inner.status_store
    }

    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    pub fn text_generation(&self) -> &TextGenerationService {
        &self.inner.text_generation
    }

    pub fn embeddings(&self) -> &EmbeddingService {
        &self.inner.embeddings
    }

    pub fn runners(&self) -> &AgentRegistry {
        &self.inner.runners
    }
}
