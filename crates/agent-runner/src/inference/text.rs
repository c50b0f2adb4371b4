use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{InferenceError, ModelKind, ModelService};

pub const DEFAULT_TEXT_MODEL: &str = "gpt2";
pub const DEFAULT_MAX_LENGTH: usize = 100;

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

fn default_role() -> String {
    "user".to_string()
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Text generation on a single causal language model
pub struct TextGenerationService {
    models: Arc<ModelService>,
    model_id: String,
}

impl TextGenerationService {
    pub fn new(models: Arc<ModelService>) -> Self {
        Self::with_model(models, DEFAULT_TEXT_MODEL)
    }

    pub fn with_model(models: Arc<ModelService>, model_id: impl Into<String>) -> Self {
        Self {
            models,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub async fn initialize(&self) -> Result<(), InferenceError> {
        self.models.load_model(&self.model_id, ModelKind::CausalLm).await
    }

    pub async fn generate_text(&self, prompt: &str, max_length: usize) -> Result<String, InferenceError> {
        self.models.generate_text(&self.model_id, prompt, max_length).await
    }

    /// Continue a conversation as the assistant
    pub async fn generate_response(
        &self,
        messages: &[ChatMessage],
        max_length: usize,
    ) -> Result<String, InferenceError> {
        self.generate_text(&conversation_prompt(messages), max_length).await
    }
}

fn conversation_prompt(messages: &[ChatMessage]) -> String {
    let mut prompt = String::new();
    for message in messages {
        let speaker = match message.role.as_str() {
            "user" => "User",
            "assistant" => "Assistant",
            "system" => "System",
            other => other,
        };
        prompt.push_str(speaker);
        prompt.push_str(": ");
        prompt.push_str(&message.content);
        prompt.push('\n');
    }
    prompt.push_str("Assistant: ");
    prompt
}
